//! Core types for template analysis and alarm recommendation.
//!
//! These types form the boundary contract between the analyzer and the
//! CDK generator: the analyzer produces an [`ExtendedAnalysisResult`],
//! the generator consumes it without ever reaching back into the
//! template.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque resource property map as found in the template. May contain
/// sensitive values; must pass through the security sanitizer before
/// reaching generated code or logs.
pub type PropertyMap = serde_json::Map<String, serde_json::Value>;

/// How strongly a metric is recommended for alarming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Importance {
    Low,
    Medium,
    High,
}

impl Importance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Alarm severity. Every recommended metric yields one alarm per severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Warning/critical threshold pair for a recommended metric.
///
/// Invariant: `0 < warning < critical`, enforced on deserialization so
/// an analysis result loaded from JSON cannot carry inverted thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ThresholdPairWire")]
pub struct ThresholdPair {
    pub warning: f64,
    pub critical: f64,
}

#[derive(Deserialize)]
struct ThresholdPairWire {
    warning: f64,
    critical: f64,
}

impl TryFrom<ThresholdPairWire> for ThresholdPair {
    type Error = String;

    fn try_from(wire: ThresholdPairWire) -> Result<Self, Self::Error> {
        if wire.warning > 0.0 && wire.warning < wire.critical {
            Ok(Self {
                warning: wire.warning,
                critical: wire.critical,
            })
        } else {
            Err(format!(
                "threshold pair must satisfy 0 < warning < critical, got warning {} / critical {}",
                wire.warning, wire.critical
            ))
        }
    }
}

impl ThresholdPair {
    pub fn new(warning: f64, critical: f64) -> Self {
        debug_assert!(warning > 0.0 && warning < critical);
        Self { warning, critical }
    }

    /// The threshold value to use for a given alarm severity.
    pub fn for_severity(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Warning => self.warning,
            Severity::Critical => self.critical,
        }
    }
}

/// A single recommended CloudWatch metric for a resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDefinition {
    pub metric_name: String,
    pub namespace: String,
    pub statistic: String,
    pub unit: String,
    pub evaluation_period_seconds: u32,
    pub recommended_threshold: ThresholdPair,
    pub description: String,
    pub category: String,
    pub importance: Importance,
}

/// One analyzed infrastructure resource together with its recommended
/// metrics. Immutable input to the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceWithMetrics {
    /// Logical ID, unique within a template.
    pub logical_id: String,
    /// AWS type identifier, e.g. `AWS::RDS::DBInstance`.
    pub resource_type: String,
    /// Raw resource properties from the template (possibly sensitive).
    #[serde(default)]
    pub resource_properties: PropertyMap,
    pub metrics: Vec<MetricDefinition>,
}

/// Metadata about an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub template_path: String,
    pub total_resources: usize,
    pub supported_resources: usize,
    pub version: String,
    pub generated_at: String,
}

/// Complete output of a template analysis run and the input contract of
/// the CDK generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendedAnalysisResult {
    pub resources: Vec<ResourceWithMetrics>,
    pub metadata: AnalysisMetadata,
    /// Resource types present in the template that no recommendations
    /// exist for, as `LogicalId (AWS::Type)` strings.
    pub unsupported_resources: Vec<String>,
}

/// Closed set of resource types the recommendation registry knows about.
///
/// `Unknown` is an explicit variant rather than a silent default so the
/// dimension mapping in the generator can be an exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportedResourceType {
    RdsInstance,
    LambdaFunction,
    ServerlessFunction,
    EcsService,
    LoadBalancer,
    DynamoDbTable,
    ApiGatewayRestApi,
    ServerlessApi,
    Unknown,
}

impl SupportedResourceType {
    /// Map an AWS type identifier onto the closed enum. Types outside
    /// the allow-list become `Unknown`.
    pub fn parse(resource_type: &str) -> Self {
        match resource_type {
            "AWS::RDS::DBInstance" => Self::RdsInstance,
            "AWS::Lambda::Function" => Self::LambdaFunction,
            "AWS::Serverless::Function" => Self::ServerlessFunction,
            "AWS::ECS::Service" => Self::EcsService,
            "AWS::ElasticLoadBalancingV2::LoadBalancer" => Self::LoadBalancer,
            "AWS::DynamoDB::Table" => Self::DynamoDbTable,
            "AWS::ApiGateway::RestApi" => Self::ApiGatewayRestApi,
            "AWS::Serverless::Api" => Self::ServerlessApi,
            _ => Self::Unknown,
        }
    }

    /// Whether alarm recommendations exist for this type.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// The canonical AWS type identifier, or `"Unknown"`.
    pub fn aws_type(&self) -> &'static str {
        match self {
            Self::RdsInstance => "AWS::RDS::DBInstance",
            Self::LambdaFunction => "AWS::Lambda::Function",
            Self::ServerlessFunction => "AWS::Serverless::Function",
            Self::EcsService => "AWS::ECS::Service",
            Self::LoadBalancer => "AWS::ElasticLoadBalancingV2::LoadBalancer",
            Self::DynamoDbTable => "AWS::DynamoDB::Table",
            Self::ApiGatewayRestApi => "AWS::ApiGateway::RestApi",
            Self::ServerlessApi => "AWS::Serverless::Api",
            Self::Unknown => "Unknown",
        }
    }

    /// All supported variants, used by the `support` command and the
    /// recommendation registry.
    pub fn all_supported() -> &'static [SupportedResourceType] {
        &[
            Self::RdsInstance,
            Self::LambdaFunction,
            Self::ServerlessFunction,
            Self::EcsService,
            Self::LoadBalancer,
            Self::DynamoDbTable,
            Self::ApiGatewayRestApi,
            Self::ServerlessApi,
        ]
    }
}

impl fmt::Display for SupportedResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.aws_type())
    }
}
