//! Builds the language-agnostic stack data model from an analysis
//! result. This is the last stage that sees raw resource properties;
//! everything downstream works on sanitized, render-ready data.

use crate::analyzer::types::{
    ExtendedAnalysisResult, MetricDefinition, ResourceWithMetrics, Severity,
    SupportedResourceType,
};
use crate::error::{ConfigError, GenerationError, Result};
use crate::generator::identifiers::alarm_construct_id;
use crate::generator::options::GenerationOptions;
use crate::generator::security;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything needed to reconstruct one CloudWatch metric in generated
/// code. Dimensions use a sorted map so rendering is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricReference {
    pub namespace: String,
    pub metric_name: String,
    pub dimensions: BTreeMap<String, String>,
    pub statistic: String,
    pub period_seconds: u32,
}

/// One alarm to generate. Two are derived per recommended metric, one
/// per severity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmDefinition {
    pub construct_id: String,
    pub metric: MetricReference,
    pub threshold: f64,
    pub alarm_description: String,
    pub severity: Severity,
    /// Internal enum-like value, translated to a CDK token by the
    /// renderer's enum-reference helper.
    pub comparison_operator: String,
    pub treat_missing_data: String,
    pub resource_logical_id: String,
    pub resource_type: String,
}

/// SNS wiring for the generated stack. The two modes are mutually
/// exclusive by construction.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SnsConfiguration {
    #[serde(rename = "existing", rename_all = "camelCase")]
    Existing { topic_arn: String },
    #[serde(rename = "createNew", rename_all = "camelCase")]
    CreateNew {
        topic_name: String,
        display_name: String,
    },
}

/// Metadata embedded in the generated stack's header comment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackMetadata {
    pub generated_at: String,
    pub template_path: String,
    pub total_resources: usize,
    pub total_alarms: usize,
    pub tool_version: String,
}

/// Top-level generation unit handed to the template renderer. Built
/// fresh per invocation, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackData {
    pub stack_class_name: String,
    pub alarms: Vec<AlarmDefinition>,
    pub metadata: StackMetadata,
    pub sns: Option<SnsConfiguration>,
}

/// Resolve SNS configuration from options. Supplying both an existing
/// topic ARN and `enable_sns` is a user configuration error, rejected
/// here even if option validation was skipped upstream.
pub fn resolve_sns_configuration(options: &GenerationOptions) -> Result<Option<SnsConfiguration>> {
    match (&options.sns_topic_arn, options.enable_sns) {
        (Some(_), true) => Err(ConfigError::ConflictingSnsOptions.into()),
        (Some(arn), false) => {
            security::validate_sns_topic_arn(arn)?;
            Ok(Some(SnsConfiguration::Existing {
                topic_arn: arn.clone(),
            }))
        }
        (None, true) => Ok(Some(SnsConfiguration::CreateNew {
            topic_name: options.sns_topic_name.clone(),
            display_name: options.sns_display_name.clone(),
        })),
        (None, false) => Ok(None),
    }
}

/// CloudWatch dimension mapping per resource type. Exhaustive over the
/// closed enum; `Unknown` falls back to a generic `ResourceId` with a
/// logged warning.
pub fn dimensions_for(
    resource_type: SupportedResourceType,
    logical_id: &str,
) -> BTreeMap<String, String> {
    let mut dimensions = BTreeMap::new();
    match resource_type {
        SupportedResourceType::RdsInstance => {
            dimensions.insert("DBInstanceIdentifier".to_string(), logical_id.to_string());
        }
        SupportedResourceType::LambdaFunction | SupportedResourceType::ServerlessFunction => {
            dimensions.insert("FunctionName".to_string(), logical_id.to_string());
        }
        SupportedResourceType::EcsService => {
            dimensions.insert("ServiceName".to_string(), logical_id.to_string());
            dimensions.insert("ClusterName".to_string(), "default".to_string());
        }
        SupportedResourceType::LoadBalancer => {
            dimensions.insert("LoadBalancer".to_string(), logical_id.to_string());
        }
        SupportedResourceType::DynamoDbTable => {
            dimensions.insert("TableName".to_string(), logical_id.to_string());
        }
        SupportedResourceType::ApiGatewayRestApi | SupportedResourceType::ServerlessApi => {
            dimensions.insert("ApiName".to_string(), logical_id.to_string());
        }
        SupportedResourceType::Unknown => {
            warn!(
                "no dimension mapping for resource '{}'; using generic ResourceId",
                logical_id
            );
            dimensions.insert("ResourceId".to_string(), logical_id.to_string());
        }
    }
    dimensions
}

/// Build the stack data model from an analysis result.
pub fn build_stack_data(
    analysis: &ExtendedAnalysisResult,
    options: &GenerationOptions,
) -> Result<StackData> {
    if analysis.metadata.template_path.is_empty() {
        return Err(GenerationError::InvalidAnalysis(
            "analysis metadata is missing a template path".to_string(),
        )
        .into());
    }

    // Fail fast on conflicting SNS options before any alarm is built.
    let sns = resolve_sns_configuration(options)?;

    let mut alarms = Vec::new();
    for resource in &analysis.resources {
        let resource_type = SupportedResourceType::parse(&resource.resource_type);
        if !resource_type.is_supported() {
            debug!(
                "excluding unsupported resource '{}' ({})",
                resource.logical_id, resource.resource_type
            );
            continue;
        }

        if let Some(filters) = &options.resource_type_filters {
            if !filters.iter().any(|f| f == &resource.resource_type) {
                debug!(
                    "excluding resource '{}' filtered out by --resource-types",
                    resource.logical_id
                );
                continue;
            }
        }

        let sanitized =
            security::sanitize_properties(&resource.resource_properties, &options.extra_sensitive_keys);
        let report = security::sanitization_report(&resource.resource_properties, &sanitized);
        if report.has_sensitive_data {
            warn!(
                "redacted {} sensitive key(s) on '{}': {}",
                report.redacted_count,
                resource.logical_id,
                report.redacted_keys.join(", ")
            );
        }

        for metric in &resource.metrics {
            if metric.importance == crate::analyzer::types::Importance::Low
                && !options.include_low_importance
            {
                debug!(
                    "skipping low-importance metric {}/{}",
                    resource.logical_id, metric.metric_name
                );
                continue;
            }
            alarms.push(build_alarm(resource, resource_type, metric, Severity::Warning));
            alarms.push(build_alarm(resource, resource_type, metric, Severity::Critical));
        }
    }

    Ok(StackData {
        stack_class_name: options.stack_name.clone(),
        metadata: StackMetadata {
            generated_at: chrono::Utc::now().to_rfc3339(),
            template_path: analysis.metadata.template_path.clone(),
            total_resources: analysis.metadata.total_resources,
            total_alarms: alarms.len(),
            tool_version: crate::VERSION.to_string(),
        },
        alarms,
        sns,
    })
}

fn build_alarm(
    resource: &ResourceWithMetrics,
    resource_type: SupportedResourceType,
    metric: &MetricDefinition,
    severity: Severity,
) -> AlarmDefinition {
    let threshold = metric.recommended_threshold.for_severity(severity);
    AlarmDefinition {
        construct_id: alarm_construct_id(&resource.logical_id, &metric.metric_name, severity),
        metric: MetricReference {
            namespace: metric.namespace.clone(),
            metric_name: metric.metric_name.clone(),
            dimensions: dimensions_for(resource_type, &resource.logical_id),
            statistic: metric.statistic.clone(),
            period_seconds: metric.evaluation_period_seconds,
        },
        threshold,
        alarm_description: format!(
            "{} alarm for {} on {}: {} (threshold: {})",
            severity, metric.metric_name, resource.logical_id, metric.description, threshold
        ),
        severity,
        comparison_operator: "greater than threshold".to_string(),
        treat_missing_data: "not breaching".to_string(),
        resource_logical_id: resource.logical_id.clone(),
        resource_type: resource.resource_type.clone(),
    }
}
