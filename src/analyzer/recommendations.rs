//! Fixed CloudWatch metric recommendation registry.
//!
//! One table per supported resource type. Thresholds are deliberately
//! conservative defaults, not a tuning engine: every entry keeps the
//! invariant `warning < critical`.

use crate::analyzer::types::{Importance, MetricDefinition, SupportedResourceType, ThresholdPair};

struct MetricSpec {
    name: &'static str,
    namespace: &'static str,
    statistic: &'static str,
    unit: &'static str,
    period_seconds: u32,
    warning: f64,
    critical: f64,
    description: &'static str,
    category: &'static str,
    importance: Importance,
}

impl MetricSpec {
    fn to_definition(&self) -> MetricDefinition {
        MetricDefinition {
            metric_name: self.name.to_string(),
            namespace: self.namespace.to_string(),
            statistic: self.statistic.to_string(),
            unit: self.unit.to_string(),
            evaluation_period_seconds: self.period_seconds,
            recommended_threshold: ThresholdPair::new(self.warning, self.critical),
            description: self.description.to_string(),
            category: self.category.to_string(),
            importance: self.importance,
        }
    }
}

const RDS_METRICS: &[MetricSpec] = &[
    MetricSpec {
        name: "CPUUtilization",
        namespace: "AWS/RDS",
        statistic: "Average",
        unit: "Percent",
        period_seconds: 300,
        warning: 70.0,
        critical: 90.0,
        description: "Database instance CPU utilization",
        category: "Performance",
        importance: Importance::High,
    },
    MetricSpec {
        name: "FreeStorageSpace",
        namespace: "AWS/RDS",
        statistic: "Average",
        unit: "Bytes",
        period_seconds: 300,
        warning: 5_368_709_120.0,
        critical: 10_737_418_240.0,
        description: "Remaining storage space on the database instance",
        category: "Storage",
        importance: Importance::High,
    },
    MetricSpec {
        name: "DatabaseConnections",
        namespace: "AWS/RDS",
        statistic: "Average",
        unit: "Count",
        period_seconds: 300,
        warning: 80.0,
        critical: 100.0,
        description: "Number of client connections to the database",
        category: "Performance",
        importance: Importance::Medium,
    },
];

const LAMBDA_METRICS: &[MetricSpec] = &[
    MetricSpec {
        name: "Errors",
        namespace: "AWS/Lambda",
        statistic: "Sum",
        unit: "Count",
        period_seconds: 300,
        warning: 1.0,
        critical: 5.0,
        description: "Function invocation errors",
        category: "Errors",
        importance: Importance::High,
    },
    MetricSpec {
        name: "Duration",
        namespace: "AWS/Lambda",
        statistic: "Average",
        unit: "Milliseconds",
        period_seconds: 300,
        warning: 3000.0,
        critical: 10000.0,
        description: "Function execution duration",
        category: "Performance",
        importance: Importance::Medium,
    },
    MetricSpec {
        name: "Throttles",
        namespace: "AWS/Lambda",
        statistic: "Sum",
        unit: "Count",
        period_seconds: 300,
        warning: 1.0,
        critical: 10.0,
        description: "Throttled invocation attempts",
        category: "Errors",
        importance: Importance::Medium,
    },
];

const ECS_METRICS: &[MetricSpec] = &[
    MetricSpec {
        name: "CPUUtilization",
        namespace: "AWS/ECS",
        statistic: "Average",
        unit: "Percent",
        period_seconds: 300,
        warning: 70.0,
        critical: 90.0,
        description: "Service CPU utilization",
        category: "Performance",
        importance: Importance::High,
    },
    MetricSpec {
        name: "MemoryUtilization",
        namespace: "AWS/ECS",
        statistic: "Average",
        unit: "Percent",
        period_seconds: 300,
        warning: 70.0,
        critical: 90.0,
        description: "Service memory utilization",
        category: "Performance",
        importance: Importance::High,
    },
];

const ALB_METRICS: &[MetricSpec] = &[
    MetricSpec {
        name: "HTTPCode_ELB_5XX_Count",
        namespace: "AWS/ApplicationELB",
        statistic: "Sum",
        unit: "Count",
        period_seconds: 300,
        warning: 5.0,
        critical: 20.0,
        description: "5XX responses generated by the load balancer",
        category: "Errors",
        importance: Importance::High,
    },
    MetricSpec {
        name: "TargetResponseTime",
        namespace: "AWS/ApplicationELB",
        statistic: "Average",
        unit: "Seconds",
        period_seconds: 300,
        warning: 1.0,
        critical: 3.0,
        description: "Time between request leaving the load balancer and target response",
        category: "Performance",
        importance: Importance::Medium,
    },
];

const DYNAMODB_METRICS: &[MetricSpec] = &[
    MetricSpec {
        name: "ThrottledRequests",
        namespace: "AWS/DynamoDB",
        statistic: "Sum",
        unit: "Count",
        period_seconds: 300,
        warning: 1.0,
        critical: 10.0,
        description: "Requests rejected due to throughput limits",
        category: "Errors",
        importance: Importance::High,
    },
    MetricSpec {
        name: "ConsumedReadCapacityUnits",
        namespace: "AWS/DynamoDB",
        statistic: "Sum",
        unit: "Count",
        period_seconds: 300,
        warning: 240.0,
        critical: 290.0,
        description: "Read capacity units consumed over the period",
        category: "Capacity",
        importance: Importance::Low,
    },
];

const API_GATEWAY_METRICS: &[MetricSpec] = &[
    MetricSpec {
        name: "5XXError",
        namespace: "AWS/ApiGateway",
        statistic: "Sum",
        unit: "Count",
        period_seconds: 300,
        warning: 5.0,
        critical: 20.0,
        description: "Server-side errors returned by the API",
        category: "Errors",
        importance: Importance::High,
    },
    MetricSpec {
        name: "4XXError",
        namespace: "AWS/ApiGateway",
        statistic: "Sum",
        unit: "Count",
        period_seconds: 300,
        warning: 20.0,
        critical: 50.0,
        description: "Client-side errors returned by the API",
        category: "Errors",
        importance: Importance::Low,
    },
    MetricSpec {
        name: "Latency",
        namespace: "AWS/ApiGateway",
        statistic: "Average",
        unit: "Milliseconds",
        period_seconds: 300,
        warning: 1000.0,
        critical: 3000.0,
        description: "Time between request receipt and response",
        category: "Performance",
        importance: Importance::Medium,
    },
];

/// Recommended metrics for a resource type. `Unknown` gets none.
pub fn recommended_metrics(resource_type: SupportedResourceType) -> Vec<MetricDefinition> {
    let specs: &[MetricSpec] = match resource_type {
        SupportedResourceType::RdsInstance => RDS_METRICS,
        SupportedResourceType::LambdaFunction | SupportedResourceType::ServerlessFunction => {
            LAMBDA_METRICS
        }
        SupportedResourceType::EcsService => ECS_METRICS,
        SupportedResourceType::LoadBalancer => ALB_METRICS,
        SupportedResourceType::DynamoDbTable => DYNAMODB_METRICS,
        SupportedResourceType::ApiGatewayRestApi | SupportedResourceType::ServerlessApi => {
            API_GATEWAY_METRICS
        }
        SupportedResourceType::Unknown => &[],
    };
    specs.iter().map(MetricSpec::to_definition).collect()
}
