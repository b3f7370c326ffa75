//! # CDK Stack Generator
//!
//! Transforms an analysis result into TypeScript source for an AWS CDK
//! stack wiring CloudWatch alarms to recommended metrics, with optional
//! SNS notification plumbing.
//!
//! Pipeline: option validation → security sanitization → stack data
//! building → template rendering → formatting → post-generation
//! validation.

pub mod formatter;
pub mod helpers;
pub mod identifiers;
pub mod options;
pub mod renderer;
pub mod security;
pub mod stack_builder;
pub mod validator;

pub use options::GenerationOptions;
pub use stack_builder::{AlarmDefinition, SnsConfiguration, StackData, StackMetadata};
pub use validator::{ValidationResult, ValidatorOptions};

use crate::analyzer::types::ExtendedAnalysisResult;
use crate::error::{AlarmGenError, GenerationError, Result};
use log::{debug, info};
use std::time::Instant;

/// Output of one generation invocation.
#[derive(Debug)]
pub struct GenerationOutput {
    /// Formatted TypeScript source of the stack.
    pub code: String,
    /// Alarm count after filtering, for operator summaries.
    pub alarm_count: usize,
    /// Whether SNS wiring was generated.
    pub sns_configured: bool,
    /// Validation findings, present when validation ran.
    pub validation: Option<ValidationResult>,
}

/// Generate CDK stack source from an analysis result.
///
/// Fatal errors: invalid options (pre-generation), rendering failure
/// (mid-pipeline, wrapped with elapsed-time context), or — when
/// `options.validate_code` is set — a validation result with errors.
pub fn generate_cdk_stack(
    analysis: &ExtendedAnalysisResult,
    options: &GenerationOptions,
) -> Result<GenerationOutput> {
    options.validate()?;

    let started = Instant::now();

    let stack_data = stack_builder::build_stack_data(analysis, options)?;
    debug!(
        "built stack data: {} alarm(s), sns: {}",
        stack_data.alarms.len(),
        stack_data.sns.is_some()
    );

    let raw = renderer::render_stack(&stack_data).map_err(|e| match e {
        AlarmGenError::Template(inner) => AlarmGenError::Generation(GenerationError::Rendering {
            elapsed_ms: started.elapsed().as_millis(),
            message: inner.to_string(),
        }),
        other => other,
    })?;

    let code = formatter::format_source(&raw);

    let validation = if options.validate_code {
        let validator_options = ValidatorOptions {
            verbose: options.verbose,
            ..Default::default()
        };
        let result = validator::validate_generated_code(&code, &validator_options);
        if !result.is_valid {
            return Err(GenerationError::ValidationFailed {
                error_count: result.errors.len(),
                first_error: result
                    .errors
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "unknown validation error".to_string()),
            }
            .into());
        }
        Some(result)
    } else {
        None
    };

    info!(
        "generated {} alarm(s) in {}ms",
        stack_data.alarms.len(),
        started.elapsed().as_millis()
    );

    Ok(GenerationOutput {
        alarm_count: stack_data.alarms.len(),
        sns_configured: stack_data.sns.is_some(),
        code,
        validation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::types::{
        AnalysisMetadata, Importance, MetricDefinition, ResourceWithMetrics, ThresholdPair,
    };

    fn metric(name: &str, namespace: &str, importance: Importance) -> MetricDefinition {
        MetricDefinition {
            metric_name: name.to_string(),
            namespace: namespace.to_string(),
            statistic: "Average".to_string(),
            unit: "Percent".to_string(),
            evaluation_period_seconds: 300,
            recommended_threshold: ThresholdPair::new(70.0, 90.0),
            description: "test metric".to_string(),
            category: "Performance".to_string(),
            importance,
        }
    }

    fn resource(logical_id: &str, resource_type: &str, metrics: Vec<MetricDefinition>) -> ResourceWithMetrics {
        ResourceWithMetrics {
            logical_id: logical_id.to_string(),
            resource_type: resource_type.to_string(),
            resource_properties: Default::default(),
            metrics,
        }
    }

    fn analysis(resources: Vec<ResourceWithMetrics>) -> ExtendedAnalysisResult {
        ExtendedAnalysisResult {
            metadata: AnalysisMetadata {
                template_path: "template.yaml".to_string(),
                total_resources: resources.len(),
                supported_resources: resources.len(),
                version: "test".to_string(),
                generated_at: "2026-01-01T00:00:00Z".to_string(),
            },
            resources,
            unsupported_resources: Vec::new(),
        }
    }

    #[test]
    fn rds_resource_yields_four_alarms_and_no_sns() {
        let input = analysis(vec![resource(
            "Db",
            "AWS::RDS::DBInstance",
            vec![
                metric("CPUUtilization", "AWS/RDS", Importance::High),
                metric("FreeStorageSpace", "AWS/RDS", Importance::High),
            ],
        )]);

        let output = generate_cdk_stack(&input, &GenerationOptions::default()).unwrap();
        assert_eq!(output.alarm_count, 4);
        assert!(!output.sns_configured);
        assert_eq!(output.code.matches("new cloudwatch.Alarm(").count(), 4);
        assert_eq!(output.code.matches("new sns.Topic(").count(), 0);
        assert_eq!(output.code.matches(".addAlarmAction(").count(), 0);
        assert!(output.validation.as_ref().is_some_and(|v| v.is_valid));
    }

    #[test]
    fn three_resources_with_sns_wire_every_alarm() {
        let input = analysis(vec![
            resource("Db", "AWS::RDS::DBInstance", vec![metric("CPUUtilization", "AWS/RDS", Importance::High)]),
            resource("Fn", "AWS::Lambda::Function", vec![metric("Errors", "AWS/Lambda", Importance::High)]),
            resource("Tbl", "AWS::DynamoDB::Table", vec![metric("ThrottledRequests", "AWS/DynamoDB", Importance::High)]),
        ]);

        let options = GenerationOptions {
            enable_sns: true,
            ..Default::default()
        };
        let output = generate_cdk_stack(&input, &options).unwrap();
        assert_eq!(output.alarm_count, 6);
        assert!(output.sns_configured);
        assert_eq!(output.code.matches("new cloudwatch.Alarm(").count(), 6);
        assert_eq!(output.code.matches("new sns.Topic(").count(), 1);
        assert_eq!(output.code.matches(".addAlarmAction(").count(), 6);
    }

    #[test]
    fn conflicting_sns_options_reject_before_rendering() {
        let input = analysis(vec![]);
        let options = GenerationOptions {
            enable_sns: true,
            sns_topic_arn: Some("arn:aws:sns:us-east-1:123456789012:alerts".to_string()),
            ..Default::default()
        };
        let err = generate_cdk_stack(&input, &options).unwrap_err();
        assert!(err.to_string().contains("conflicting SNS options"));
    }

    #[test]
    fn hyphenated_stack_name_never_reaches_rendering() {
        // a hyphen would be emitted verbatim into `export class <name>`,
        // which the structural check cannot see; it must die in options
        // validation instead
        let input = analysis(vec![resource(
            "Db",
            "AWS::RDS::DBInstance",
            vec![metric("CPUUtilization", "AWS/RDS", Importance::High)],
        )]);
        let options = GenerationOptions {
            stack_name: "my-alarms".to_string(),
            ..Default::default()
        };
        let err = generate_cdk_stack(&input, &options).unwrap_err();
        assert!(err.to_string().contains("invalid stack name"));
    }

    #[test]
    fn invalid_arn_rejects() {
        let input = analysis(vec![]);
        let options = GenerationOptions {
            sns_topic_arn: Some("arn:aws:sns:us-east-1:12:alerts".to_string()),
            ..Default::default()
        };
        assert!(generate_cdk_stack(&input, &options).is_err());
    }

    #[test]
    fn empty_analysis_renders_placeholder_stack() {
        let input = analysis(vec![]);
        let output = generate_cdk_stack(&input, &GenerationOptions::default()).unwrap();
        assert_eq!(output.alarm_count, 0);
        assert!(output.code.contains("// No alarms were generated"));
        assert!(!output.code.contains("new cloudwatch.Alarm"));
    }

    #[test]
    fn generated_code_is_format_stable() {
        let input = analysis(vec![resource(
            "Db",
            "AWS::RDS::DBInstance",
            vec![metric("CPUUtilization", "AWS/RDS", Importance::High)],
        )]);
        let output = generate_cdk_stack(&input, &GenerationOptions::default()).unwrap();
        assert_eq!(formatter::format_source(&output.code), output.code);
    }

    #[test]
    fn escaping_regression_no_html_entities() {
        let mut res = resource(
            "Db",
            "AWS::RDS::DBInstance",
            vec![metric("CPUUtilization", "AWS/RDS", Importance::High)],
        );
        res.logical_id = "Db".to_string();
        let input = analysis(vec![res]);
        let output = generate_cdk_stack(&input, &GenerationOptions::default()).unwrap();
        for entity in ["&#x27;", "&quot;", "&amp;"] {
            assert!(!output.code.contains(entity), "found {} in output", entity);
        }
    }
}
