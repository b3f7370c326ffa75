//! Template rendering: turns [`StackData`] into TypeScript source.
//!
//! The Tera engine is built once and cached; helper registration is
//! part of that single initialization, never a module-level side
//! effect. Auto-escaping is disabled because the output is code, not
//! HTML — see the regression test at the bottom.

use crate::error::Result;
use crate::generator::helpers;
use crate::generator::stack_builder::{MetricReference, StackData};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::collections::HashMap;
use tera::Tera;

const STACK_TEMPLATE_NAME: &str = "cdk_stack.ts";
const STACK_TEMPLATE: &str = include_str!("templates/cdk_stack.ts.tera");

static ENGINE: OnceCell<Tera> = OnceCell::new();

fn build_engine() -> std::result::Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    // Generated output is TypeScript source; HTML entity escaping would
    // corrupt it.
    tera.autoescape_on(vec![]);
    tera.register_filter("ts_string", filters::ts_string);
    tera.register_filter("lower_first", filters::lower_first);
    tera.register_filter("metric_expression", filters::metric_expression);
    tera.register_filter("enum_ref", filters::enum_ref);
    tera.register_filter("topic_props", filters::topic_props);
    tera.add_raw_template(STACK_TEMPLATE_NAME, STACK_TEMPLATE)?;
    Ok(tera)
}

fn engine() -> Result<&'static Tera> {
    ENGINE.get_or_try_init(build_engine).map_err(Into::into)
}

/// Render a stack data model into raw (unformatted) TypeScript source.
/// A template load/compile failure is fatal for the generation call.
pub fn render_stack(stack_data: &StackData) -> Result<String> {
    let context = tera::Context::from_serialize(stack_data)?;
    let rendered = engine()?.render(STACK_TEMPLATE_NAME, &context)?;
    Ok(rendered)
}

/// Tera filter adapters over the pure helpers.
mod filters {
    use super::*;

    fn expect_string(value: &Value, filter: &str) -> tera::Result<String> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| tera::Error::msg(format!("{} expects a string value", filter)))
    }

    pub fn ts_string(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        let raw = expect_string(value, "ts_string")?;
        Ok(Value::String(helpers::escape_ts_string(&raw)))
    }

    pub fn lower_first(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        let raw = expect_string(value, "lower_first")?;
        Ok(Value::String(helpers::lower_first(&raw)))
    }

    pub fn metric_expression(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        let metric: MetricReference = serde_json::from_value(value.clone())
            .map_err(|e| tera::Error::msg(format!("metric_expression: invalid metric: {}", e)))?;
        Ok(Value::String(helpers::render_metric_expression(&metric)))
    }

    pub fn enum_ref(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let raw = expect_string(value, "enum_ref")?;
        let family = args
            .get("family")
            .and_then(Value::as_str)
            .ok_or_else(|| tera::Error::msg("enum_ref requires a 'family' argument"))?;
        Ok(Value::String(helpers::render_enum_reference(family, &raw)))
    }

    pub fn topic_props(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        let topic_name = value
            .get("topicName")
            .and_then(Value::as_str)
            .ok_or_else(|| tera::Error::msg("topic_props: missing topicName"))?;
        let display_name = value
            .get("displayName")
            .and_then(Value::as_str)
            .ok_or_else(|| tera::Error::msg("topic_props: missing displayName"))?;
        Ok(Value::String(helpers::render_topic_props(
            topic_name,
            display_name,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::types::Severity;
    use crate::generator::stack_builder::{
        AlarmDefinition, SnsConfiguration, StackMetadata,
    };
    use std::collections::BTreeMap;

    fn alarm(construct_id: &str) -> AlarmDefinition {
        AlarmDefinition {
            construct_id: construct_id.to_string(),
            metric: MetricReference {
                namespace: "AWS/RDS".to_string(),
                metric_name: "CPUUtilization".to_string(),
                dimensions: BTreeMap::from([(
                    "DBInstanceIdentifier".to_string(),
                    "MyDb".to_string(),
                )]),
                statistic: "Average".to_string(),
                period_seconds: 300,
            },
            threshold: 70.0,
            alarm_description: "Warning alarm for CPUUtilization on MyDb".to_string(),
            severity: Severity::Warning,
            comparison_operator: "greater than threshold".to_string(),
            treat_missing_data: "not breaching".to_string(),
            resource_logical_id: "MyDb".to_string(),
            resource_type: "AWS::RDS::DBInstance".to_string(),
        }
    }

    fn stack(alarms: Vec<AlarmDefinition>, sns: Option<SnsConfiguration>) -> StackData {
        StackData {
            stack_class_name: "TestAlarmsStack".to_string(),
            metadata: StackMetadata {
                generated_at: "2026-01-01T00:00:00Z".to_string(),
                template_path: "template.yaml".to_string(),
                total_resources: 1,
                total_alarms: alarms.len(),
                tool_version: "test".to_string(),
            },
            alarms,
            sns,
        }
    }

    #[test]
    fn renders_class_and_alarm_statements() {
        let code = render_stack(&stack(vec![alarm("MyDbCPUUtilizationWarningAlarm")], None)).unwrap();

        assert!(code.contains("export class TestAlarmsStack extends cdk.Stack"));
        assert!(code.contains("import * as cdk from 'aws-cdk-lib';"));
        assert!(code.contains("import * as cloudwatch from 'aws-cdk-lib/aws-cloudwatch';"));
        assert!(code.contains("new cloudwatch.Alarm(this, 'MyDbCPUUtilizationWarningAlarm', {"));
        assert!(code.contains("const myDbCPUUtilizationWarningAlarm ="));
        assert!(code.contains("threshold: 70"));
        assert!(code.contains("cloudwatch.ComparisonOperator.GREATER_THAN_THRESHOLD"));
        assert!(code.contains("cloudwatch.TreatMissingData.NOT_BREACHING"));
        // no SNS requested, no SNS artifacts
        assert!(!code.contains("aws-sns"));
        assert!(!code.contains("addAlarmAction"));
    }

    #[test]
    fn zero_alarms_render_placeholder_comment() {
        let code = render_stack(&stack(vec![], None)).unwrap();
        assert!(code.contains("// No alarms were generated"));
        assert!(!code.contains("new cloudwatch.Alarm"));
        assert!(!code.is_empty());
    }

    #[test]
    fn alarm_count_matches_rendered_constructions() {
        let alarms = vec![
            alarm("AWarningAlarm"),
            alarm("ACriticalAlarm"),
            alarm("BWarningAlarm"),
        ];
        let code = render_stack(&stack(alarms, None)).unwrap();
        assert_eq!(code.matches("new cloudwatch.Alarm(").count(), 3);
    }

    #[test]
    fn new_sns_topic_is_rendered_with_actions() {
        let sns = SnsConfiguration::CreateNew {
            topic_name: "alarm-notifications".to_string(),
            display_name: "Alarm Notifications".to_string(),
        };
        let code = render_stack(&stack(vec![alarm("AWarningAlarm")], Some(sns))).unwrap();

        assert!(code.contains("import * as sns from 'aws-cdk-lib/aws-sns';"));
        assert_eq!(code.matches("new sns.Topic(").count(), 1);
        assert!(code.contains("topicName: 'alarm-notifications',"));
        assert_eq!(code.matches(".addAlarmAction(new cloudwatchActions.SnsAction(alarmTopic));").count(), 1);
    }

    #[test]
    fn existing_sns_topic_is_imported_not_created() {
        let sns = SnsConfiguration::Existing {
            topic_arn: "arn:aws:sns:us-east-1:123456789012:alerts".to_string(),
        };
        let code = render_stack(&stack(vec![alarm("AWarningAlarm")], Some(sns))).unwrap();

        assert!(code.contains(
            "sns.Topic.fromTopicArn(this, 'AlarmTopic', 'arn:aws:sns:us-east-1:123456789012:alerts')"
        ));
        assert!(!code.contains("new sns.Topic("));
        assert!(code.contains(".addAlarmAction("));
    }

    #[test]
    fn output_is_never_html_escaped() {
        let mut noisy = alarm("AWarningAlarm");
        noisy.alarm_description = "thresholds & quotes: 'tight' <check>".to_string();
        let code = render_stack(&stack(vec![noisy], None)).unwrap();

        assert!(!code.contains("&#x27;"));
        assert!(!code.contains("&quot;"));
        assert!(!code.contains("&amp;"));
        assert!(!code.contains("&lt;"));
        assert!(code.contains("thresholds & quotes: \\'tight\\' <check>"));
    }
}
