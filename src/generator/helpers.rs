//! Pure rendering helpers used by the stack template.
//!
//! Each helper turns one structured value into a literal TypeScript
//! expression. They are exposed to the template engine as filters (see
//! `renderer.rs`) but kept as plain functions so they can be tested
//! without an engine.
//!
//! All string output here is raw source text. Quote-safety is the only
//! escaping applied; HTML-entity escaping must never happen in this
//! path.

use crate::generator::stack_builder::MetricReference;
use log::warn;
use std::collections::BTreeMap;

/// Escape a string for embedding inside a single-quoted TypeScript
/// string literal.
pub fn escape_ts_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Lowercase the first character, turning a construct ID into a
/// conventional TypeScript variable name.
pub fn lower_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render a dimensions map as a TypeScript object literal. Keys are
/// CloudWatch dimension names (always valid identifiers); values are
/// single-quoted strings, one pair per line.
pub fn render_dimensions_map(dimensions: &BTreeMap<String, String>) -> String {
    if dimensions.is_empty() {
        return "{}".to_string();
    }
    let mut out = String::from("{\n");
    for (key, value) in dimensions {
        out.push_str(&format!("          {}: '{}',\n", key, escape_ts_string(value)));
    }
    out.push_str("        }");
    out
}

/// Render a full `new cloudwatch.Metric({...})` expression.
pub fn render_metric_expression(metric: &MetricReference) -> String {
    format!(
        "new cloudwatch.Metric({{\n\
         \x20       namespace: '{}',\n\
         \x20       metricName: '{}',\n\
         \x20       dimensionsMap: {},\n\
         \x20       statistic: '{}',\n\
         \x20       period: cdk.Duration.seconds({}),\n\
         \x20     }})",
        escape_ts_string(&metric.namespace),
        escape_ts_string(&metric.metric_name),
        render_dimensions_map(&metric.dimensions),
        escape_ts_string(&metric.statistic),
        metric.period_seconds
    )
}

/// Translate an internal enum-like value into its CDK token.
///
/// Unmapped values pass through verbatim with a logged warning; the
/// post-generation compile check is the net that catches an invalid
/// token in the output.
pub fn render_enum_reference(family: &str, value: &str) -> String {
    let token = match family {
        "comparison" => match value {
            "greater than threshold" => {
                Some("cloudwatch.ComparisonOperator.GREATER_THAN_THRESHOLD")
            }
            "greater than or equal to threshold" => {
                Some("cloudwatch.ComparisonOperator.GREATER_THAN_OR_EQUAL_TO_THRESHOLD")
            }
            "less than threshold" => Some("cloudwatch.ComparisonOperator.LESS_THAN_THRESHOLD"),
            "less than or equal to threshold" => {
                Some("cloudwatch.ComparisonOperator.LESS_THAN_OR_EQUAL_TO_THRESHOLD")
            }
            _ => None,
        },
        "missing_data" => match value {
            "not breaching" => Some("cloudwatch.TreatMissingData.NOT_BREACHING"),
            "breaching" => Some("cloudwatch.TreatMissingData.BREACHING"),
            "ignore" => Some("cloudwatch.TreatMissingData.IGNORE"),
            "missing" => Some("cloudwatch.TreatMissingData.MISSING"),
            _ => None,
        },
        _ => None,
    };

    match token {
        Some(token) => token.to_string(),
        None => {
            warn!(
                "no {} enum mapping for '{}'; emitting value verbatim",
                family, value
            );
            value.to_string()
        }
    }
}

/// Render SNS topic props as a TypeScript object literal.
pub fn render_topic_props(topic_name: &str, display_name: &str) -> String {
    format!(
        "{{\n\
         \x20     topicName: '{}',\n\
         \x20     displayName: '{}',\n\
         \x20   }}",
        escape_ts_string(topic_name),
        escape_ts_string(display_name)
    )
}
