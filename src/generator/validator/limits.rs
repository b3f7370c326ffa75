//! AWS service quota checks on generated code.
//!
//! Counts are pattern-based over the generated text. The CloudWatch
//! alarm quota is the only hard error; topic and construct counts are
//! advisory.

use crate::generator::validator::patterns;
use crate::generator::validator::ValidationResult;

/// Per-account CloudWatch alarm quota.
const ALARM_HARD_LIMIT: usize = 5000;
/// Above this, a single stack holds an unusually large alarm count.
const ALARM_WARNING_THRESHOLD: usize = 1000;
/// Advisory SNS topic count; the real quota is far higher.
const SNS_TOPIC_WARNING_THRESHOLD: usize = 100;
/// Advisory construct count before suggesting a stack split.
const CONSTRUCT_WARNING_THRESHOLD: usize = 500;

pub fn check(code: &str, result: &mut ValidationResult) {
    let alarm_count = patterns::count_alarm_constructions(code);
    result.metrics.alarm_count = alarm_count;

    if alarm_count > ALARM_HARD_LIMIT {
        result.errors.push(format!(
            "{} alarms exceeds AWS CloudWatch limit of {} per account",
            alarm_count, ALARM_HARD_LIMIT
        ));
    } else if alarm_count >= ALARM_WARNING_THRESHOLD {
        result.warnings.push(format!(
            "{} alarms in one stack approaches the AWS CloudWatch account limit of {}",
            alarm_count, ALARM_HARD_LIMIT
        ));
    }

    let topic_count = patterns::count_sns_topic_constructions(code);
    if topic_count > SNS_TOPIC_WARNING_THRESHOLD {
        result.warnings.push(format!(
            "{} SNS topics created in one stack; consider consolidating notification topics",
            topic_count
        ));
    }

    let construct_count = patterns::count_generic_constructs(code);
    if construct_count > CONSTRUCT_WARNING_THRESHOLD {
        result.warnings.push(format!(
            "{} constructs in one stack; consider splitting into multiple stacks",
            construct_count
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alarms(n: usize) -> String {
        "new cloudwatch.Alarm(this, 'A', {});\n".repeat(n)
    }

    #[test]
    fn small_stack_passes_cleanly() {
        let mut result = ValidationResult::default();
        check(&alarms(10), &mut result);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
        assert_eq!(result.metrics.alarm_count, 10);
    }

    #[test]
    fn exceeding_alarm_quota_is_a_hard_error() {
        let mut result = ValidationResult::default();
        check(&alarms(5001), &mut result);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("exceeds AWS CloudWatch limit of 5000"));
    }

    #[test]
    fn large_alarm_count_is_a_warning() {
        let mut result = ValidationResult::default();
        check(&alarms(1000), &mut result);
        assert!(result.errors.is_empty());
        assert_eq!(result.warnings.len(), 2, "alarm warning plus construct-count warning");
        assert!(result.warnings[0].contains("approaches"));
    }

    #[test]
    fn many_sns_topics_warn_but_do_not_error() {
        let mut result = ValidationResult::default();
        let code = "new sns.Topic(this, 'T', {});\n".repeat(101);
        check(&code, &mut result);
        assert!(result.errors.is_empty());
        assert!(result.warnings.iter().any(|w| w.contains("SNS topics")));
    }
}
