//! Conversion of arbitrary logical IDs and metric names into safe
//! TypeScript identifiers for CDK construct IDs.

use crate::analyzer::types::Severity;

/// Convert a raw string into a valid TypeScript identifier fragment.
///
/// Steps, in order:
/// 1. a leading `4` or `5` becomes `Four`/`Five`, so HTTP-error metric
///    names like `4XXError` keep their meaning (`FourXXError`);
/// 2. every character outside `[A-Za-z0-9_]` becomes `_`;
/// 3. if the result still starts with a digit, prefix `_`;
/// 4. runs of consecutive underscores collapse to one.
///
/// Deterministic; collisions between distinct inputs are possible and
/// caught by the post-generation validator's duplicate-ID check.
pub fn to_identifier(raw: &str) -> String {
    let mapped = match raw.as_bytes().first() {
        Some(b'4') => format!("Four{}", &raw[1..]),
        Some(b'5') => format!("Five{}", &raw[1..]),
        _ => raw.to_string(),
    };

    let mut cleaned: String = mapped
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if cleaned.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        cleaned.insert(0, '_');
    }

    let mut collapsed = String::with_capacity(cleaned.len());
    let mut last_was_underscore = false;
    for c in cleaned.chars() {
        if c == '_' {
            if !last_was_underscore {
                collapsed.push(c);
            }
            last_was_underscore = true;
        } else {
            collapsed.push(c);
            last_was_underscore = false;
        }
    }
    collapsed
}

/// Construct ID for an alarm: sanitized logical ID, sanitized metric
/// name, severity, and the `Alarm` suffix.
pub fn alarm_construct_id(logical_id: &str, metric_name: &str, severity: Severity) -> String {
    format!(
        "{}{}{}Alarm",
        to_identifier(logical_id),
        to_identifier(metric_name),
        severity.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_clean_identifiers() {
        assert_eq!(to_identifier("MyDatabase"), "MyDatabase");
        assert_eq!(to_identifier("CPUUtilization"), "CPUUtilization");
    }

    #[test]
    fn maps_leading_http_error_digits() {
        assert_eq!(to_identifier("4XXError"), "FourXXError");
        assert_eq!(to_identifier("5XXError"), "FiveXXError");
    }

    #[test]
    fn other_leading_digits_get_underscore_prefix() {
        assert_eq!(to_identifier("2XXCount"), "_2XXCount");
    }

    #[test]
    fn replaces_special_characters_with_underscore() {
        assert_eq!(to_identifier("my-resource.name"), "my_resource_name");
        assert_eq!(to_identifier("HTTPCode_ELB_5XX_Count"), "HTTPCode_ELB_5XX_Count");
    }

    #[test]
    fn collapses_underscore_runs() {
        assert_eq!(to_identifier("a--b__c"), "a_b_c");
        assert_eq!(to_identifier("weird!!!name"), "weird_name");
    }

    #[test]
    fn construct_id_combines_all_parts() {
        let id = alarm_construct_id("MyApi", "4XXError", Severity::Warning);
        assert_eq!(id, "MyApiFourXXErrorWarningAlarm");

        let id = alarm_construct_id("my-db", "CPUUtilization", Severity::Critical);
        assert_eq!(id, "my_dbCPUUtilizationCriticalAlarm");
    }

    #[test]
    fn construct_ids_are_valid_ts_identifiers() {
        let re = regex::Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*Alarm$").unwrap();
        for (logical, metric) in [
            ("MyDatabase", "CPUUtilization"),
            ("4Service", "5XXError"),
            ("weird name!", "Consumed-Read"),
            ("_already", "__fine__"),
        ] {
            let id = alarm_construct_id(logical, metric, Severity::Warning);
            assert!(re.is_match(&id), "invalid identifier: {}", id);
        }
    }
}
