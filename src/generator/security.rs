//! Security sanitization for resource properties and generation options.
//!
//! Resource properties come straight out of user templates and may carry
//! credentials; they are redacted before they can reach generated code
//! or logs. Generation options (stack name, output directory, SNS ARN)
//! are interpolated into generated source and filesystem paths, so they
//! are validated against injection-safe patterns and rejected on
//! violation rather than silently corrected.

use crate::analyzer::types::PropertyMap;
use crate::error::{ConfigError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Replacement value for redacted properties.
pub const REDACTED: &str = "***REDACTED***";

/// Case-insensitive substrings that mark a property key as sensitive.
const SENSITIVE_KEY_PATTERNS: &[&str] = &[
    "password",
    "passwd",
    "secret",
    "credential",
    "token",
    "apikey",
    "api_key",
    "private_key",
    "privatekey",
    "access_key",
    "accesskey",
];

static STACK_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*$").expect("valid stack name pattern"));

static SNS_ARN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^arn:aws:sns:[a-z0-9-]+:\d{12}:[A-Za-z0-9_-]+$").expect("valid ARN pattern")
});

fn is_sensitive_key(key: &str, extra_patterns: &[String]) -> bool {
    let lowered = key.to_lowercase();
    SENSITIVE_KEY_PATTERNS
        .iter()
        .any(|p| lowered.contains(p))
        || extra_patterns.iter().any(|p| lowered.contains(&p.to_lowercase()))
}

/// Return a copy of `properties` with every sensitive value replaced by
/// [`REDACTED`]. Nested objects are sanitized recursively; the input is
/// never mutated.
pub fn sanitize_properties(properties: &PropertyMap, extra_patterns: &[String]) -> PropertyMap {
    let mut sanitized = PropertyMap::new();
    for (key, value) in properties {
        if is_sensitive_key(key, extra_patterns) {
            sanitized.insert(key.clone(), Value::String(REDACTED.to_string()));
        } else if let Value::Object(nested) = value {
            sanitized.insert(
                key.clone(),
                Value::Object(sanitize_properties(nested, extra_patterns)),
            );
        } else {
            sanitized.insert(key.clone(), value.clone());
        }
    }
    sanitized
}

/// Summary of what [`sanitize_properties`] redacted, used only for
/// verbose logging. Must never influence generation output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizationReport {
    pub has_sensitive_data: bool,
    pub redacted_count: usize,
    pub redacted_keys: Vec<String>,
}

/// Compare an original property map with its sanitized form and report
/// which keys were redacted (including nested keys, dot-separated).
pub fn sanitization_report(original: &PropertyMap, sanitized: &PropertyMap) -> SanitizationReport {
    let mut redacted_keys = Vec::new();
    collect_redacted(original, sanitized, "", &mut redacted_keys);
    SanitizationReport {
        has_sensitive_data: !redacted_keys.is_empty(),
        redacted_count: redacted_keys.len(),
        redacted_keys,
    }
}

fn collect_redacted(
    original: &PropertyMap,
    sanitized: &PropertyMap,
    prefix: &str,
    out: &mut Vec<String>,
) {
    for (key, original_value) in original {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match (original_value, sanitized.get(key)) {
            (_, Some(Value::String(s))) if s == REDACTED && original_value.as_str() != Some(REDACTED) => {
                out.push(path);
            }
            (Value::Object(orig_nested), Some(Value::Object(san_nested))) => {
                collect_redacted(orig_nested, san_nested, &path, out);
            }
            _ => {}
        }
    }
}

/// Validate a stack name for use as a TypeScript class name (and file
/// name component). The name is emitted verbatim as the class name, so
/// anything outside `[A-Za-z][A-Za-z0-9]*` would render broken source.
pub fn validate_stack_name(name: &str) -> Result<()> {
    if STACK_NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidStackName {
            value: name.to_string(),
        }
        .into())
    }
}

/// Validate an output directory path against traversal and injection.
pub fn validate_output_dir(dir: &str) -> Result<()> {
    let reject = |reason: &str| {
        Err(ConfigError::InvalidOutputDir {
            value: dir.to_string(),
            reason: reason.to_string(),
        }
        .into())
    };

    if dir.is_empty() {
        return reject("path is empty");
    }
    if dir.contains('\0') {
        return reject("path contains a NUL byte");
    }
    if dir.split(['/', '\\']).any(|segment| segment == "..") {
        return reject("path traversal ('..') is not allowed");
    }
    if dir.chars().any(|c| matches!(c, ';' | '|' | '&' | '$' | '`' | '\n')) {
        return reject("path contains shell metacharacters");
    }
    Ok(())
}

/// Validate an SNS topic ARN against the grammar
/// `arn:aws:sns:<region>:<12-digit-account>:<name>`.
pub fn validate_sns_topic_arn(arn: &str) -> Result<()> {
    if SNS_ARN_PATTERN.is_match(arn) {
        Ok(())
    } else {
        Err(ConfigError::InvalidSnsTopicArn {
            value: arn.to_string(),
        }
        .into())
    }
}
