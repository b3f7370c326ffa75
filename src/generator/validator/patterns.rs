//! Pattern library for the post-generation validator.
//!
//! Validation is regex-over-text, not AST parsing. Every pattern the
//! validator relies on lives here, behind small matcher functions, so a
//! real TypeScript parser could replace them later without touching the
//! check modules.

use once_cell::sync::Lazy;
use regex::Regex;

static ALARM_CONSTRUCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"new\s+cloudwatch\.Alarm\s*\(\s*this\s*,\s*'([^']*)'").expect("alarm pattern")
});

static SNS_TOPIC_CONSTRUCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"new\s+sns\.Topic\s*\(").expect("sns topic pattern"));

static GENERIC_CONSTRUCT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"new\s+[A-Za-z_][A-Za-z0-9_]*\.[A-Za-z_][A-Za-z0-9_]*\s*\(")
        .expect("construct pattern")
});

static EXPORTED_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"export\s+class\s+[A-Za-z_][A-Za-z0-9_]*").expect("class pattern"));

static EXTENDS_STACK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"extends\s+cdk\.Stack").expect("extends pattern"));

static CORE_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"import\s+\*\s+as\s+cdk\s+from\s+'aws-cdk-lib'").expect("core import pattern")
});

static NAMESPACE_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"import\s+\*\s+as\s+([A-Za-z_][A-Za-z0-9_]*)\s+from\s+'([^']+)'")
        .expect("namespace import pattern")
});

static VAR_DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bvar\s+[A-Za-z_$]").expect("var pattern"));

static LOOSE_EQUALITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^=!<>])==[^=]").expect("loose equality pattern"));

static LOOSE_INEQUALITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^!])!=[^=]").expect("loose inequality pattern"));

static FUNCTION_DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bfunction\s+[A-Za-z_$][A-Za-z0-9_$]*\s*\(").expect("function pattern"));

static ALARM_ID_CONVENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*Alarm$").expect("alarm id convention pattern"));

static HARDCODED_DEFAULT_CLUSTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"ClusterName:\s*'default'").expect("default cluster pattern"));

static MISSING_MODULE_OUTPUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Cannot find module|TS2307").expect("missing module pattern"));

/// Extract every alarm construct ID, in order of appearance.
pub fn alarm_construct_ids(code: &str) -> Vec<String> {
    ALARM_CONSTRUCTION
        .captures_iter(code)
        .map(|c| c[1].to_string())
        .collect()
}

/// Count `new cloudwatch.Alarm(...)` constructions.
pub fn count_alarm_constructions(code: &str) -> usize {
    ALARM_CONSTRUCTION.find_iter(code).count()
}

/// Count `new sns.Topic(...)` constructions.
pub fn count_sns_topic_constructions(code: &str) -> usize {
    SNS_TOPIC_CONSTRUCTION.find_iter(code).count()
}

/// Count all `new <ns>.<Type>(...)` construct instantiations.
pub fn count_generic_constructs(code: &str) -> usize {
    GENERIC_CONSTRUCT.find_iter(code).count()
}

pub fn has_exported_class(code: &str) -> bool {
    EXPORTED_CLASS.is_match(code)
}

pub fn extends_stack(code: &str) -> bool {
    EXTENDS_STACK.is_match(code)
}

pub fn has_core_import(code: &str) -> bool {
    CORE_IMPORT.is_match(code)
}

/// All `import * as <alias> from '<module>'` statements as
/// `(alias, module)` pairs.
pub fn namespace_imports(code: &str) -> Vec<(String, String)> {
    NAMESPACE_IMPORT
        .captures_iter(code)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect()
}

pub fn uses_var_declarations(code: &str) -> bool {
    VAR_DECLARATION.is_match(code)
}

pub fn uses_loose_equality(code: &str) -> bool {
    LOOSE_EQUALITY.is_match(code) || LOOSE_INEQUALITY.is_match(code)
}

pub fn uses_function_declarations(code: &str) -> bool {
    FUNCTION_DECLARATION.is_match(code)
}

/// Whether a construct ID follows the `UpperCamelCase...Alarm` convention.
pub fn follows_alarm_id_convention(id: &str) -> bool {
    ALARM_ID_CONVENTION.is_match(id)
}

pub fn has_hardcoded_default_cluster(code: &str) -> bool {
    HARDCODED_DEFAULT_CLUSTER.is_match(code)
}

/// Whether compiler output indicates only missing modules (expected when
/// the CDK libraries are not installed in the sandbox).
pub fn indicates_missing_module(compiler_output: &str) -> bool {
    MISSING_MODULE_OUTPUT.is_match(compiler_output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
import * as cdk from 'aws-cdk-lib';
import * as cloudwatch from 'aws-cdk-lib/aws-cloudwatch';
import * as sns from 'aws-cdk-lib/aws-sns';

export class DemoStack extends cdk.Stack {
  constructor() {
    const topic = new sns.Topic(this, 'Topic', {});
    const a = new cloudwatch.Alarm(this, 'DbCPUWarningAlarm', {});
    const b = new cloudwatch.Alarm(this, 'DbCPUCriticalAlarm', {});
  }
}
"#;

    #[test]
    fn extracts_alarm_ids_in_order() {
        assert_eq!(
            alarm_construct_ids(SAMPLE),
            vec!["DbCPUWarningAlarm", "DbCPUCriticalAlarm"]
        );
        assert_eq!(count_alarm_constructions(SAMPLE), 2);
    }

    #[test]
    fn counts_constructions() {
        assert_eq!(count_sns_topic_constructions(SAMPLE), 1);
        // sns.Topic + 2 alarms
        assert_eq!(count_generic_constructs(SAMPLE), 3);
    }

    #[test]
    fn structural_patterns_match_sample() {
        assert!(has_exported_class(SAMPLE));
        assert!(extends_stack(SAMPLE));
        assert!(has_core_import(SAMPLE));
    }

    #[test]
    fn extracts_namespace_imports() {
        let imports = namespace_imports(SAMPLE);
        assert_eq!(imports.len(), 3);
        assert_eq!(imports[0], ("cdk".to_string(), "aws-cdk-lib".to_string()));
    }

    #[test]
    fn style_patterns() {
        assert!(uses_var_declarations("var x = 1;"));
        assert!(!uses_var_declarations("const variance = 1;"));
        assert!(uses_loose_equality("if (a == b) {}"));
        assert!(uses_loose_equality("if (a != b) {}"));
        // operator at the very start of the text must still match
        assert!(uses_loose_equality("== b"));
        assert!(uses_loose_equality("!= b"));
        assert!(!uses_loose_equality("=== b"));
        assert!(!uses_loose_equality("!== b"));
        assert!(!uses_loose_equality("if (a === b && a !== c) {}"));
        assert!(uses_function_declarations("function helper() {}"));
        assert!(!uses_function_declarations("const f = () => {};"));
    }

    #[test]
    fn alarm_id_convention() {
        assert!(follows_alarm_id_convention("DbCPUWarningAlarm"));
        assert!(!follows_alarm_id_convention("dbCPUWarningAlarm"));
        assert!(!follows_alarm_id_convention("Db_CPU_WarningAlarm"));
        assert!(!follows_alarm_id_convention("DbCPUWarning"));
    }

    #[test]
    fn missing_module_detection() {
        assert!(indicates_missing_module("error TS2307: Cannot find module 'aws-cdk-lib'"));
        assert!(!indicates_missing_module("error TS1005: ';' expected"));
    }

    #[test]
    fn hardcoded_cluster_detection() {
        assert!(has_hardcoded_default_cluster("ClusterName: 'default',"));
        assert!(!has_hardcoded_default_cluster("ClusterName: clusterParam,"));
    }
}
