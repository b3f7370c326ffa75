//! Best-practice checks on generated code: construct ID uniqueness and
//! naming, unused imports, and hardcoded values worth parameterizing.

use crate::generator::validator::patterns;
use crate::generator::validator::ValidationResult;
use std::collections::BTreeMap;

pub fn check(code: &str, result: &mut ValidationResult) {
    check_construct_ids(code, result);
    check_unused_imports(code, result);

    if patterns::has_hardcoded_default_cluster(code) {
        result.suggestions.push(
            "ECS alarms use the hardcoded cluster name 'default'; consider parameterizing the cluster name".to_string(),
        );
    }
}

fn check_construct_ids(code: &str, result: &mut ValidationResult) {
    let ids = patterns::alarm_construct_ids(code);

    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for id in &ids {
        *seen.entry(id.as_str()).or_insert(0) += 1;
    }

    let duplicates: Vec<&str> = seen
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(id, _)| *id)
        .collect();
    if !duplicates.is_empty() {
        result.errors.push(format!(
            "Duplicate construct IDs found: {}",
            duplicates.join(", ")
        ));
    }

    for id in seen.keys() {
        if !patterns::follows_alarm_id_convention(id) {
            result.warnings.push(format!(
                "construct ID '{}' does not follow the UpperCamelCase...Alarm naming convention",
                id
            ));
        }
    }
}

fn check_unused_imports(code: &str, result: &mut ValidationResult) {
    let imports = patterns::namespace_imports(code);
    result.metrics.import_count = imports.len();

    for (alias, module) in imports {
        let usage = format!("{}.", alias);
        let used_outside_imports = code
            .lines()
            .filter(|line| !line.trim_start().starts_with("import "))
            .any(|line| line.contains(&usage));
        if !used_outside_imports {
            result.warnings.push(format!(
                "module '{}' is imported as '{}' but never used",
                module, alias
            ));
        }
    }
}
