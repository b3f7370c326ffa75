//! Structural checks on generated CDK code.
//!
//! The generated file must export a class extending `cdk.Stack` and
//! import the core framework; anything else is unusable output and an
//! error. Style findings (var, loose equality, bare functions) are
//! warnings only.

use crate::generator::validator::patterns;
use crate::generator::validator::ValidationResult;

pub fn check(code: &str, result: &mut ValidationResult) {
    if !patterns::has_exported_class(code) {
        result
            .errors
            .push("generated code does not export a class".to_string());
    }
    if !patterns::extends_stack(code) {
        result
            .errors
            .push("generated class does not extend cdk.Stack".to_string());
    }
    if !patterns::has_core_import(code) {
        result
            .errors
            .push("generated code does not import the aws-cdk-lib core framework".to_string());
    }

    if patterns::uses_var_declarations(code) {
        result
            .warnings
            .push("generated code uses 'var'; prefer 'const' or 'let'".to_string());
    }
    if patterns::uses_loose_equality(code) {
        result
            .warnings
            .push("generated code uses loose equality (==/!=); prefer ===/!==".to_string());
    }
    if patterns::uses_function_declarations(code) {
        result
            .warnings
            .push("generated code uses bare function declarations; prefer arrow functions or methods".to_string());
    }
}
