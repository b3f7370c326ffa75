//! Post-generation validation of the rendered TypeScript source.
//!
//! Four independent checks (structural, AWS limits, best practices,
//! optional compile check) aggregate findings into one
//! [`ValidationResult`]. A failure in one check never prevents the
//! others from running; only an unexpected panic aborts validation,
//! and that is reported as a single error with `is_valid = false`.

pub mod best_practices;
pub mod compile;
pub mod limits;
pub mod patterns;
pub mod structural;

pub use compile::{CompileChecker, CompileOutcome, TscCompileChecker};

use log::{debug, info};
use std::panic::AssertUnwindSafe;

/// Size/shape metrics gathered while validating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationMetrics {
    pub code_length: usize,
    pub alarm_count: usize,
    pub import_count: usize,
}

/// Aggregated validation findings. `is_valid` is true iff no check
/// produced an error.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
    pub metrics: ValidationMetrics,
}

impl ValidationResult {
    fn finalize(mut self) -> Self {
        self.is_valid = self.errors.is_empty();
        self
    }
}

/// Which checks to run.
#[derive(Debug, Clone)]
pub struct ValidatorOptions {
    /// Shell out to the TypeScript compiler for a syntax check.
    pub compile_check: bool,
    pub best_practices_check: bool,
    pub aws_limits_check: bool,
    pub verbose: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            compile_check: false,
            best_practices_check: true,
            aws_limits_check: true,
            verbose: false,
        }
    }
}

/// Validate generated code with the default TypeScript compile checker.
pub fn validate_generated_code(code: &str, options: &ValidatorOptions) -> ValidationResult {
    validate_with_checker(code, options, &TscCompileChecker::default())
}

/// Validate generated code with an explicit compile checker (tests stub
/// this to avoid spawning processes).
pub fn validate_with_checker(
    code: &str,
    options: &ValidatorOptions,
    checker: &dyn CompileChecker,
) -> ValidationResult {
    let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| run_checks(code, options, checker)));
    match outcome {
        Ok(result) => result.finalize(),
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            ValidationResult {
                is_valid: false,
                errors: vec![format!("Validation process failed: {}", message)],
                ..Default::default()
            }
        }
    }
}

fn run_checks(
    code: &str,
    options: &ValidatorOptions,
    checker: &dyn CompileChecker,
) -> ValidationResult {
    let mut result = ValidationResult::default();
    result.metrics.code_length = code.len();

    structural::check(code, &mut result);

    if options.aws_limits_check {
        limits::check(code, &mut result);
    }

    if options.best_practices_check {
        best_practices::check(code, &mut result);
    }

    if options.compile_check {
        apply_compile_outcome(checker.check(code), &mut result);
    }

    if options.verbose {
        info!(
            "validation: {} error(s), {} warning(s), {} suggestion(s), {} alarm(s)",
            result.errors.len(),
            result.warnings.len(),
            result.suggestions.len(),
            result.metrics.alarm_count
        );
    } else {
        debug!(
            "validation finished with {} error(s)",
            result.errors.len()
        );
    }

    result
}

/// Compile-check findings are never hard errors: the CDK libraries are
/// usually absent from the sandbox the tool runs in.
fn apply_compile_outcome(outcome: CompileOutcome, result: &mut ValidationResult) {
    match outcome {
        CompileOutcome::Passed => {}
        CompileOutcome::MissingDependencies { .. } => {
            result.suggestions.push(
                "compile check passed syntactically; full type checking was skipped because CDK dependencies are not installed".to_string(),
            );
        }
        CompileOutcome::Failed { output } => {
            result
                .warnings
                .push(format!("TypeScript compiler reported problems: {}", output.trim()));
        }
        CompileOutcome::TimedOut { seconds } => {
            result
                .warnings
                .push(format!("compile check timed out after {}s and was killed", seconds));
        }
        CompileOutcome::Skipped { reason } => {
            result
                .suggestions
                .push(format!("compile check skipped: {}", reason));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubChecker(CompileOutcome);

    impl CompileChecker for StubChecker {
        fn check(&self, _code: &str) -> CompileOutcome {
            self.0.clone()
        }
    }

    const VALID_STACK: &str = r#"
import * as cdk from 'aws-cdk-lib';
import * as cloudwatch from 'aws-cdk-lib/aws-cloudwatch';

export class DemoAlarmsStack extends cdk.Stack {
  constructor() {
    const dbAlarm = new cloudwatch.Alarm(this, 'DbCpuWarningAlarm', {});
  }
}
"#;

    fn options_with_compile() -> ValidatorOptions {
        ValidatorOptions {
            compile_check: true,
            ..Default::default()
        }
    }

    #[test]
    fn valid_stack_passes_all_checks() {
        let result = validate_generated_code(VALID_STACK, &ValidatorOptions::default());
        assert!(result.is_valid, "errors: {:?}", result.errors);
        assert_eq!(result.metrics.alarm_count, 1);
        assert_eq!(result.metrics.import_count, 2);
        assert_eq!(result.metrics.code_length, VALID_STACK.len());
    }

    #[test]
    fn errors_from_multiple_checks_aggregate() {
        // not exported, no Stack base, no import, duplicate IDs
        let code = "
class X {
  constructor() {
    new cloudwatch.Alarm(this, 'SameName', {});
    new cloudwatch.Alarm(this, 'SameName', {});
  }
}
";
        let result = validate_generated_code(code, &ValidatorOptions::default());
        assert!(!result.is_valid);
        assert!(result.errors.len() >= 4);
        assert!(result.errors.iter().any(|e| e.contains("Duplicate construct IDs")));
    }

    #[test]
    fn disabled_checks_do_not_run() {
        let code = "
import * as cdk from 'aws-cdk-lib';
import * as unused from 'aws-cdk-lib/aws-sns';
export class X extends cdk.Stack {}
";
        let options = ValidatorOptions {
            best_practices_check: false,
            ..Default::default()
        };
        let result = validate_generated_code(code, &options);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn compile_pass_adds_nothing() {
        let result =
            validate_with_checker(VALID_STACK, &options_with_compile(), &StubChecker(CompileOutcome::Passed));
        assert!(result.is_valid);
        assert!(result.warnings.is_empty());
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn missing_dependencies_is_success_with_suggestion() {
        let result = validate_with_checker(
            VALID_STACK,
            &options_with_compile(),
            &StubChecker(CompileOutcome::MissingDependencies {
                detail: "TS2307".to_string(),
            }),
        );
        assert!(result.is_valid);
        assert!(result.suggestions.iter().any(|s| s.contains("not installed")));
    }

    #[test]
    fn compiler_failure_is_a_warning_never_an_error() {
        let result = validate_with_checker(
            VALID_STACK,
            &options_with_compile(),
            &StubChecker(CompileOutcome::Failed {
                output: "error TS1005: ';' expected".to_string(),
            }),
        );
        assert!(result.is_valid);
        assert!(result.warnings.iter().any(|w| w.contains("TS1005")));
    }

    #[test]
    fn timeout_is_reported_as_warning() {
        let result = validate_with_checker(
            VALID_STACK,
            &options_with_compile(),
            &StubChecker(CompileOutcome::TimedOut { seconds: 10 }),
        );
        assert!(result.is_valid);
        assert!(result.warnings.iter().any(|w| w.contains("timed out after 10s")));
    }

    #[test]
    fn quota_error_mentions_the_limit() {
        let mut code = String::from("import * as cdk from 'aws-cdk-lib';\nexport class X extends cdk.Stack {}\ncloudwatch.y;\n");
        for i in 0..5001 {
            code.push_str(&format!("new cloudwatch.Alarm(this, 'A{}Alarm', {{}});\n", i));
        }
        let result = validate_generated_code(&code, &ValidatorOptions::default());
        assert!(!result.is_valid);
        assert!(result
            .errors
            .iter()
            .any(|e| e.contains("exceeds AWS CloudWatch limit of 5000")));
    }
}
