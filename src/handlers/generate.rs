use crate::analyzer::analyze_template;
use crate::config::Config;
use crate::generator::{self, GenerationOptions};
use colored::Colorize;
use log::warn;
use std::path::PathBuf;

#[allow(clippy::too_many_arguments)]
pub fn handle_generate(
    template: PathBuf,
    output: Option<PathBuf>,
    stack_name: Option<String>,
    include_low_importance: bool,
    resource_types: Option<Vec<String>>,
    enable_sns: bool,
    sns_topic_arn: Option<String>,
    no_validate: bool,
    compile_check: bool,
    dry_run: bool,
    verbose: bool,
    config: &Config,
) -> crate::Result<()> {
    println!("🔍 Analyzing template: {}", template.display());
    let analysis = analyze_template(&template)?;

    println!(
        "✅ Analysis complete: {} supported resource(s). Generating CDK stack...",
        analysis.metadata.supported_resources
    );

    let options = GenerationOptions {
        enabled: true,
        output_dir: output.as_ref().map(|p| p.display().to_string()),
        stack_name: stack_name.unwrap_or_else(|| config.generator.default_stack_name.clone()),
        include_low_importance,
        resource_type_filters: resource_types,
        verbose,
        validate_code: !no_validate,
        enable_sns,
        sns_topic_arn,
        sns_topic_name: config.generator.sns_topic_name.clone(),
        sns_display_name: config.generator.sns_display_name.clone(),
        extra_sensitive_keys: config.security.additional_sensitive_keys.clone(),
    };

    let result = generator::generate_cdk_stack(&analysis, &options)?;

    if compile_check {
        run_compile_check(&result.code);
    }

    if let Some(validation) = &result.validation {
        print_validation_summary(validation);
    }

    if dry_run {
        println!("--- {}.ts (dry run) ---", options.stack_name);
        println!("{}", result.code);
    } else {
        let dir = output.unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.ts", options.stack_name));
        std::fs::write(&path, &result.code)?;
        restrict_permissions(&path);
        println!(
            "🎉 Generated {} with {} alarm(s){}",
            path.display().to_string().bold(),
            result.alarm_count,
            if result.sns_configured {
                " and SNS notifications"
            } else {
                ""
            }
        );
    }

    Ok(())
}

/// Best-effort owner-only permissions on the generated file. Failure is
/// a warning, not a fatal error (unsupported on some hosts).
fn restrict_permissions(path: &std::path::Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)) {
            warn!(
                "could not restrict permissions on {}: {}",
                path.display(),
                e
            );
        }
    }
    #[cfg(not(unix))]
    {
        let _ = path;
        warn!("restrictive file permissions are not supported on this platform");
    }
}

fn run_compile_check(code: &str) {
    use crate::generator::validator::{CompileChecker, CompileOutcome, TscCompileChecker};

    println!("🧪 Running TypeScript compile check...");
    match TscCompileChecker::default().check(code) {
        CompileOutcome::Passed => println!("✅ Compile check passed"),
        CompileOutcome::MissingDependencies { .. } => {
            println!("✅ Compile check passed (CDK dependencies not installed; type check skipped)")
        }
        CompileOutcome::Failed { output } => {
            println!("⚠️  Compiler reported problems:\n{}", output.trim())
        }
        CompileOutcome::TimedOut { seconds } => {
            println!("⚠️  Compile check timed out after {}s", seconds)
        }
        CompileOutcome::Skipped { reason } => println!("ℹ️  Compile check skipped: {}", reason),
    }
}

pub(crate) fn print_validation_summary(validation: &crate::generator::ValidationResult) {
    let status = if validation.is_valid {
        "passed".green()
    } else {
        "failed".red()
    };
    println!(
        "🔎 Validation {}: {} error(s), {} warning(s), {} suggestion(s)",
        status,
        validation.errors.len(),
        validation.warnings.len(),
        validation.suggestions.len()
    );
    for error in &validation.errors {
        println!("   {} {}", "error:".red(), error);
    }
    for warning in &validation.warnings {
        println!("   {} {}", "warning:".yellow(), warning);
    }
    for suggestion in &validation.suggestions {
        println!("   {} {}", "suggestion:".dimmed(), suggestion);
    }
}
