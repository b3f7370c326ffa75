//! # CloudFormation Alarm Generator
//!
//! A Rust-based command-line application that analyzes CloudFormation/SAM
//! templates, recommends CloudWatch alarms per resource, and emits the
//! recommendations as JSON/HTML reports or as generated AWS CDK
//! (TypeScript) stack code.
//!
//! ## Features
//!
//! - **Template Analysis**: Parses CloudFormation/SAM templates (YAML or JSON)
//! - **Alarm Recommendations**: Fixed per-resource-type metric registry with
//!   warning/critical threshold pairs
//! - **CDK Code Generation**: Renders a complete TypeScript stack class wiring
//!   alarms to metrics, optionally with SNS notification plumbing
//! - **Static Validation**: Structural, AWS-quota, best-practice, and optional
//!   compile checks over the generated code
//! - **Security-First**: Sensitive resource properties are redacted before they
//!   can reach generated code or logs
//!
//! ## Example
//!
//! ```rust,no_run
//! use cfn_alarmgen::{analyzer::analyze_template, generator};
//! use std::path::Path;
//!
//! # fn main() -> cfn_alarmgen::Result<()> {
//! let analysis = analyze_template(Path::new("./template.yaml"))?;
//! let output = generator::generate_cdk_stack(&analysis, &Default::default())?;
//! println!("{}", output.code);
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod handlers;
pub mod reports;

// Re-export commonly used types and functions
pub use analyzer::{analyze_template, ExtendedAnalysisResult};
pub use error::{AlarmGenError, Result};
pub use generator::{generate_cdk_stack, GenerationOptions};
pub use handlers::*;
use cli::Commands;
use config::Config;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run_command(command: Commands, config: &Config, verbose: bool) -> Result<()> {
    match command {
        Commands::Analyze {
            template,
            format,
            output,
        } => handlers::handle_analyze(template, format, output),
        Commands::Generate {
            template,
            output,
            stack_name,
            include_low_importance,
            resource_types,
            enable_sns,
            sns_topic_arn,
            no_validate,
            compile_check,
            dry_run,
        } => handlers::handle_generate(
            template,
            output,
            stack_name,
            include_low_importance,
            resource_types,
            enable_sns,
            sns_topic_arn,
            no_validate,
            compile_check,
            dry_run,
            verbose,
            config,
        ),
        Commands::Validate {
            file,
            no_aws_limits,
            no_best_practices,
            compile_check,
        } => handlers::handle_validate(file, no_aws_limits, no_best_practices, compile_check, verbose),
        Commands::Support { detailed } => handlers::handle_support(detailed),
    }
}
