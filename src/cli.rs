use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "alarmgen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate CloudWatch alarm recommendations from CloudFormation templates")]
#[command(
    long_about = "Analyzes CloudFormation/SAM templates, recommends CloudWatch alarms per resource, and emits the recommendations as JSON/HTML reports or as generated AWS CDK (TypeScript) stack code."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file directory
    #[arg(short, long, global = true, value_name = "DIR")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Table,
    Json,
    Html,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a template and report recommended alarms
    Analyze {
        /// Path to the CloudFormation/SAM template
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Report format
        #[arg(short, long, value_enum, default_value = "table")]
        format: ReportFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Generate an AWS CDK (TypeScript) stack with recommended alarms
    Generate {
        /// Path to the CloudFormation/SAM template
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Output directory for the generated stack file
        #[arg(short, long, value_name = "OUTPUT_DIR")]
        output: Option<PathBuf>,

        /// Name of the generated stack class
        #[arg(long, value_name = "NAME")]
        stack_name: Option<String>,

        /// Include low-importance metrics in alarm generation
        #[arg(long)]
        include_low_importance: bool,

        /// Only generate alarms for these resource types
        #[arg(long, value_delimiter = ',', value_name = "TYPES")]
        resource_types: Option<Vec<String>>,

        /// Create an SNS topic and wire every alarm to it
        #[arg(long)]
        enable_sns: bool,

        /// Wire alarms to an existing SNS topic by ARN
        #[arg(long, value_name = "ARN", conflicts_with = "enable_sns")]
        sns_topic_arn: Option<String>,

        /// Skip post-generation validation of the generated code
        #[arg(long)]
        no_validate: bool,

        /// Also run the TypeScript compiler as a syntax check
        #[arg(long)]
        compile_check: bool,

        /// Print the generated stack instead of writing a file
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate an existing generated stack file against best practices
    Validate {
        /// Path to the generated TypeScript stack file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Skip the AWS limits check
        #[arg(long)]
        no_aws_limits: bool,

        /// Skip the best-practices check
        #[arg(long)]
        no_best_practices: bool,

        /// Also run the TypeScript compiler as a syntax check
        #[arg(long)]
        compile_check: bool,
    },

    /// Show supported resource types and their recommended metrics
    Support {
        /// Show every metric with thresholds
        #[arg(short, long)]
        detailed: bool,
    },
}

impl Cli {
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
