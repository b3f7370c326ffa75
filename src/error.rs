//! Error types for the alarm generator.
//!
//! The taxonomy follows the pipeline stages: configuration errors are
//! rejected before any work starts, analysis errors come from template
//! parsing, and generation errors cover everything from stack-data
//! building through rendering and post-generation validation.

use thiserror::Error;

/// Convenience result type used throughout the crate.
pub type Result<T> = std::result::Result<T, AlarmGenError>;

/// Top-level error type for all alarm generator operations.
#[derive(Debug, Error)]
pub enum AlarmGenError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Input/configuration errors. These are fatal and reported before any
/// generation work begins; the offending value is echoed back.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CDK generation is not enabled (set generation options with enabled: true)")]
    GenerationDisabled,

    #[error("invalid stack name '{value}': must start with a letter and contain only letters and digits")]
    InvalidStackName { value: String },

    #[error("invalid output directory '{value}': {reason}")]
    InvalidOutputDir { value: String, reason: String },

    #[error("invalid SNS topic ARN '{value}': expected arn:aws:sns:<region>:<12-digit-account>:<topic-name>")]
    InvalidSnsTopicArn { value: String },

    #[error("conflicting SNS options: both enableSNS and snsTopicArn were supplied; pass the ARN to reuse a topic or enableSNS to create one, not both")]
    ConflictingSnsOptions,
}

/// Errors from CloudFormation/SAM template analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("template file not found: {path}")]
    TemplateNotFound { path: String },

    #[error("failed to parse template {path}: {message}")]
    TemplateParsing { path: String, message: String },

    #[error("template {path} has no Resources section")]
    MissingResources { path: String },
}

/// Errors raised while building stack data, rendering, or validating
/// generated code.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("analysis result is not usable: {0}")]
    InvalidAnalysis(String),

    #[error("stack rendering failed after {elapsed_ms}ms: {message}")]
    Rendering { elapsed_ms: u128, message: String },

    #[error("generated code failed validation with {error_count} error(s); first: {first_error}")]
    ValidationFailed {
        error_count: usize,
        first_error: String,
    },
}
