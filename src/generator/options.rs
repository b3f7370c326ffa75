//! Generation options supplied by the CLI layer.

use crate::error::{ConfigError, Result};
use crate::generator::security;

/// Default stack class name when the user does not pass one.
pub const DEFAULT_STACK_NAME: &str = "CloudWatchAlarmsStack";

/// Default name for a newly created SNS topic.
pub const DEFAULT_SNS_TOPIC_NAME: &str = "cloudwatch-alarm-notifications";

/// Default display name for a newly created SNS topic.
pub const DEFAULT_SNS_DISPLAY_NAME: &str = "CloudWatch Alarm Notifications";

/// Options controlling a single CDK generation invocation.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// Must be true; generation with a disabled options set is a
    /// configuration error.
    pub enabled: bool,
    pub output_dir: Option<String>,
    pub stack_name: String,
    pub include_low_importance: bool,
    pub resource_type_filters: Option<Vec<String>>,
    pub verbose: bool,
    pub validate_code: bool,
    /// Create a new SNS topic and wire every alarm to it.
    pub enable_sns: bool,
    /// Import an existing SNS topic by ARN instead of creating one.
    pub sns_topic_arn: Option<String>,
    /// Topic name/display name used when `enable_sns` creates a topic.
    pub sns_topic_name: String,
    pub sns_display_name: String,
    /// Additional sensitive-key patterns from configuration.
    pub extra_sensitive_keys: Vec<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: None,
            stack_name: DEFAULT_STACK_NAME.to_string(),
            include_low_importance: false,
            resource_type_filters: None,
            verbose: false,
            validate_code: true,
            enable_sns: false,
            sns_topic_arn: None,
            sns_topic_name: DEFAULT_SNS_TOPIC_NAME.to_string(),
            sns_display_name: DEFAULT_SNS_DISPLAY_NAME.to_string(),
            extra_sensitive_keys: Vec::new(),
        }
    }
}

impl GenerationOptions {
    /// Validate every user-supplied field before any generation work.
    /// Violations are returned as configuration errors echoing the
    /// offending value, never silently corrected.
    pub fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Err(ConfigError::GenerationDisabled.into());
        }

        security::validate_stack_name(&self.stack_name)?;

        if let Some(dir) = &self.output_dir {
            security::validate_output_dir(dir)?;
        }

        if let Some(arn) = &self.sns_topic_arn {
            if self.enable_sns {
                return Err(ConfigError::ConflictingSnsOptions.into());
            }
            security::validate_sns_topic_arn(arn)?;
        }

        Ok(())
    }
}
