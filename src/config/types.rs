//! Configuration file schema.

use serde::{Deserialize, Serialize};

/// Top-level configuration, loaded from `.alarmgen.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub security: SecurityConfig,
}

/// Defaults for CDK generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub default_stack_name: String,
    pub sns_topic_name: String,
    pub sns_display_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_stack_name: crate::generator::options::DEFAULT_STACK_NAME.to_string(),
            sns_topic_name: crate::generator::options::DEFAULT_SNS_TOPIC_NAME.to_string(),
            sns_display_name: crate::generator::options::DEFAULT_SNS_DISPLAY_NAME.to_string(),
        }
    }
}

/// Security-related overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Extra case-insensitive substrings that mark property keys as
    /// sensitive, on top of the built-in deny-list.
    pub additional_sensitive_keys: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();
        assert_eq!(config.generator.default_stack_name, "CloudWatchAlarmsStack");
        assert!(config.security.additional_sensitive_keys.is_empty());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
[security]
additional_sensitive_keys = ["license"]
"#,
        )
        .unwrap();
        assert_eq!(config.security.additional_sensitive_keys, vec!["license"]);
        assert_eq!(config.generator.default_stack_name, "CloudWatchAlarmsStack");
    }
}
