pub mod types;

pub use types::Config;

use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".alarmgen.toml";

/// Get the global config file path (~/.alarmgen.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (project/.alarmgen.toml)
pub fn local_config_path(project_path: &Path) -> PathBuf {
    project_path.join(CONFIG_FILE_NAME)
}

/// Load configuration from file or use defaults.
/// Checks local config first, then global config.
pub fn load_config(project_path: Option<&Path>) -> Config {
    if let Some(path) = project_path {
        let local = local_config_path(path);
        if local.exists() {
            if let Ok(content) = fs::read_to_string(&local) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
                log::warn!("ignoring malformed config at {}", local.display());
            }
        }
    }

    if let Some(global) = global_config_path() {
        if global.exists() {
            if let Ok(content) = fs::read_to_string(&global) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
                log::warn!("ignoring malformed config at {}", global.display());
            }
        }
    }

    Config::default()
}
