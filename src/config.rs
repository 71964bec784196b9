//! Configuration loading
//!
//! Reads `config.toml` from the platform config directory (or an explicit
//! path). A missing file yields defaults; a malformed file yields defaults
//! plus a warning for the status line.

mod types;

use std::path::{Path, PathBuf};

pub use types::{
    AiConfig, AiProviderType, AnthropicConfig, Config, DEFAULT_REFRESH_THRESHOLD,
    DEFAULT_REQUEST_TIMEOUT_SECS, PlaceholderConfig, SuggestionsConfig,
};

use crate::error::DraftError;

/// Environment variable consulted when no API key is configured
pub const ANTHROPIC_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Result of loading the configuration
#[derive(Debug)]
pub struct ConfigResult {
    pub config: Config,
    /// Non-fatal problem to show to the user (e.g. parse error)
    pub warning: Option<String>,
}

/// Default config file location: `<config_dir>/postdraft/config.toml`
pub fn default_config_path() -> Result<PathBuf, DraftError> {
    dirs::config_dir()
        .map(|dir| dir.join("postdraft").join("config.toml"))
        .ok_or(DraftError::NoConfigDir)
}

/// Load configuration, falling back to defaults on any problem
pub fn load_config(explicit_path: Option<&Path>) -> ConfigResult {
    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Ok(path) => path,
            Err(e) => {
                log::debug!("{}", e);
                return ConfigResult {
                    config: with_env_overrides(Config::default()),
                    warning: None,
                };
            }
        },
    };

    match load_config_from_path(&path) {
        Ok(config) => ConfigResult {
            config: with_env_overrides(config),
            warning: None,
        },
        Err(e) => {
            log::warn!("{}", e);
            ConfigResult {
                config: with_env_overrides(Config::default()),
                warning: Some(e.to_string()),
            }
        }
    }
}

/// Parse the config file at `path`
///
/// A file that does not exist is not an error and yields the defaults.
pub fn load_config_from_path(path: &Path) -> Result<Config, DraftError> {
    if !path.exists() {
        log::debug!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| DraftError::InvalidConfig {
        path: path.display().to_string(),
        message: e.message().to_string(),
    })
}

/// Fill the Anthropic API key from the environment when the file has none
fn with_env_overrides(mut config: Config) -> Config {
    let missing = config
        .ai
        .anthropic
        .api_key
        .as_ref()
        .is_none_or(|k| k.trim().is_empty());
    if missing && let Ok(key) = std::env::var(ANTHROPIC_API_KEY_ENV) {
        config.ai.anthropic.api_key = Some(key);
    }
    config
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
