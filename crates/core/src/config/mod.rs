//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (STANZA_*)
//! 2. TOML config file (if STANZA_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (STANZA_*)
/// 2. TOML config file (if STANZA_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Flat text file of poem URLs, one per line.
    ///
    /// Set via STANZA_CATALOG_PATH environment variable.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// JSON file holding the indices not yet answered correctly.
    ///
    /// Set via STANZA_STATE_PATH environment variable.
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,

    /// Address the quiz server binds to.
    ///
    /// Set via STANZA_LISTEN_ADDR environment variable.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via STANZA_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum bytes to fetch per page.
    ///
    /// Set via STANZA_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via STANZA_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Number of lines shown as the quiz prompt.
    ///
    /// Set via STANZA_EXCERPT_LINES environment variable.
    #[serde(default = "default_excerpt_lines")]
    pub excerpt_lines: usize,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("./poems.txt")
}

fn default_state_path() -> PathBuf {
    PathBuf::from("./wrong.json")
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".into()
}

fn default_user_agent() -> String {
    "stanza/0.1".into()
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_excerpt_lines() -> usize {
    5
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            state_path: default_state_path(),
            listen_addr: default_listen_addr(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
            excerpt_lines: default_excerpt_lines(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `STANZA_`
    /// 2. TOML file from `STANZA_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("STANZA_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        Self::from_figment(figment.merge(Env::prefixed("STANZA_").map(|key| key.as_str().to_lowercase().into())))
    }

    fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.catalog_path, PathBuf::from("./poems.txt"));
        assert_eq!(config.state_path, PathBuf::from("./wrong.json"));
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.user_agent, "stanza/0.1");
        assert_eq!(config.max_bytes, 5_242_880);
        assert_eq!(config.timeout_ms, 20_000);
        assert_eq!(config.excerpt_lines, 5);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(20_000));
    }

    #[test]
    fn test_toml_layer_overrides_defaults() {
        let toml = r#"
            catalog_path = "/srv/stanza/poems.txt"
            excerpt_lines = 8
        "#;
        let figment = Figment::from(Serialized::defaults(AppConfig::default())).merge(Toml::string(toml));
        let config = AppConfig::from_figment(figment).unwrap();

        assert_eq!(config.catalog_path, PathBuf::from("/srv/stanza/poems.txt"));
        assert_eq!(config.excerpt_lines, 8);
        assert_eq!(config.state_path, PathBuf::from("./wrong.json"));
    }

    #[test]
    fn test_invalid_layer_fails_validation() {
        let figment = Figment::from(Serialized::defaults(AppConfig::default())).merge(Toml::string("excerpt_lines = 0"));
        let result = AppConfig::from_figment(figment);
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "excerpt_lines"));
    }
}
