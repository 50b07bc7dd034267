//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use std::net::SocketAddr;

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

/// Largest poem page the fetcher may be told to accept.
const MAX_PAGE_BYTES: usize = 50 * 1024 * 1024;
const MIN_TIMEOUT_MS: u64 = 100;
const MAX_TIMEOUT_MS: u64 = 300_000;

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field: field.to_string(), reason: reason.into() }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `catalog_path` or `state_path` is empty
    /// - `listen_addr` is not a socket address
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is blank
    /// - `excerpt_lines` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog_path.as_os_str().is_empty() {
            return Err(invalid("catalog_path", "a poem list file is required"));
        }
        if self.state_path.as_os_str().is_empty() {
            return Err(invalid("state_path", "a file for unanswered poems is required"));
        }

        if let Err(e) = self.listen_addr.parse::<SocketAddr>() {
            return Err(invalid("listen_addr", format!("expected host:port, {e}")));
        }

        if !(1..=MAX_PAGE_BYTES).contains(&self.max_bytes) {
            return Err(invalid("max_bytes", format!("a poem page must be allowed 1..={MAX_PAGE_BYTES} bytes")));
        }

        if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(invalid(
                "timeout_ms",
                format!("page fetch timeout must be {MIN_TIMEOUT_MS}..={MAX_TIMEOUT_MS}ms"),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(invalid("user_agent", "poem sites need a User-Agent to identify the quiz"));
        }

        if self.excerpt_lines == 0 {
            return Err(invalid("excerpt_lines", "an excerpt needs at least one line"));
        }

        Ok(())
    }
}
