//! Configuration for the Parlance server.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::translation::DEFAULT_PROVIDER_URL;

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default timeout for provider calls, in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid or unsupported values.
    #[error("invalid configuration: {0}")]
    Invalid(String),
    /// URL parse error.
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}

/// Convenience result alias for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen port.
    pub port: u16,
    /// Base URL of the translation provider.
    pub translation_url: String,
    /// CORS origins; `None` allows any origin.
    pub allowed_origins: Option<Vec<String>>,
    /// Timeout for provider calls, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            translation_url: DEFAULT_PROVIDER_URL.to_string(),
            allowed_origins: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    ///
    /// # Errors
    /// Returns an error if a variable is malformed or validation fails.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults.
    ///
    /// Recognized keys: `PARLANCE_PORT` (or `PORT`), `LIBRETRANSLATE_URL`,
    /// `ALLOWED_ORIGINS`, `PARLANCE_REQUEST_TIMEOUT_SECS`.
    ///
    /// # Errors
    /// Returns an error if a variable is malformed or validation fails.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup("PARLANCE_PORT").or_else(|| lookup("PORT")) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("port must be a number, got `{port}`")))?;
        }

        if let Some(url) = lookup("LIBRETRANSLATE_URL") {
            config.translation_url = url;
        }

        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            config.allowed_origins = parse_origins(&origins);
        }

        if let Some(timeout) = lookup("PARLANCE_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = timeout.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("request timeout must be a number, got `{timeout}`"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range or invalid.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be > 0".to_string(),
            ));
        }

        Url::parse(&self.translation_url)?;

        Ok(())
    }

    /// Provider call timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Split a comma-separated origin list; empty or `*` means any origin.
fn parse_origins(raw: &str) -> Option<Vec<String>> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect();

    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        None
    } else {
        Some(origins)
    }
}
