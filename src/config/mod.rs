//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading
//! - Default value handling
//! - Secure credential wrapping via [`SecretString`]
//!
//! The upstream API key is supplied per request by the caller, so the
//! service configuration only carries the listen address and chat-client
//! tuning knobs.
//!
//! # Example
//!
//! ```
//! use socrai::config::{Config, DEFAULT_MODEL};
//!
//! // Create a config directly (use Config::from_env() in production)
//! let config = Config {
//!     bind_addr: "0.0.0.0:8000".to_string(),
//!     api_base_url: "https://api.openai.com/v1".to_string(),
//!     model: DEFAULT_MODEL.to_string(),
//!     log_level: "info".to_string(),
//!     request_timeout_ms: 60_000,
//!     max_retries: 3,
//! };
//! assert_eq!(config.model, "gpt-4o-mini");
//! ```

mod secret;

pub use secret::SecretString;

use crate::error::ConfigError;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Default base URL for the chat-completion API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 60_000;

/// Default maximum retry attempts.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Application configuration.
///
/// Use [`Config::from_env`] to load configuration from environment
/// variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the HTTP server listens on.
    pub bind_addr: String,
    /// Base URL for the chat-completion API.
    pub api_base_url: String,
    /// Chat model to use.
    pub model: String,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: String,
    /// Upstream request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Maximum retry attempts for retryable upstream failures.
    pub max_retries: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables (with defaults):
    /// - `BIND_ADDR`: listen address (default: `0.0.0.0:8000`)
    /// - `CHAT_API_BASE_URL`: chat API base URL (default: `https://api.openai.com/v1`)
    /// - `CHAT_MODEL`: model identifier (default: `gpt-4o-mini`)
    /// - `LOG_LEVEL`: logging level (default: `info`)
    /// - `REQUEST_TIMEOUT_MS`: upstream timeout (default: `60000`)
    /// - `MAX_RETRIES`: retry attempts (default: `3`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a numeric variable is present but not a
    /// valid integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
        let api_base_url =
            std::env::var("CHAT_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.into());
        let model = std::env::var("CHAT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into());

        let request_timeout_ms = parse_env_u64("REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?;
        let max_retries = parse_env_u32("MAX_RETRIES", DEFAULT_MAX_RETRIES)?;

        Ok(Self {
            bind_addr,
            api_base_url,
            model,
            log_level,
            request_timeout_ms,
            max_retries,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Parse an optional u64 environment variable with a default.
fn parse_env_u64(var: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            reason: format!("must be a positive integer, got {value}"),
        }),
        Err(_) => Ok(default),
    }
}

/// Parse an optional u32 environment variable with a default.
fn parse_env_u32(var: &str, default: u32) -> Result<u32, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            reason: format!("must be a positive integer, got {value}"),
        }),
        Err(_) => Ok(default),
    }
}
