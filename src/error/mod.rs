//! Error types for the tutoring service.
//!
//! This module defines a small hierarchical error system:
//! - [`ServiceError`]: request-scoped errors surfaced over HTTP
//! - [`ModelError`]: chat-completion API specific errors
//! - [`ConfigError`]: configuration errors
//!
//! All errors implement `Send + Sync` for async compatibility. Nothing here
//! is fatal to the process; every failure is scoped to a single request.

use thiserror::Error;

/// Request-scoped service error.
///
/// This is the error type returned by the dialogue engine and mapped to an
/// HTTP status at the server boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// No credential was supplied on an endpoint that requires one.
    #[error("Missing credential: Authorization header with token required")]
    MissingCredential,

    /// The primary chat-completion call failed.
    #[error("Chat API error: {0}")]
    Model(#[from] ModelError),
}

/// Chat-completion API errors.
///
/// These errors represent failures when communicating with the upstream
/// OpenAI-compatible API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Authentication failed due to an invalid API key.
    #[error("Authentication failed: invalid API key")]
    AuthenticationFailed,

    /// Request was rate limited.
    #[error("Rate limited: retry after {retry_after_seconds}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_seconds: u64,
    },

    /// The upstream service is overloaded.
    #[error("Service overloaded: {model}")]
    Overloaded {
        /// The model that is overloaded.
        model: String,
    },

    /// Request timed out.
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// Invalid request parameters.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of what's invalid.
        message: String,
    },

    /// Network communication error.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error.
        message: String,
    },

    /// Unexpected response from the API.
    #[error("Unexpected response: {message}")]
    UnexpectedResponse {
        /// Description of what was unexpected.
        message: String,
    },
}

impl ModelError {
    /// Returns true if this error is retryable.
    ///
    /// Rate limiting, overload, timeout, and network errors are retryable.
    /// Authentication and invalid request errors are not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. }
                | Self::Overloaded { .. }
                | Self::Timeout { .. }
                | Self::Network { .. }
        )
    }
}

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required configuration is missing.
    #[error("Missing required: {var}")]
    MissingRequired {
        /// The missing variable name.
        var: String,
    },

    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}
