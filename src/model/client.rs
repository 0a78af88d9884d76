//! Chat-completion API client with retry logic.
//!
//! This module provides:
//! - HTTP client for an OpenAI-compatible `/chat/completions` endpoint
//! - Retry logic with exponential backoff
//! - Request validation
//! - Response parsing
//!
//! The API key is supplied per call: the caller's credential doubles as the
//! upstream authorization key.

#![allow(clippy::missing_errors_doc)]

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::config::ClientConfig;
use super::types::{ChatMessage, ChatRequest, ChatResponse, CompletionParams};
use crate::error::ModelError;
use crate::traits::ChatClient;

/// Maximum number of messages per request.
pub const MAX_MESSAGES: usize = 50;
/// Maximum content length per message (50KB).
pub const MAX_CONTENT_LENGTH: usize = 50_000;

/// OpenAI-compatible chat-completion client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    config: ClientConfig,
}

impl OpenAiClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> Result<Self, ModelError> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModelError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self { client, config })
    }

    /// Get the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Validate request size limits.
    fn validate_request(request: &ChatRequest) -> Result<(), ModelError> {
        if request.messages.len() > MAX_MESSAGES {
            return Err(ModelError::InvalidRequest {
                message: format!(
                    "Too many messages: {} > {}",
                    request.messages.len(),
                    MAX_MESSAGES
                ),
            });
        }

        for msg in &request.messages {
            if msg.content.len() > MAX_CONTENT_LENGTH {
                return Err(ModelError::InvalidRequest {
                    message: format!(
                        "Message too large: {} > {}",
                        msg.content.len(),
                        MAX_CONTENT_LENGTH
                    ),
                });
            }
        }

        Ok(())
    }

    /// Execute a request with retry logic.
    async fn execute_with_retry(
        &self,
        request: &ChatRequest,
        api_key: &str,
    ) -> Result<String, ModelError> {
        let mut last_error = None;
        let mut delay = self.config.retry_delay_ms;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tracing::warn!(attempt, delay_ms = delay, "Retrying chat API request");
                tokio::time::sleep(Duration::from_millis(delay)).await;
                delay *= 2; // Exponential backoff
            }

            match self.execute_once(request, api_key).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    if !e.is_retryable() {
                        return Err(e);
                    }
                    tracing::warn!(error = %e, attempt, "Retryable error occurred");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ModelError::Network {
            message: "Unknown error after retries".to_string(),
        }))
    }

    /// Execute a single request attempt.
    async fn execute_once(
        &self,
        request: &ChatRequest,
        api_key: &str,
    ) -> Result<String, ModelError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let start = std::time::Instant::now();

        tracing::debug!(
            url = %url,
            model = %request.model,
            max_tokens = request.max_tokens,
            timeout_ms = self.config.timeout_ms,
            "Starting chat API request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                if e.is_timeout() {
                    tracing::error!(
                        url = %url,
                        elapsed_ms,
                        timeout_ms = self.config.timeout_ms,
                        "Chat API request timed out"
                    );
                    ModelError::Timeout {
                        timeout_ms: self.config.timeout_ms,
                    }
                } else {
                    tracing::error!(url = %url, elapsed_ms, error = %e, "Chat API request failed");
                    ModelError::Network {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::debug!(url = %url, status = %status, elapsed_ms, "Chat API response received");

        // Handle specific error status codes
        if status.as_u16() == 401 {
            return Err(ModelError::AuthenticationFailed);
        }

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);
            return Err(ModelError::RateLimited {
                retry_after_seconds: retry_after,
            });
        }

        if status.as_u16() == 503 {
            return Err(ModelError::Overloaded {
                model: request.model.clone(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::UnexpectedResponse {
                message: format!("Status {status}: {body}"),
            });
        }

        // Parse successful response
        let body: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| ModelError::UnexpectedResponse {
                    message: format!("Failed to parse response: {e}"),
                })?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ModelError::UnexpectedResponse {
                message: "Response contained no choices".to_string(),
            })
    }
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        params: CompletionParams,
        api_key: &str,
    ) -> Result<String, ModelError> {
        let mut request = ChatRequest::new(self.config.model.clone(), messages, params.max_tokens);
        if let Some(temperature) = params.temperature {
            request = request.with_temperature(temperature);
        }
        Self::validate_request(&request)?;
        self.execute_with_retry(&request, api_key).await
    }
}
