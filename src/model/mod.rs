//! Chat-completion API integration.
//!
//! This module provides:
//! - [`OpenAiClient`]: HTTP client with retry logic
//! - [`ClientConfig`]: client configuration
//! - Request/response wire types

mod client;
mod config;
mod types;

pub use client::{OpenAiClient, MAX_CONTENT_LENGTH, MAX_MESSAGES};
pub use config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_MODEL, DEFAULT_RETRY_DELAY_MS,
    DEFAULT_TIMEOUT_MS,
};
pub use types::{ChatChoice, ChatMessage, ChatRequest, ChatResponse, ChoiceMessage, CompletionParams};
