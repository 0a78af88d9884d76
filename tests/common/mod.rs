//! Shared helpers for integration tests.

use async_trait::async_trait;

use socrai::error::ModelError;
use socrai::model::{ChatMessage, CompletionParams};
use socrai::traits::ChatClient;

/// A chat client that answers from a fixed script, routing on the system
/// prompt the pipeline sends with each call.
pub struct ScriptedClient {
    pub primary: String,
    pub confidence: String,
    pub terms: String,
}

impl ScriptedClient {
    pub fn new(
        primary: impl Into<String>,
        confidence: impl Into<String>,
        terms: impl Into<String>,
    ) -> Self {
        Self {
            primary: primary.into(),
            confidence: confidence.into(),
            terms: terms.into(),
        }
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        _params: CompletionParams,
        _api_key: &str,
    ) -> Result<String, ModelError> {
        let system = &messages[0].content;
        if system.starts_with("You are SocrAI") {
            Ok(self.primary.clone())
        } else if system.contains("short estimator") {
            Ok(self.confidence.clone())
        } else {
            Ok(self.terms.clone())
        }
    }
}

/// A chat client whose every call fails.
pub struct FailingClient;

#[async_trait]
impl ChatClient for FailingClient {
    async fn complete(
        &self,
        _messages: Vec<ChatMessage>,
        _params: CompletionParams,
        _api_key: &str,
    ) -> Result<String, ModelError> {
        Err(ModelError::Network {
            message: "connection refused".to_string(),
        })
    }
}
