//! Test utilities and mock factories.
//!
//! Shared testing infrastructure for the dialogue pipeline. Only compiled
//! for tests (`#[cfg(test)]`).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::error::ModelError;
use crate::traits::MockChatClient;

/// Create a mock chat client that returns the same reply for every call.
#[must_use]
pub fn mock_chat_success(reply: impl Into<String>) -> MockChatClient {
    let reply = reply.into();
    let mut mock = MockChatClient::new();
    mock.expect_complete()
        .returning(move |_msgs, _params, _key| Ok(reply.clone()));
    mock
}

/// Create a mock chat client that returns an error for every call.
#[must_use]
pub fn mock_chat_error(error: ModelError) -> MockChatClient {
    let mut mock = MockChatClient::new();
    mock.expect_complete()
        .returning(move |_msgs, _params, _key| Err(error.clone()));
    mock
}

/// Create a mock chat client that dispatches on the system prompt.
///
/// The pipeline's three calls carry distinct system prompts, so the mock
/// routes by prefix: the tutor prompt gets `primary`, the estimator prompt
/// gets `confidence`, anything else gets `terms`.
#[must_use]
pub fn mock_chat_script(
    primary: impl Into<String>,
    confidence: impl Into<String>,
    terms: impl Into<String>,
) -> MockChatClient {
    let primary = primary.into();
    let confidence = confidence.into();
    let terms = terms.into();
    let mut mock = MockChatClient::new();
    mock.expect_complete().returning(move |msgs, _params, _key| {
        let system = &msgs[0].content;
        if system.starts_with("You are SocrAI") {
            Ok(primary.clone())
        } else if system.contains("short estimator") {
            Ok(confidence.clone())
        } else {
            Ok(terms.clone())
        }
    });
    mock
}
