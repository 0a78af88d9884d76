//! Trait definitions for mockable dependencies.
//!
//! This module defines traits for:
//! - [`ChatClient`]: chat-completion API abstraction
//! - [`SessionStore`]: append-only session storage abstraction
//!
//! # Mocking
//!
//! Both traits are annotated with `#[cfg_attr(test, mockall::automock)]`
//! which generates mock implementations automatically for testing. Handlers
//! receive both by reference, so a persistent store or a scripted client can
//! be substituted without touching handler logic.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::ModelError;
use crate::model::{ChatMessage, CompletionParams};
use crate::store::{TraceRecord, Turn, UserId, UserProfile};

/// Chat-completion client trait.
///
/// The reply is free-form text with no structural guarantee; callers must
/// treat it as untrusted and decode defensively.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send a completion request.
    ///
    /// # Arguments
    ///
    /// * `messages` - Ordered role-tagged messages
    /// * `params` - Generation parameters for this call
    /// * `api_key` - The caller's credential, used as the upstream key
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the API call fails.
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        params: CompletionParams,
        api_key: &str,
    ) -> Result<String, ModelError>;
}

/// Append-only session storage trait.
///
/// Turns and trace records are immutable once appended; profiles are the
/// only mutated state. All operations are infallible for the in-memory
/// implementation but stay async so a persistent backend can slot in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Append one conversation turn.
    async fn append_turn(&self, turn: Turn);

    /// Append one trace record.
    async fn append_trace(&self, record: TraceRecord);

    /// All conversation turns, in append order.
    async fn turns(&self) -> Vec<Turn>;

    /// Trace records, filtered to one user when an identity is supplied,
    /// else the entire store (intentional global-view fallback).
    async fn trace(&self, user: Option<UserId>) -> Vec<TraceRecord>;

    /// Create the user's profile on first contact; no-op afterwards.
    async fn ensure_profile(&self, user: UserId, persona: String);

    /// Increment the user's dialogue turn count.
    async fn bump_turn_count(&self, user: UserId);

    /// Increment per-term occurrence counts in the user's profile.
    async fn bump_concepts(&self, user: UserId, terms: Vec<String>);

    /// Look up a user's profile.
    async fn profile(&self, user: UserId) -> Option<UserProfile>;

    /// All profiles keyed by user identifier.
    async fn profiles(&self) -> BTreeMap<String, UserProfile>;
}
