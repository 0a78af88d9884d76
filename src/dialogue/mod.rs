//! Dialogue engine.
//!
//! This module runs the tutoring pipeline: compose a system prompt from
//! persona and mode templates, issue the primary chat call, decode the reply
//! into an annotation, then run the independently-failable enrichment steps
//! (confidence estimation, concept-term tracking) before persisting the
//! exchange.
//!
//! Failure policy: the primary call is the only step surfaced to the caller.
//! Decode failures degrade to documented defaults, the confidence estimator
//! degrades to a fixed default, and term tracking is skipped silently.
//!
//! # Design pattern
//!
//! The engine is generic over the storage and client traits and holds both
//! via composition, so tests inject mocks and a persistent store could slot
//! in without touching pipeline logic.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::SecretString;
use crate::decoder::{
    decode_confidence_reply, decode_reply, decode_terms_reply, fallback_terms, DEFAULT_CONFIDENCE,
};
use crate::error::ServiceError;
use crate::export::{plaintext_report, SessionExport};
use crate::model::{ChatMessage, CompletionParams};
use crate::prompts::{
    confidence_estimator_prompt, dialogue_user_message, term_extraction_prompt,
    term_tracking_prompt, tutor_system_prompt,
};
use crate::store::{summarize, Role, SessionSummary, TraceRecord, Turn, UserId};
use crate::traits::{ChatClient, SessionStore};

/// Temperature for the primary tutor call.
pub const TUTOR_TEMPERATURE: f64 = 0.6;
/// Token budget for the primary tutor call.
pub const TUTOR_MAX_TOKENS: u32 = 400;
/// Token budget for the confidence-estimator call.
pub const CONFIDENCE_MAX_TOKENS: u32 = 20;
/// Token budget for the per-turn concept tracking call.
pub const TRACKING_MAX_TOKENS: u32 = 120;
/// Token budget for the standalone term-extraction call.
pub const EXTRACTION_MAX_TOKENS: u32 = 200;

/// Input for a dialogue exchange or a term-extraction request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueInput {
    /// Socratic mode label (unknown labels degrade to no addition).
    pub mode: String,
    /// Persona label (unknown labels degrade to no addition).
    pub persona: String,
    /// Discussion topic.
    pub topic: String,
    /// The student's utterance.
    pub student_text: String,
}

/// Outcome of one dialogue exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueOutcome {
    /// The Socratic follow-up question.
    pub question: String,
    /// Detected-issue note, `"(none)"` when absent.
    pub detection: String,
    /// Detected fallacy labels.
    pub fallacies: Vec<String>,
    /// Resolved confidence in [0,100].
    pub confidence: u8,
    /// Short interpretation note.
    pub meta: String,
}

/// The tutoring pipeline over an injected store and chat client.
#[derive(Debug)]
pub struct DialogueEngine<S, C> {
    store: Arc<S>,
    client: Arc<C>,
}

impl<S, C> Clone for DialogueEngine<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            client: Arc::clone(&self.client),
        }
    }
}

impl<S: SessionStore, C: ChatClient> DialogueEngine<S, C> {
    /// Create a new engine with the given dependencies.
    #[must_use]
    pub fn new(store: Arc<S>, client: Arc<C>) -> Self {
        Self { store, client }
    }

    /// Get a reference to the store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one dialogue exchange.
    ///
    /// Issues the primary tutor call, decodes the reply, resolves confidence
    /// via the estimator fallback when unset, tracks concept terms
    /// best-effort, and appends the exchange to the stores.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Model`] only when the primary call fails;
    /// enrichment failures degrade to defaults.
    pub async fn dialogue(
        &self,
        user: &UserId,
        credential: &SecretString,
        input: DialogueInput,
    ) -> Result<DialogueOutcome, ServiceError> {
        self.store
            .ensure_profile(user.clone(), input.persona.clone())
            .await;

        let messages = vec![
            ChatMessage::system(tutor_system_prompt(&input.persona, &input.mode)),
            ChatMessage::user(dialogue_user_message(&input.topic, &input.student_text)),
        ];
        let params = CompletionParams::new(TUTOR_MAX_TOKENS).with_temperature(TUTOR_TEMPERATURE);
        let raw = self
            .client
            .complete(messages, params, credential.expose())
            .await
            .map_err(ServiceError::Model)?;

        let annotation = decode_reply(&raw);
        if annotation.fell_back {
            tracing::debug!(user = %user, "Tutor reply carried no parseable JSON, using defaults");
        }

        let confidence = match annotation.confidence {
            Some(confidence) => confidence,
            None => self.estimate_confidence(credential, &input.student_text).await,
        };

        self.track_concepts(user, credential, &input.student_text)
            .await;

        self.store
            .append_turn(Turn::new(
                Role::Student,
                input.student_text.clone(),
                user.clone(),
            ))
            .await;
        self.store
            .append_turn(Turn::new(Role::Ai, annotation.question.clone(), user.clone()))
            .await;
        self.store
            .append_trace(TraceRecord {
                id: Uuid::new_v4(),
                student_claim: input.student_text,
                interpretation: annotation.meta.clone(),
                detected_issue: annotation.detection.clone(),
                detected_fallacies: annotation.fallacies.clone(),
                confidence: Some(confidence),
                follow_up: annotation.question.clone(),
                ts: chrono::Utc::now(),
                user: user.clone(),
            })
            .await;
        self.store.bump_turn_count(user.clone()).await;

        tracing::info!(
            user = %user,
            confidence,
            fallacies = annotation.fallacies.len(),
            fell_back = annotation.fell_back,
            "Dialogue exchange recorded"
        );

        Ok(DialogueOutcome {
            question: annotation.question,
            detection: annotation.detection,
            fallacies: annotation.fallacies,
            confidence,
            meta: annotation.meta,
        })
    }

    /// Extract key terms from student text.
    ///
    /// Primary path asks the model for a structured list and feeds the
    /// user's concept counts; on any failure the local capitalized-word
    /// fallback applies (without touching the profile, since those terms are
    /// not model-derived).
    pub async fn extract_terms(
        &self,
        user: &UserId,
        credential: &SecretString,
        input: DialogueInput,
    ) -> Vec<String> {
        self.store
            .ensure_profile(user.clone(), input.persona.clone())
            .await;

        let messages = vec![
            ChatMessage::system(term_extraction_prompt()),
            ChatMessage::user(input.student_text.clone()),
        ];
        let params = CompletionParams::new(EXTRACTION_MAX_TOKENS).with_temperature(0.0);
        match self
            .client
            .complete(messages, params, credential.expose())
            .await
        {
            Ok(raw) => {
                if let Some(terms) = decode_terms_reply(&raw) {
                    self.store
                        .bump_concepts(user.clone(), terms.clone())
                        .await;
                    return terms;
                }
                tracing::debug!(user = %user, "Term extraction reply unparseable, using fallback");
            }
            Err(error) => {
                tracing::debug!(user = %user, error = %error, "Term extraction call failed, using fallback");
            }
        }
        fallback_terms(&input.student_text)
    }

    /// Trace records, filtered to one user when an identity is supplied.
    pub async fn trace(&self, user: Option<UserId>) -> Vec<TraceRecord> {
        self.store.trace(user).await
    }

    /// Reasoning-consistency summary over the (optionally filtered) trace.
    pub async fn summary(&self, user: Option<UserId>) -> SessionSummary {
        let records = self.store.trace(user).await;
        summarize(&records)
    }

    /// Full-state dump of all three stores.
    pub async fn export(&self) -> SessionExport {
        SessionExport {
            conversations: self.store.turns().await,
            trace: self.store.trace(None).await,
            profiles: self.store.profiles().await,
        }
    }

    /// Human-readable plaintext session report.
    pub async fn report(&self) -> String {
        let records = self.store.trace(None).await;
        plaintext_report(&records)
    }

    /// Confidence-estimator fallback. Defaults on any failure.
    async fn estimate_confidence(&self, credential: &SecretString, student_text: &str) -> u8 {
        let messages = vec![
            ChatMessage::system(confidence_estimator_prompt()),
            ChatMessage::user(student_text.to_string()),
        ];
        let params = CompletionParams::new(CONFIDENCE_MAX_TOKENS).with_temperature(0.0);
        match self
            .client
            .complete(messages, params, credential.expose())
            .await
        {
            Ok(raw) => decode_confidence_reply(&raw),
            Err(error) => {
                tracing::debug!(error = %error, "Confidence estimator failed, using default");
                DEFAULT_CONFIDENCE
            }
        }
    }

    /// Best-effort concept tracking. Skips silently on any failure.
    async fn track_concepts(&self, user: &UserId, credential: &SecretString, student_text: &str) {
        let messages = vec![
            ChatMessage::system(term_tracking_prompt()),
            ChatMessage::user(student_text.to_string()),
        ];
        let params = CompletionParams::new(TRACKING_MAX_TOKENS).with_temperature(0.0);
        match self
            .client
            .complete(messages, params, credential.expose())
            .await
        {
            Ok(raw) => {
                if let Some(terms) = decode_terms_reply(&raw) {
                    self.store.bump_concepts(user.clone(), terms).await;
                }
            }
            Err(error) => {
                tracing::debug!(error = %error, "Concept tracking call failed, skipping");
            }
        }
    }
}
