//! HTTP response bodies.

use serde::Serialize;

use crate::dialogue::DialogueOutcome;
use crate::store::TraceRecord;

/// One new turn returned by the dialogue endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct NewTurn {
    /// Speaker role.
    pub role: &'static str,
    /// Turn text.
    pub text: String,
}

/// Response for `POST /api/dialogue`.
#[derive(Debug, Clone, Serialize)]
pub struct DialogueResponse {
    /// New turns produced by this exchange (the tutor's question).
    pub new_turns: Vec<NewTurn>,
    /// Request status.
    pub status: &'static str,
    /// Detected fallacy labels.
    pub detected_fallacies: Vec<String>,
    /// Resolved confidence in [0,100].
    pub confidence: u8,
}

impl From<DialogueOutcome> for DialogueResponse {
    fn from(outcome: DialogueOutcome) -> Self {
        Self {
            new_turns: vec![NewTurn {
                role: "ai",
                text: outcome.question,
            }],
            status: "ok",
            detected_fallacies: outcome.fallacies,
            confidence: outcome.confidence,
        }
    }
}

/// Response for `GET /api/trace`.
#[derive(Debug, Clone, Serialize)]
pub struct TraceResponse {
    /// Trace records, filtered by user when a credential was supplied.
    pub trace: Vec<TraceRecord>,
}

/// Response for `POST /api/extract_terms`.
#[derive(Debug, Clone, Serialize)]
pub struct TermsResponse {
    /// Extracted key terms.
    pub terms: Vec<String>,
}

/// Error body returned by failing endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error description.
    pub error: String,
}
