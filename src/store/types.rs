//! Session entities.
//!
//! All three entity kinds live only in process memory for the lifetime of
//! the running process. Turns and trace records are never mutated after
//! creation; profiles accumulate counts.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decoder::DETECTION_NONE;

/// Local user identifier, derived from a credential token prefix.
///
/// The first 8 characters of the credential key the in-process stores. This
/// is an identity scheme with a known collision caveat (short prefixes may
/// collide across distinct credentials), not a security boundary. It is
/// resolved once at the HTTP layer and passed to handlers explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Derive a user identifier from a credential token.
    ///
    /// Returns `None` for an empty token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        if token.is_empty() {
            return None;
        }
        Some(Self(token.chars().take(8).collect()))
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The student.
    Student,
    /// The tutor.
    Ai,
}

/// One conversation turn. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Speaker role.
    pub role: Role,
    /// Utterance text.
    pub text: String,
    /// When the turn was recorded.
    pub ts: DateTime<Utc>,
    /// Owning user.
    pub user: UserId,
}

impl Turn {
    /// Create a turn recorded now.
    #[must_use]
    pub fn new(role: Role, text: impl Into<String>, user: UserId) -> Self {
        Self {
            role,
            text: text.into(),
            ts: Utc::now(),
            user,
        }
    }
}

/// One annotated record of a student claim and the derived commentary on it.
/// Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// The student's claim text.
    pub student_claim: String,
    /// Short interpretation note, `"(auto)"` when the model supplied none.
    pub interpretation: String,
    /// Detected-issue note, `"(none)"` when the model supplied none.
    pub detected_issue: String,
    /// Detected fallacy labels, possibly empty.
    pub detected_fallacies: Vec<String>,
    /// Confidence score in [0,100], absent when never resolved.
    pub confidence: Option<u8>,
    /// The follow-up question returned to the student.
    pub follow_up: String,
    /// When the record was created.
    pub ts: DateTime<Utc>,
    /// Owning user.
    pub user: UserId,
}

impl TraceRecord {
    /// True when this record carries a detected issue.
    ///
    /// An empty note or the `"(none)"` placeholder does not count as a flaw.
    #[must_use]
    pub fn has_flaw(&self) -> bool {
        !self.detected_issue.is_empty() && self.detected_issue != DETECTION_NONE
    }
}

/// Per-user aggregate state. The only mutable entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Persona label supplied on first contact.
    pub persona: String,
    /// Number of dialogue exchanges.
    pub history_count: u64,
    /// Concept term to occurrence count.
    pub concept_counts: BTreeMap<String, u64>,
}

impl UserProfile {
    /// Create a fresh profile for a persona.
    #[must_use]
    pub fn new(persona: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            history_count: 0,
            concept_counts: BTreeMap::new(),
        }
    }
}

/// Derived summary of a trace slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Human-readable summary line.
    pub summary: String,
    /// Reasoning consistency score in [0,100].
    pub score: u8,
    /// Count of records with a detected issue.
    pub flaws: usize,
    /// Total record count.
    pub total: usize,
}

/// Compute the reasoning-consistency summary over trace records.
///
/// Score = max(0, 100 - 8 x flaw count). Zero records yield the fixed
/// "no trace" summary with score 100.
#[must_use]
pub fn summarize(records: &[TraceRecord]) -> SessionSummary {
    if records.is_empty() {
        return SessionSummary {
            summary: "No reasoning trace available.".to_string(),
            score: 100,
            flaws: 0,
            total: 0,
        };
    }

    let flaws = records.iter().filter(|r| r.has_flaw()).count();
    let total = records.len();
    #[allow(clippy::cast_possible_truncation)]
    let score = 100u64.saturating_sub(8 * flaws as u64) as u8;
    let summary = format!(
        "During this dialogue, {total} turns were analyzed. {flaws} potential \
         logical issues or assumptions were detected. Reasoning consistency \
         score: {score}/100."
    );

    SessionSummary {
        summary,
        score,
        flaws,
        total,
    }
}
