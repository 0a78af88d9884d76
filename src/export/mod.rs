//! Session export formats.
//!
//! Two formats: a full-state JSON dump of all three stores, and a
//! human-readable plaintext report enumerating the trace.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::store::{TraceRecord, Turn, UserProfile};

/// Full-state dump of the conversation, trace, and profile stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionExport {
    /// All conversation turns in append order.
    pub conversations: Vec<Turn>,
    /// All trace records in append order.
    pub trace: Vec<TraceRecord>,
    /// All profiles keyed by user identifier.
    pub profiles: BTreeMap<String, UserProfile>,
}

/// Render the plaintext session report.
///
/// One block per trace record: claim, issue, fallacies, confidence, and
/// follow-up question.
#[must_use]
pub fn plaintext_report(records: &[TraceRecord]) -> String {
    let mut lines = Vec::with_capacity(3 + records.len() * 6);
    lines.push("SocrAI Session Report".to_string());
    lines.push(format!("Exported: {} UTC", Utc::now().to_rfc3339()));
    lines.push("=".repeat(40));
    for record in records {
        lines.push(format!("Claim: {}", record.student_claim));
        lines.push(format!("Issue: {}", record.detected_issue));
        let fallacies = if record.detected_fallacies.is_empty() {
            "(none)".to_string()
        } else {
            record.detected_fallacies.join(", ")
        };
        lines.push(format!("Fallacies: {fallacies}"));
        let confidence = record
            .confidence
            .map_or_else(|| "(unset)".to_string(), |c| c.to_string());
        lines.push(format!("Confidence: {confidence}"));
        lines.push(format!("Follow-up: {}", record.follow_up));
        lines.push("-".repeat(30));
    }
    lines.join("\n")
}
