//! Best-effort decoding of untrusted model replies.
//!
//! The upstream model is asked for structured JSON but guarantees nothing;
//! replies may be raw JSON, JSON buried in prose, or plain text. Every
//! decoder here is a total function: it always produces a usable value, and
//! all default-substitution policy lives in this module so it can be tested
//! without a network.

use serde_json::Value;

/// Placeholder for an absent detection note.
pub const DETECTION_NONE: &str = "(none)";

/// Placeholder for an absent interpretation note.
pub const META_AUTO: &str = "(auto)";

/// Confidence substituted when the estimator fallback also fails.
pub const DEFAULT_CONFIDENCE: u8 = 50;

/// Maximum number of terms returned by the capitalized-word fallback.
pub const MAX_FALLBACK_TERMS: usize = 6;

/// Structured annotation recovered from a tutor reply.
///
/// Fields the model omitted (or that failed to parse) carry the documented
/// defaults; `fell_back` records whether any JSON object was recovered at
/// all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// The Socratic follow-up question.
    pub question: String,
    /// Detected-issue note, `"(none)"` when absent.
    pub detection: String,
    /// Detected fallacy labels, possibly empty.
    pub fallacies: Vec<String>,
    /// Confidence in [0,100], unset when the model supplied none.
    pub confidence: Option<u8>,
    /// Short interpretation note, `"(auto)"` when absent.
    pub meta: String,
    /// True when no parseable JSON object was found in the reply.
    pub fell_back: bool,
}

/// Decode a tutor reply into an [`Annotation`].
///
/// Scans for the brace-delimited substring (first `{` to last `}`) and
/// attempts a JSON parse. Each recognized field is extracted individually
/// with its own default, so a JSON object missing `question` still falls
/// back to the whole raw reply for that one field. With no parseable JSON
/// the entire trimmed reply becomes the question.
#[must_use]
pub fn decode_reply(raw: &str) -> Annotation {
    let mut annotation = Annotation {
        question: raw.trim().to_string(),
        detection: DETECTION_NONE.to_string(),
        fallacies: Vec::new(),
        confidence: None,
        meta: META_AUTO.to_string(),
        fell_back: true,
    };

    let Some(block) = brace_block(raw) else {
        return annotation;
    };
    let Ok(data) = serde_json::from_str::<Value>(block) else {
        return annotation;
    };
    if !data.is_object() {
        return annotation;
    }

    annotation.fell_back = false;

    if let Some(question) = data.get("question").and_then(Value::as_str) {
        annotation.question = question.to_string();
    }
    if let Some(detection) = data.get("detection").and_then(Value::as_str) {
        annotation.detection = detection.to_string();
    }
    if let Some(fallacies) = data.get("fallacies").and_then(Value::as_array) {
        annotation.fallacies = fallacies
            .iter()
            .filter_map(Value::as_str)
            .map(ToString::to_string)
            .collect();
    }
    annotation.confidence = data.get("confidence").and_then(clamp_confidence);
    if let Some(meta) = data.get("meta").and_then(Value::as_str) {
        annotation.meta = meta.to_string();
    }

    annotation
}

/// Decode the confidence-estimator reply.
///
/// Extracts the first run of 1-3 digits and clamps to [0,100]; replies with
/// no digits default to [`DEFAULT_CONFIDENCE`].
#[must_use]
pub fn decode_confidence_reply(raw: &str) -> u8 {
    first_digit_run(raw).unwrap_or(DEFAULT_CONFIDENCE)
}

/// Decode a term-extraction reply into a list of terms.
///
/// Returns `None` when no brace-delimited JSON object with a `terms` array
/// of strings can be recovered; callers then apply [`fallback_terms`] or
/// skip silently.
#[must_use]
pub fn decode_terms_reply(raw: &str) -> Option<Vec<String>> {
    let block = brace_block(raw)?;
    let data: Value = serde_json::from_str(block).ok()?;
    let terms = data.get("terms")?.as_array()?;
    Some(
        terms
            .iter()
            .filter_map(Value::as_str)
            .map(ToString::to_string)
            .collect(),
    )
}

/// Capitalized-word fallback for term extraction.
///
/// Collects alphabetic words of length >= 4 starting with an uppercase
/// letter, deduplicated in first-seen order and capped at
/// [`MAX_FALLBACK_TERMS`].
#[must_use]
pub fn fallback_terms(text: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for word in text.split(|c: char| !c.is_ascii_alphabetic()) {
        if word.len() >= 4
            && word.starts_with(|c: char| c.is_ascii_uppercase())
            && !terms.iter().any(|t| t == word)
        {
            terms.push(word.to_string());
            if terms.len() == MAX_FALLBACK_TERMS {
                break;
            }
        }
    }
    terms
}

/// Find the brace-delimited substring: first `{` to last `}`.
fn brace_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}

/// Clamp a JSON confidence value to an integer in [0,100].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_confidence(value: &Value) -> Option<u8> {
    let number = value.as_f64()?;
    if !number.is_finite() {
        return None;
    }
    Some(number.clamp(0.0, 100.0).round() as u8)
}

/// Extract the first run of 1-3 consecutive digits, clamped to [0,100].
fn first_digit_run(text: &str) -> Option<u8> {
    let bytes = text.as_bytes();
    let start = bytes.iter().position(u8::is_ascii_digit)?;
    let run_len = bytes[start..]
        .iter()
        .take(3)
        .take_while(|b| b.is_ascii_digit())
        .count();
    let value: u32 = text[start..start + run_len].parse().ok()?;
    #[allow(clippy::cast_possible_truncation)]
    Some(value.min(100) as u8)
}
