//! HTTP request bodies.

use serde::Deserialize;

use crate::dialogue::DialogueInput;

/// Body for `POST /api/dialogue` and `POST /api/extract_terms`.
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueBody {
    /// Socratic mode label.
    pub mode: String,
    /// Persona label.
    pub persona: String,
    /// Discussion topic.
    pub topic: String,
    /// The student's utterance.
    pub student_text: String,
}

impl From<DialogueBody> for DialogueInput {
    fn from(body: DialogueBody) -> Self {
        Self {
            mode: body.mode,
            persona: body.persona,
            topic: body.topic,
            student_text: body.student_text,
        }
    }
}
