//! SocrAI Tutoring Service
//!
//! A Rust HTTP service for Socratic tutoring dialogues backed by an
//! OpenAI-compatible chat-completion API.
//!
//! # Features
//!
//! - Persona- and mode-composed Socratic prompting
//! - Best-effort structured-annotation recovery from free-form model replies
//! - Confidence estimation and concept-term tracking as individually-failable
//!   enrichment steps
//! - Append-only in-memory session stores with a reasoning-consistency
//!   summary
//!
//! # Quick Start
//!
//! ```bash
//! ./socrai
//! # then POST /api/dialogue with an Authorization header carrying the
//! # caller's chat API key
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌────────┐   HTTP/JSON   ┌──────────────────┐
//! │   UI   │──────────────▶│  axum handlers   │──────▶ chat API
//! │        │◀──────────────│  dialogue engine │
//! └────────┘               └────────┬─────────┘
//!                                   │
//!                                   ▼
//!                         in-memory session store
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod decoder;
pub mod dialogue;
pub mod error;
pub mod export;
pub mod model;
pub mod prompts;
pub mod server;
pub mod store;
pub mod traits;

#[cfg(test)]
mod test_utils;
