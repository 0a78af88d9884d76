//! Session storage.
//!
//! This module provides:
//! - Append-only session entities ([`Turn`], [`TraceRecord`], [`UserProfile`])
//! - [`UserId`]: token-prefix-derived local identity
//! - [`MemoryStore`]: the process-lifetime in-memory [`crate::traits::SessionStore`]
//! - [`summarize`]: the reasoning-consistency summary

mod memory;
mod types;

pub use memory::MemoryStore;
pub use types::{summarize, Role, SessionSummary, TraceRecord, Turn, UserId, UserProfile};
