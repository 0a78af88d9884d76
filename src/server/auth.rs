//! Credential extraction.
//!
//! The credential arrives in the `Authorization` header, either as
//! `Bearer <token>` or as a bare token. It doubles as the upstream API key
//! and, truncated, as the local user identifier.

use axum::http::{header, HeaderMap};

/// Extract the credential token from request headers.
///
/// With a space-separated header value the second field is the token
/// (`Bearer abc` yields `abc`); otherwise the whole value is. Returns
/// `None` for a missing, non-UTF-8, or empty header.
#[must_use]
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let mut fields = value.split(' ');
    let first = fields.next()?;
    let token = fields.next().unwrap_or(first);
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
