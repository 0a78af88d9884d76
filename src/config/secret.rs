//! Secret string wrapper for sensitive data.
//!
//! This module provides a wrapper type that prevents accidental logging of
//! sensitive data like the per-request API credential.

use std::fmt;

/// A wrapper for sensitive strings that redacts the value in Debug/Display
/// output.
///
/// The caller's credential doubles as the upstream API key, so it flows
/// through the dialogue pipeline. Wrapping it keeps it out of trace output.
///
/// # Example
///
/// ```
/// use socrai::config::SecretString;
///
/// let secret = SecretString::new("sk-user-key-123");
/// assert_eq!(format!("{:?}", secret), "<REDACTED>");
/// assert_eq!(secret.expose(), "sk-user-key-123");
/// ```
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    /// Creates a new `SecretString` from any string-like value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Exposes the underlying secret value.
    ///
    /// Use this only at the point the secret is actually needed, such as
    /// when building the upstream request.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns true if the secret is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the length of the secret.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<REDACTED>")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<REDACTED>")
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecretString {}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts() {
        let secret = SecretString::new("sk-abc");
        assert_eq!(format!("{secret:?}"), "<REDACTED>");
    }

    #[test]
    fn test_display_redacts() {
        let secret = SecretString::new("sk-abc");
        assert_eq!(format!("{secret}"), "<REDACTED>");
    }

    #[test]
    fn test_expose_returns_value() {
        let secret = SecretString::new("sk-abc");
        assert_eq!(secret.expose(), "sk-abc");
    }

    #[test]
    fn test_len_and_is_empty() {
        assert!(SecretString::new("").is_empty());
        assert_eq!(SecretString::new("abcd").len(), 4);
    }

    #[test]
    fn test_eq_compares_values() {
        assert_eq!(SecretString::new("a"), SecretString::from("a"));
        assert_ne!(SecretString::new("a"), SecretString::from("b".to_string()));
    }
}
