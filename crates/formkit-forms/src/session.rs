//! Session access for form rendering.
//!
//! A rendered form reads three things from the user's session: the CSRF
//! token, validation errors flashed by the previous request, and the input
//! the user submitted last time (so a failed submission re-renders with the
//! user's values).

use std::collections::HashMap;
use std::fmt;

/// Read access to the session data a form needs.
pub trait Session: Send + Sync + fmt::Debug {
    /// The CSRF token to embed in state-changing forms.
    fn csrf_token(&self) -> Option<String>;

    /// Validation errors for `field`.
    fn errors(&self, field: &str) -> Vec<String>;

    /// The previously submitted value for `field`.
    fn old(&self, field: &str) -> Option<String>;
}

/// An in-memory session, suitable for tests and single-request rendering.
///
/// # Examples
///
/// ```
/// use formkit_forms::{MemorySession, Session};
///
/// let session = MemorySession::new()
///     .with_csrf_token("abc123")
///     .with_error("email", "The email field is required.")
///     .with_old_input("name", "Jane");
///
/// assert_eq!(session.csrf_token().as_deref(), Some("abc123"));
/// assert_eq!(session.errors("email").len(), 1);
/// assert_eq!(session.old("name").as_deref(), Some("Jane"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    csrf_token: Option<String>,
    errors: HashMap<String, Vec<String>>,
    old_input: HashMap<String, String>,
}

impl MemorySession {
    /// Creates an empty session with no token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the CSRF token.
    #[must_use]
    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    /// Adds a validation error for `field`.
    #[must_use]
    pub fn with_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.entry(field.into()).or_default().push(message.into());
        self
    }

    /// Records previously submitted input for `field`.
    #[must_use]
    pub fn with_old_input(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.old_input.insert(field.into(), value.into());
        self
    }

    /// Returns `true` if any field has errors.
    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|messages| !messages.is_empty())
    }
}

impl Session for MemorySession {
    fn csrf_token(&self) -> Option<String> {
        self.csrf_token.clone()
    }

    fn errors(&self, field: &str) -> Vec<String> {
        self.errors.get(field).cloned().unwrap_or_default()
    }

    fn old(&self, field: &str) -> Option<String> {
        self.old_input.get(field).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_session() {
        let session = MemorySession::new();
        assert!(session.csrf_token().is_none());
        assert!(session.errors("email").is_empty());
        assert!(session.old("email").is_none());
        assert!(!session.has_errors());
    }

    #[test]
    fn test_errors_accumulate() {
        let session = MemorySession::new()
            .with_error("email", "Required.")
            .with_error("email", "Must be valid.");
        assert_eq!(session.errors("email"), vec!["Required.", "Must be valid."]);
        assert!(session.has_errors());
    }

    #[test]
    fn test_old_input_replaced() {
        let session = MemorySession::new()
            .with_old_input("name", "a")
            .with_old_input("name", "b");
        assert_eq!(session.old("name").as_deref(), Some("b"));
    }
}
