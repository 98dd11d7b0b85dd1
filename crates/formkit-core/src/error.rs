//! Core error types for formkit.
//!
//! Resolving a field never fails; errors only surface at the edges where a
//! form is assembled (unknown routes, unregistered field types, settings files
//! that cannot be read) or when a caller opts into checked resolution.

use thiserror::Error;

/// The primary error type for formkit.
#[derive(Error, Debug)]
pub enum FormError {
    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A form or field definition is improperly configured.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    // ── Fields ───────────────────────────────────────────────────────

    /// No field type is registered under the given name.
    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),

    /// An option carried a value of the wrong shape.
    #[error("Invalid option '{key}': {message}")]
    InvalidOption {
        /// The offending option key.
        key: String,
        /// What was wrong with it.
        message: String,
    },

    // ── Routing ──────────────────────────────────────────────────────

    /// A named route could not be turned into a URL.
    #[error("Reverse for '{0}' not found")]
    NoReverseMatch(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FormError {
    /// Shorthand for an [`FormError::InvalidOption`].
    pub fn invalid_option(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Returns `true` for errors caused by the form or field declaration
    /// rather than by the environment.
    pub const fn is_declaration_error(&self) -> bool {
        matches!(
            self,
            Self::ImproperlyConfigured(_)
                | Self::UnknownFieldType(_)
                | Self::InvalidOption { .. }
                | Self::NoReverseMatch(_)
        )
    }
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, FormError>`.
pub type FormResult<T> = Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_error_display() {
        let err = FormError::UnknownFieldType("slider".into());
        assert_eq!(err.to_string(), "Unknown field type: slider");

        let err = FormError::NoReverseMatch("users.show".into());
        assert_eq!(err.to_string(), "Reverse for 'users.show' not found");
    }

    #[test]
    fn test_invalid_option_display() {
        let err = FormError::invalid_option("before", "expected a string");
        assert_eq!(err.to_string(), "Invalid option 'before': expected a string");
    }

    #[test]
    fn test_declaration_errors() {
        assert!(FormError::UnknownFieldType("x".into()).is_declaration_error());
        assert!(FormError::invalid_option("x", "y").is_declaration_error());
        assert!(FormError::NoReverseMatch("x".into()).is_declaration_error());
        assert!(!FormError::ConfigurationError("x".into()).is_declaration_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: FormError = io_err.into();
        assert!(err.to_string().contains("file missing"));
        assert!(!err.is_declaration_error());
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FormError = serde_err.into();
        assert!(matches!(err, FormError::SerializationError(_)));
    }
}
