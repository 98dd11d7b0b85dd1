//! Utility functions for formkit.
//!
//! - [`text`]: String and HTML helpers (escaping, label humanizing).

pub mod text;
