//! # formkit-core
//!
//! Core types, settings, and error types for the formkit workspace.
//! This crate has no dependency on the other formkit crates and provides the
//! foundation they build on.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Form settings, dotted-key configuration lookup, global settings
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration
//! - [`utils`] - Text and HTML helpers

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{FormError, FormResult};
pub use settings::{ConfigLookup, FormsSettings, Settings, SETTINGS};
