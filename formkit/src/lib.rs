//! # formkit
//!
//! Declarative HTML form building for server-rendered Rust web applications.
//!
//! This is the meta-crate that re-exports the formkit sub-crates. Depend on
//! `formkit` to get everything, or on individual crates for finer-grained
//! control.
//!
//! ```
//! use formkit::prelude::*;
//!
//! struct ContactForm;
//!
//! impl FormDefinition for ContactForm {
//!     fn fields(&self) -> Vec<FieldConfig> {
//!         vec![
//!             Email.make("email", opts(json!({"required": true}))),
//!             TextArea.make("message", opts(json!({}))),
//!         ]
//!     }
//! }
//!
//! let routes = RouteTable::new().with_current("/contact/");
//! let session = MemorySession::new().with_csrf_token("token");
//! let mut form = BaseForm::new(ContactForm, FormContext::new(routes, session));
//! let html = form.make().unwrap().html().to_string();
//! assert!(html.starts_with(r#"<form method="POST" action="/contact/""#));
//! ```

/// Settings, configuration lookup, logging, and error types.
pub use formkit_core as core;

/// Field types, option resolution, and the field registry.
pub use formkit_fields as fields;

/// Form assembly: layout, open/close markup, URL and session seams.
#[cfg(feature = "forms")]
pub use formkit_forms as forms;

/// Testing utilities: fixtures, settings overrides, and HTML assertions.
#[cfg(feature = "testing")]
pub use formkit_test as test;

// Third-party re-exports
pub use http;
pub use serde_json;
pub use tracing;
pub use tracing_subscriber;

/// The types most applications need.
pub mod prelude {
    pub use formkit_core::{ConfigLookup, FormError, FormResult, Settings, SETTINGS};
    pub use formkit_fields::{
        opts, Checkbox, Color, Date, Decimal, Email, Field, FieldConfig, FieldRegistry, File,
        Hidden, Image, Number, Options, Password, PasswordWithReveal, Radio, Relationship,
        Select, Tel, Text, TextArea, Time, Url,
    };
    #[cfg(feature = "forms")]
    pub use formkit_forms::{
        BaseForm, ButtonLinks, Buttons, FormContext, FormDefinition, MemorySession, Orientation,
        RouteTable, Section, Session, UrlGenerator,
    };
    pub use http::Method;
    pub use serde_json::json;
}
