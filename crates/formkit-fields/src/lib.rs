//! # formkit-fields
//!
//! Field definitions for formkit. A field type implements the [`Field`] trait,
//! whose default methods describe a plain text input; each type overrides the
//! hooks it needs (type name, default attributes, template, scripts, ...).
//!
//! [`Field::make`] merges call-site options over the type's defaults and
//! produces a [`FieldConfig`], the normalized structure the form renderer
//! consumes.
//!
//! ```
//! use formkit_fields::{opts, Field, PasswordWithReveal, Text};
//! use serde_json::json;
//!
//! let email = Text.make("email", opts(json!({"placeholder": "you@example.com"})));
//! assert_eq!(email.field_type(), "text");
//!
//! let password = PasswordWithReveal.make("password", opts(json!({})));
//! assert_eq!(password.field_type(), "password");
//! assert!(password.template().is_some());
//! ```

pub mod config;
pub mod factory;
pub mod field;
pub mod options;
pub mod password_with_reveal;
pub mod registry;
pub mod template;
pub mod types;
pub mod wrappers;

pub use config::FieldConfig;
pub use factory::FactorySpec;
pub use field::{is_reserved, make_field, make_field_checked, resolve_options, Field, FIELD_OPTIONS};
pub use options::{opts, value_to_text, Options};
pub use password_with_reveal::PasswordWithReveal;
pub use registry::FieldRegistry;
pub use types::{
    Checkbox, Color, Date, Decimal, Email, File, Hidden, Image, Number, Password, Radio,
    Relationship, Select, Tel, Text, TextArea, Time, Url,
};
pub use wrappers::{get_wrappers, WrapperSide};
