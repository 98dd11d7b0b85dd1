//! # formkit-forms
//!
//! Form assembly for formkit. A form implements [`FormDefinition`] (its
//! fields and form-level settings); [`BaseForm`] binds it to a
//! [`FormContext`] and renders the complete `<form>` element:
//!
//! - [`HtmlForm`] renders the opening tag (action URL, CSRF token, method
//!   spoofing, multipart encoding) and the button row with the closing tag.
//! - [`FormMaker`] lays the fields out in sections and columns and collects
//!   the page assets they need ([`FormAssets`]).
//! - [`FieldBuilder`] renders each resolved field.
//!
//! URL generation and session access are traits ([`UrlGenerator`],
//! [`Session`]) so a web framework can plug in its own router and session
//! store; [`RouteTable`] and [`MemorySession`] are in-process
//! implementations.

pub mod assets;
pub mod base_form;
pub mod builder;
pub mod form_maker;
pub mod html_form;
pub mod session;
pub mod url;

pub use assets::FormAssets;
pub use base_form::{BaseForm, FormContext, FormDefinition, RouteParameters};
pub use builder::{render_attrs, FieldBuilder, Orientation};
pub use form_maker::{FormMaker, Section};
pub use html_form::{ButtonLinks, Buttons, FormOpen, HtmlForm};
pub use session::{MemorySession, Session};
pub use url::{RouteTable, UrlGenerator};
