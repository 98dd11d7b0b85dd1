//! Form assembly.
//!
//! A form is declared by implementing [`FormDefinition`]: the fields plus
//! whatever form-level settings differ from the defaults. [`BaseForm`] wires
//! the definition to a [`FormContext`] (URL generator, session, settings)
//! and [`BaseForm::make`] renders the complete `<form>` element.
//!
//! ```
//! use formkit_core::Settings;
//! use formkit_fields::{opts, Field, FieldConfig, Email, Text};
//! use formkit_forms::{BaseForm, FormContext, FormDefinition, MemorySession, RouteTable};
//! use serde_json::json;
//!
//! struct ContactForm;
//!
//! impl FormDefinition for ContactForm {
//!     fn fields(&self) -> Vec<FieldConfig> {
//!         vec![
//!             Text.make("name", opts(json!({"required": true}))),
//!             Email.make("email", opts(json!({}))),
//!         ]
//!     }
//! }
//!
//! let routes = RouteTable::new().with_route("contact.send", "/contact/");
//! let context = FormContext::new(routes, MemorySession::new()).with_settings(Settings::default());
//!
//! let mut form = BaseForm::new(ContactForm, context);
//! form.set_route("contact.send", ());
//! let html = form.make().unwrap().html();
//!
//! assert!(html.starts_with(r#"<form method="POST" action="/contact/""#));
//! assert!(html.ends_with("</form>"));
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use http::Method;
use serde_json::Value;

use formkit_core::logging::render_span;
use formkit_core::settings::{keys, with_override};
use formkit_core::{ConfigLookup, FormError, FormResult, Settings, SETTINGS};
use formkit_fields::FieldConfig;

use crate::assets::FormAssets;
use crate::builder::Orientation;
use crate::form_maker::{FormMaker, Section};
use crate::html_form::{ButtonLinks, Buttons, FormOpen, HtmlForm};
use crate::session::Session;
use crate::url::UrlGenerator;

/// A form declaration. Only [`FormDefinition::fields`] is required.
pub trait FormDefinition: Send + Sync {
    /// The fields, in render order.
    ///
    /// [`BaseForm::make`] calls this with the context's settings in effect,
    /// so `Field::make` resolves wrappers against them.
    fn fields(&self) -> Vec<FieldConfig>;

    /// A name for log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Route name followed by its parameters. Empty posts to the current URL.
    fn route(&self) -> Vec<Value> {
        Vec::new()
    }

    fn method(&self) -> Method {
        Method::POST
    }

    fn orientation(&self) -> Option<Orientation> {
        None
    }

    fn with_js_validation(&self) -> Option<bool> {
        None
    }

    fn form_class(&self) -> Option<String> {
        None
    }

    fn form_id(&self) -> Option<String> {
        None
    }

    fn columns(&self) -> usize {
        1
    }

    /// Field grouping. Empty renders all fields in one untitled section.
    fn sections(&self) -> Vec<Section> {
        Vec::new()
    }

    fn buttons(&self) -> Buttons {
        Buttons::default()
    }

    /// Button targets; an unset cancel link defaults to the current URL.
    fn button_links(&self) -> ButtonLinks {
        ButtonLinks::default()
    }

    /// Forces a multipart form. File fields switch it on regardless.
    fn has_files(&self) -> bool {
        false
    }

    /// Form-level JavaScript emitted with the form's scripts.
    fn scripts(&self) -> Option<String> {
        None
    }
}

/// The request-scoped collaborators a form renders against.
#[derive(Debug, Clone)]
pub struct FormContext {
    pub url: Arc<dyn UrlGenerator>,
    pub session: Arc<dyn Session>,
    pub settings: Settings,
}

impl FormContext {
    /// Creates a context using the current global settings.
    pub fn new(url: impl UrlGenerator + 'static, session: impl Session + 'static) -> Self {
        Self {
            url: Arc::new(url),
            session: Arc::new(session),
            settings: SETTINGS.current(),
        }
    }

    /// Replaces the settings.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }
}

/// Route parameters: a list, or a single scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteParameters {
    List(Vec<Value>),
    Single(Value),
}

impl From<()> for RouteParameters {
    fn from((): ()) -> Self {
        Self::List(Vec::new())
    }
}

impl<T: Into<Value>> From<Vec<T>> for RouteParameters {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for RouteParameters {
    fn from(values: [T; N]) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<Value> for RouteParameters {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(values) => Self::List(values),
            other => Self::Single(other),
        }
    }
}

macro_rules! scalar_route_parameter {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RouteParameters {
                fn from(value: $ty) -> Self {
                    Self::Single(Value::from(value))
                }
            }
        )*
    };
}

scalar_route_parameter!(i32, i64, u32, u64, &str, String);

/// A form bound to its rendering context.
pub struct BaseForm {
    definition: Box<dyn FormDefinition>,
    context: FormContext,
    builder: FormMaker,
    route: Vec<Value>,
    method: Method,
    orientation: Option<Orientation>,
    form_class: Option<String>,
    form_id: Option<String>,
    columns: usize,
    has_files: bool,
    buttons: Buttons,
    button_links: ButtonLinks,
    html: String,
    rendered_fields: String,
}

impl fmt::Debug for BaseForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseForm")
            .field("definition", &self.definition.name())
            .field("route", &self.route)
            .field("method", &self.method)
            .field("orientation", &self.orientation)
            .field("form_class", &self.form_class)
            .field("form_id", &self.form_id)
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

impl BaseForm {
    /// Binds `definition` to `context`.
    ///
    /// The cancel link defaults to the current URL, and the definition's
    /// orientation, js-validation flag, and scripts are handed to the
    /// form maker when set.
    pub fn new(definition: impl FormDefinition + 'static, context: FormContext) -> Self {
        let mut builder = FormMaker::new();
        if let Some(orientation) = definition.orientation() {
            builder.set_orientation(orientation);
        }
        if let Some(enabled) = definition.with_js_validation() {
            builder.set_js_validation(enabled);
        }
        if let Some(js) = definition.scripts() {
            builder.set_form_js(js);
        }

        let mut button_links = definition.button_links();
        if button_links.cancel.is_none() {
            button_links.cancel = Some(context.url.current());
        }

        Self {
            route: definition.route(),
            method: definition.method(),
            orientation: definition.orientation(),
            form_class: definition.form_class(),
            form_id: definition.form_id(),
            columns: definition.columns(),
            has_files: definition.has_files(),
            buttons: definition.buttons(),
            button_links,
            definition: Box::new(definition),
            context,
            builder,
            html: String::new(),
            rendered_fields: String::new(),
        }
    }

    /// Sets the route: `[name, ...parameters]` for a list, `[name, parameter]`
    /// for a single value.
    pub fn set_route(
        &mut self,
        name: impl Into<String>,
        parameters: impl Into<RouteParameters>,
    ) -> &mut Self {
        let mut route = vec![Value::String(name.into())];
        match parameters.into() {
            RouteParameters::List(values) => route.extend(values),
            RouteParameters::Single(value) => route.push(value),
        }
        self.route = route;
        self
    }

    pub fn set_method(&mut self, method: Method) -> &mut Self {
        self.method = method;
        self
    }

    pub fn set_form_class(&mut self, class: impl Into<String>) -> &mut Self {
        self.form_class = Some(class.into());
        self
    }

    pub fn set_form_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.form_id = Some(id.into());
        self
    }

    /// Renders the form.
    ///
    /// # Errors
    ///
    /// [`FormError::NoReverseMatch`] when the route cannot be resolved, and
    /// [`FormError::ConfigurationError`] when the definition declares no
    /// fields, an empty field name, or the same name twice.
    pub fn make(&mut self) -> FormResult<&mut Self> {
        let span = render_span(self.definition.name());
        let _guard = span.enter();

        if self.orientation == Some(Orientation::Horizontal) {
            let configured = self.context.settings.lookup(keys::HORIZONTAL_CLASS);
            if self.form_class == configured {
                self.form_class = Some(
                    self.context
                        .settings
                        .config(keys::HORIZONTAL_CLASS, "form-horizontal"),
                );
            }
        }

        self.builder.set_sections(self.definition.sections());

        // Fields resolved with `Field::make` read the context's settings.
        let declared = with_override(self.context.settings.clone(), || self.definition.fields());
        let fields = self.parse_fields(declared)?;
        let files = self.has_files || fields.iter().any(FieldConfig::is_file);

        let form = HtmlForm::new(
            self.context.url.as_ref(),
            self.context.session.as_ref(),
            &self.context.settings,
        );
        let mut html = form.open(&FormOpen {
            route: &self.route,
            method: &self.method,
            files,
            class: self.form_class.as_deref(),
            id: self.form_id.as_deref(),
        })?;

        self.rendered_fields = self.builder.set_columns(self.columns).from_fields(
            &fields,
            self.context.session.as_ref(),
            &self.context.settings,
        );
        html.push_str(&self.rendered_fields);
        html.push_str(&form.buttons_and_close(&self.buttons, &self.button_links));
        self.html = html;

        tracing::debug!(fields = fields.len(), files, "rendered form");
        Ok(self)
    }

    fn parse_fields(&self, fields: Vec<FieldConfig>) -> FormResult<Vec<FieldConfig>> {
        if fields.is_empty() {
            return Err(FormError::ConfigurationError(format!(
                "form '{}' declares no fields",
                self.definition.name()
            )));
        }

        let mut seen = HashSet::new();
        for field in &fields {
            if field.name().trim().is_empty() {
                return Err(FormError::ConfigurationError(
                    "field names must not be empty".to_string(),
                ));
            }
            if !seen.insert(field.name()) {
                return Err(FormError::ConfigurationError(format!(
                    "field '{}' is declared twice",
                    field.name()
                )));
            }
        }
        Ok(fields)
    }

    /// The complete form markup from the last [`BaseForm::make`].
    pub fn html(&self) -> &str {
        &self.html
    }

    /// The rendered fields alone.
    pub fn rendered_fields(&self) -> &str {
        &self.rendered_fields
    }

    pub fn route(&self) -> &[Value] {
        &self.route
    }

    pub const fn method(&self) -> &Method {
        &self.method
    }

    pub const fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    pub fn form_class(&self) -> Option<&str> {
        self.form_class.as_deref()
    }

    pub fn form_id(&self) -> Option<&str> {
        self.form_id.as_deref()
    }

    pub const fn buttons(&self) -> &Buttons {
        &self.buttons
    }

    pub const fn button_links(&self) -> &ButtonLinks {
        &self.button_links
    }

    pub const fn maker(&self) -> &FormMaker {
        &self.builder
    }

    pub const fn context(&self) -> &FormContext {
        &self.context
    }

    /// Assets required by the fields of the last render.
    pub const fn assets(&self) -> &FormAssets {
        self.builder.assets()
    }

    pub fn render_styles(&self) -> String {
        self.assets().render_styles()
    }

    pub fn render_scripts(&self) -> String {
        self.assets().render_scripts()
    }
}

impl fmt::Display for BaseForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}
