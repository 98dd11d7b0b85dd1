//! Resolved field configurations.
//!
//! A [`FieldConfig`] is what [`Field::make`](crate::Field::make) returns: the
//! field name, its fully resolved option map, and the field definition that
//! produced it (kept for the asset and script hooks). The fluent modifiers
//! adjust a config after resolution:
//!
//! ```
//! use formkit_fields::{Field, Options, Text};
//!
//! let config = Text
//!     .make("email", Options::new())
//!     .label("E-mail address")
//!     .placeholder("you@example.com")
//!     .required(true);
//!
//! assert_eq!(config.label_text().as_deref(), Some("E-mail address"));
//! assert_eq!(config.attributes()["required"], true);
//! ```

use std::sync::{Arc, OnceLock};

use serde_json::Value;

use formkit_core::utils::text::humanize;

use crate::field::Field;
use crate::options::{get_object, get_str, value_to_text, Options};

fn empty_options() -> &'static Options {
    static EMPTY: OnceLock<Options> = OnceLock::new();
    EMPTY.get_or_init(Options::new)
}

/// A field resolved for rendering.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    name: String,
    options: Options,
    field: Arc<dyn Field>,
}

/// Two configs are equal when their names and resolved options are; the
/// field definition is compared through its resolved type only.
impl PartialEq for FieldConfig {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.options == other.options
    }
}

impl FieldConfig {
    /// Wraps an already resolved option map.
    pub fn new(name: impl Into<String>, options: Options, field: Arc<dyn Field>) -> Self {
        Self {
            name: name.into(),
            options,
            field,
        }
    }

    /// The field name (HTML `name` attribute).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full resolved option map.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The field definition this config was resolved from.
    pub fn field(&self) -> &dyn Field {
        self.field.as_ref()
    }

    /// The resolved input type.
    pub fn field_type(&self) -> &str {
        get_str(&self.options, "type").unwrap_or("text")
    }

    /// The residual HTML attributes.
    pub fn attributes(&self) -> &Options {
        get_object(&self.options, "attributes").unwrap_or_else(|| empty_options())
    }

    /// The nested `options` map (select choices plus copied hints).
    pub fn select_options(&self) -> &Options {
        get_object(&self.options, "options").unwrap_or_else(|| empty_options())
    }

    /// Choices as `(label, value)` pairs.
    ///
    /// Object maps are read as `label => value`; lists use each entry as
    /// both label and value. A list merged with copied attributes becomes a
    /// map keyed by position, so an entry whose key is its own index is
    /// read as a list entry. Entries that mirror an HTML attribute (copied
    /// there during resolution) are not choices and are skipped.
    pub fn choices(&self) -> Vec<(String, String)> {
        let attributes = self.attributes();
        match self.options.get("options") {
            Some(Value::Object(map)) => map
                .iter()
                .enumerate()
                .filter(|(_, (label, value))| attributes.get(label.as_str()) != Some(value))
                .map(|(index, (label, value))| {
                    let value = value_to_text(value).unwrap_or_default();
                    if label.parse::<usize>() == Ok(index) {
                        (value.clone(), value)
                    } else {
                        (label.clone(), value)
                    }
                })
                .collect(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(value_to_text)
                .map(|item| (item.clone(), item))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Precomputed markup placed before the input.
    pub fn before(&self) -> Option<&str> {
        get_str(&self.options, "before")
    }

    /// Precomputed markup placed after the input.
    pub fn after(&self) -> Option<&str> {
        get_str(&self.options, "after")
    }

    /// Custom view path.
    pub fn view(&self) -> Option<&str> {
        get_str(&self.options, "view")
    }

    /// Custom markup template.
    pub fn template(&self) -> Option<&str> {
        get_str(&self.options, "template")
    }

    /// The test-data factory spec.
    pub fn factory(&self) -> &str {
        get_str(&self.options, "factory").unwrap_or("text(50)")
    }

    /// The element id: the `id` attribute when set, else the field name.
    pub fn id(&self) -> String {
        self.attributes()
            .get("id")
            .and_then(value_to_text)
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| self.name.clone())
    }

    /// The label text. An explicit `label => false` hides the label;
    /// otherwise the name is humanized.
    pub fn label_text(&self) -> Option<String> {
        match self.options.get("label") {
            Some(Value::Bool(false)) => None,
            Some(Value::String(label)) => Some(label.clone()),
            _ => Some(humanize(&self.name)),
        }
    }

    /// Whether the field renders at all (`visible` defaults to `true`).
    pub fn is_visible(&self) -> bool {
        !matches!(self.options.get("visible"), Some(Value::Bool(false)))
    }

    /// Whether the field is wrapped in its form-group row
    /// (`wrapper` defaults to `true`).
    pub fn has_wrapper(&self) -> bool {
        !matches!(self.options.get("wrapper"), Some(Value::Bool(false)))
    }

    /// Whether the field renders a file input.
    pub fn is_file(&self) -> bool {
        self.field_type() == "file"
    }

    // ── Fluent modifiers ─────────────────────────────────────────────

    /// Sets an HTML attribute.
    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut attributes = self.attributes().clone();
        attributes.insert(key.into(), value.into());
        self.options
            .insert("attributes".to_string(), Value::Object(attributes));
        self
    }

    /// Sets a field option (no effect on attributes).
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Sets the label text.
    #[must_use]
    pub fn label(self, label: impl Into<String>) -> Self {
        self.option("label", label.into())
    }

    /// Sets the label's CSS class.
    #[must_use]
    pub fn label_class(self, class: impl Into<String>) -> Self {
        self.option("label_class", class.into())
    }

    /// Sets the `placeholder` attribute.
    #[must_use]
    pub fn placeholder(self, placeholder: impl Into<String>) -> Self {
        self.attribute("placeholder", placeholder.into())
    }

    /// Sets the `class` attribute.
    #[must_use]
    pub fn css_class(self, class: impl Into<String>) -> Self {
        self.attribute("class", class.into())
    }

    /// Sets the `value` attribute.
    #[must_use]
    pub fn value(self, value: impl Into<Value>) -> Self {
        self.attribute("value", value)
    }

    /// Toggles the `required` attribute.
    #[must_use]
    pub fn required(self, required: bool) -> Self {
        self.attribute("required", required)
    }

    /// Toggles the `disabled` attribute.
    #[must_use]
    pub fn disabled(self, disabled: bool) -> Self {
        self.attribute("disabled", disabled)
    }

    /// Toggles the `readonly` attribute.
    #[must_use]
    pub fn readonly(self, readonly: bool) -> Self {
        self.attribute("readonly", readonly)
    }

    /// Replaces the select choices.
    #[must_use]
    pub fn choices_from(self, choices: Options) -> Self {
        self.option("options", Value::Object(choices))
    }

    /// Toggles the form-group wrapper.
    #[must_use]
    pub fn wrapper(self, wrapper: bool) -> Self {
        self.option("wrapper", wrapper)
    }

    /// Toggles rendering of the field.
    #[must_use]
    pub fn visible(self, visible: bool) -> Self {
        self.option("visible", visible)
    }

    /// Marks the field as sortable in tabular listings.
    #[must_use]
    pub fn sortable(self, sortable: bool) -> Self {
        self.option("sortable", sortable)
    }
}
