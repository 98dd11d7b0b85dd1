//! The [`Field`] trait and option resolution.
//!
//! A field type describes defaults (type name, options, HTML attributes,
//! select choices) and optional markup/script hooks. Resolution merges the
//! caller's options over those defaults and splits the result into the
//! structure a renderer consumes:
//!
//! - keys listed in [`FIELD_OPTIONS`] (plus the type's own
//!   [`Field::field_options`]) are field options and never become HTML
//!   attributes;
//! - every other key is an HTML attribute, and for types other than
//!   `select`/`relationship` it is also copied into the nested `options` map.
//!
//! The copy into `options` means a non-reserved key shows up twice, once
//! under `options.options` and once under `options.attributes`. Renderers
//! rely on the nested copy for select-like hints, so it is kept.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use formkit_core::{ConfigLookup, FormError, FormResult, SETTINGS};

use crate::config::FieldConfig;
use crate::options::Options;
use crate::wrappers::{get_wrappers, WrapperSide};

/// Option keys that configure the field itself rather than its HTML element.
pub const FIELD_OPTIONS: &[&str] = &[
    "type",
    "options",
    "legend",
    "label",
    "model",
    "null_value",
    "null_label",
    "model_options",
    "before",
    "after",
    "view",
    "attributes",
    "visible",
    "sortable",
    "wrapper",
    "table_class",
    "label_class",
    "template",
    "factory",
    "group_option_key",
    "group_option_value",
];

/// Field types whose `options` map holds choices and must not collect
/// stray attributes.
const CHOICE_TYPES: &[&str] = &["relationship", "select"];

/// A form field type.
///
/// Every hook has a default describing a plain text input. Implementors
/// override what differs:
///
/// ```
/// use formkit_fields::{Field, Options};
/// use serde_json::json;
///
/// #[derive(Debug)]
/// struct Percentage;
///
/// impl Field for Percentage {
///     fn field_type(&self) -> Option<&str> {
///         Some("number")
///     }
///
///     fn attributes(&self) -> Options {
///         formkit_fields::opts(json!({"min": 0, "max": 100}))
///     }
/// }
///
/// let config = Percentage.make("discount", formkit_fields::opts(json!({"after": "%"})));
/// assert_eq!(config.field_type(), "number");
/// assert_eq!(config.attributes()["max"], 100);
/// ```
pub trait Field: Send + Sync + fmt::Debug {
    /// The input type. `None` falls back to `"text"`.
    fn field_type(&self) -> Option<&str> {
        Some("text")
    }

    /// The test-data factory spec, e.g. `text(50)`.
    fn factory(&self) -> String {
        "text(50)".to_string()
    }

    /// Default options, overridden key by key by the caller's options.
    fn options(&self) -> Options {
        Options::new()
    }

    /// Default choices for select-like rendering.
    fn select_options(&self) -> Options {
        Options::new()
    }

    /// Default HTML attributes, overridden by the caller's attribute keys.
    fn attributes(&self) -> Options {
        Options::new()
    }

    /// Extra option keys that must not be rendered as HTML attributes.
    fn field_options(&self) -> &[&str] {
        &[]
    }

    /// Path of a custom view used to render the field.
    fn view(&self) -> Option<String> {
        None
    }

    /// Markup template with `{token}` placeholders (`{rowClass}`,
    /// `{labelClass}`, `{fieldClass}`, `{id}`, `{name}`, `{label}`,
    /// `{field}`, `{errors}`), given the resolved options.
    fn template(&self, _options: &Options) -> Option<String> {
        None
    }

    /// Stylesheet URLs the field needs on the page.
    fn stylesheets(&self, _options: &Options) -> Vec<String> {
        Vec::new()
    }

    /// Inline CSS for the field instance with the given element id.
    fn styles(&self, _id: &str, _options: &Options) -> Option<String> {
        None
    }

    /// Script URLs the field needs on the page.
    fn scripts(&self, _options: &Options) -> Vec<String> {
        Vec::new()
    }

    /// One-time JavaScript definitions for the field type.
    ///
    /// Write these as a named global function taking the element, e.g.
    /// `_formsjs_myField = function (element) { ... }`, so the on-load hook
    /// can call it both on page load and when markup is injected later.
    fn js(&self, _id: &str, _options: &Options) -> Option<String> {
        None
    }

    /// Name of the global function to call when the element enters the DOM.
    fn on_load_js(&self, _id: &str, _options: &Options) -> Option<String> {
        None
    }

    /// Data handed to the on-load function through the
    /// `data-formsjs-onload-data` attribute.
    fn on_load_js_data(&self, _id: &str, _options: &Options) -> Option<String> {
        None
    }

    /// Resolves a field config using the current global settings.
    fn make(self, name: &str, options: Options) -> FieldConfig
    where
        Self: Sized + 'static,
    {
        self.make_with(name, options, &SETTINGS.current())
    }

    /// Resolves a field config against an explicit configuration context.
    fn make_with(self, name: &str, options: Options, config: &dyn ConfigLookup) -> FieldConfig
    where
        Self: Sized + 'static,
    {
        make_field(Arc::new(self), name, options, config)
    }

    /// Like [`Field::make_with`], but rejects an empty name and non-string
    /// markup options instead of stringifying them.
    fn make_checked(
        self,
        name: &str,
        options: Options,
        config: &dyn ConfigLookup,
    ) -> FormResult<FieldConfig>
    where
        Self: Sized + 'static,
    {
        make_field_checked(Arc::new(self), name, options, config)
    }
}

/// Returns `true` if `key` is a field option for `field`.
pub fn is_reserved(field: &dyn Field, key: &str) -> bool {
    FIELD_OPTIONS.contains(&key) || field.field_options().contains(&key)
}

/// Resolves a shared field definition into a [`FieldConfig`].
pub fn make_field(
    field: Arc<dyn Field>,
    name: &str,
    options: Options,
    config: &dyn ConfigLookup,
) -> FieldConfig {
    let resolved = resolve_options(field.as_ref(), options, config);
    tracing::debug!(
        field = name,
        field_type = resolved.get("type").and_then(serde_json::Value::as_str).unwrap_or("text"),
        "resolved field options"
    );
    FieldConfig::new(name, resolved, field)
}

/// Checked variant of [`make_field`].
pub fn make_field_checked(
    field: Arc<dyn Field>,
    name: &str,
    options: Options,
    config: &dyn ConfigLookup,
) -> FormResult<FieldConfig> {
    if name.trim().is_empty() {
        return Err(FormError::invalid_option("name", "field name must not be empty"));
    }
    for key in ["before", "after", "view", "template"] {
        match options.get(key) {
            None | Some(Value::Null | Value::String(_)) => {}
            Some(other) => {
                return Err(FormError::invalid_option(
                    key,
                    format!("expected a string, got {other}"),
                ));
            }
        }
    }
    Ok(make_field(field, name, options, config))
}

/// Merges caller options over the field's defaults and derives the
/// resolved option map: `type`, `options`, `before`, `after`, `view`,
/// `template`, `attributes`, and `factory`, alongside every merged key.
pub fn resolve_options(field: &dyn Field, options: Options, config: &dyn ConfigLookup) -> Options {
    let mut resolved = field.options();
    resolved.extend(options);

    let field_type = field.field_type().unwrap_or("text").to_string();
    resolved.insert("type".to_string(), Value::String(field_type.clone()));

    if !CHOICE_TYPES.contains(&field_type.as_str()) {
        let extra: Vec<(String, Value)> = resolved
            .iter()
            .filter(|(key, _)| !is_reserved(field, key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        if !extra.is_empty() {
            let mut nested = match resolved.get("options") {
                Some(Value::Object(map)) => map.clone(),
                Some(Value::Array(items)) => items
                    .iter()
                    .enumerate()
                    .map(|(index, value)| (index.to_string(), value.clone()))
                    .collect(),
                _ => Options::new(),
            };
            nested.extend(extra);
            resolved.insert("options".to_string(), Value::Object(nested));
        }
    }

    // An explicit choice map always wins over the type's default choices.
    let choices = match resolved.get("options") {
        Some(value) if !value.is_null() => value.clone(),
        _ => Value::Object(field.select_options()),
    };
    resolved.insert("options".to_string(), choices);

    let before = get_wrappers(&resolved, WrapperSide::Before, config);
    let after = get_wrappers(&resolved, WrapperSide::After, config);
    resolved.insert("before".to_string(), before.map_or(Value::Null, Value::String));
    resolved.insert("after".to_string(), after.map_or(Value::Null, Value::String));

    let view = field.view();
    resolved.insert("view".to_string(), view.map_or(Value::Null, Value::String));

    let template = field.template(&resolved);
    resolved.insert("template".to_string(), template.map_or(Value::Null, Value::String));

    let attributes = parse_attributes(field, &resolved);
    resolved.insert("attributes".to_string(), Value::Object(attributes));
    resolved.insert("factory".to_string(), Value::String(field.factory()));

    resolved
}

/// Strips field options from the merged map and lays what remains over the
/// field's default attributes.
fn parse_attributes(field: &dyn Field, resolved: &Options) -> Options {
    let mut attributes = field.attributes();
    for (key, value) in resolved {
        if !is_reserved(field, key) {
            attributes.insert(key.clone(), value.clone());
        }
    }
    attributes
}
