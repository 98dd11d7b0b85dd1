//! Rendering of a single resolved field.
//!
//! [`FieldBuilder`] turns a [`FieldConfig`] into markup: the input element
//! for its type, the label, input-group addons, flashed validation errors,
//! and the form-group row around them. CSS classes come from configuration
//! so the markup can target different Bootstrap versions.

use std::collections::HashMap;

use serde_json::Value;

use formkit_core::settings::keys;
use formkit_core::utils::text::escape_html;
use formkit_core::ConfigLookup;
use formkit_fields::template;
use formkit_fields::{value_to_text, FieldConfig, Options};

use crate::session::Session;

/// Form layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Labels above inputs.
    #[default]
    Vertical,
    /// Labels beside inputs, in a grid row.
    Horizontal,
}

/// Renders HTML attributes in insertion order.
///
/// `true` renders the bare attribute name, `false` and `null` omit the
/// attribute, and every other value is HTML-escaped.
///
/// # Examples
///
/// ```
/// use formkit_fields::opts;
/// use formkit_forms::builder::render_attrs;
/// use serde_json::json;
///
/// let attrs = opts(json!({"name": "q", "required": true, "disabled": false, "title": "a\"b"}));
/// assert_eq!(render_attrs(&attrs), r#" name="q" required title="a&quot;b""#);
/// ```
pub fn render_attrs(attrs: &Options) -> String {
    attrs
        .iter()
        .filter_map(|(key, value)| match value {
            Value::Null | Value::Bool(false) => None,
            Value::Bool(true) => Some(format!(" {}", escape_html(key))),
            other => value_to_text(other)
                .map(|text| format!(r#" {}="{}""#, escape_html(key), escape_html(&text))),
        })
        .collect()
}

/// Attribute keys the builder sets itself.
const MANAGED_ATTRIBUTES: &[&str] = &["type", "id", "name", "class", "value", "checked"];

/// Renders individual fields against a session and configuration.
#[derive(Clone, Copy)]
pub struct FieldBuilder<'a> {
    session: &'a dyn Session,
    config: &'a dyn ConfigLookup,
}

impl std::fmt::Debug for FieldBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldBuilder")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl<'a> FieldBuilder<'a> {
    /// Creates a builder reading errors and old input from `session`.
    pub fn new(session: &'a dyn Session, config: &'a dyn ConfigLookup) -> Self {
        Self { session, config }
    }

    fn class(&self, key: &str, default: &str) -> String {
        self.config.config(key, default)
    }

    /// Renders `field`. Invisible fields render as an empty string.
    pub fn render(&self, field: &FieldConfig, orientation: Orientation) -> String {
        if !field.is_visible() {
            return String::new();
        }

        let id = field.id();
        let errors = self.session.errors(field.name());
        let has_errors = !errors.is_empty();

        let input = match field.field_type() {
            "hidden" => return self.input(field, &id, "hidden", false),
            "checkbox" => return self.checkbox(field, &id, &errors, orientation),
            "textarea" => self.textarea(field, &id, has_errors),
            "select" | "relationship" => self.select(field, &id, has_errors),
            "radio" => self.radios(field, &id),
            input_type => self.input(field, &id, input_type, has_errors),
        };
        let input = self.with_addons(field, input);
        let errors = self.errors(&errors);

        let mut label_classes = vec![match orientation {
            Orientation::Vertical => self.class(keys::LABEL_CLASS, "control-label"),
            Orientation::Horizontal => {
                self.class(keys::HORIZONTAL_LABEL_CLASS, "col-md-2 col-form-label")
            }
        }];
        label_classes.extend(field.options().get("label_class").and_then(value_to_text));
        let label_class = join_classes(&label_classes);
        let label_text = field.label_text();
        let label = label_text.as_deref().map_or_else(String::new, |text| {
            format!(
                r#"<label for="{}" class="{}">{}</label>"#,
                escape_html(&id),
                escape_html(&label_class),
                escape_html(text)
            )
        });

        let group_class = self.class(keys::GROUP_CLASS, "form-group");
        let (row_class, field_class) = match orientation {
            Orientation::Vertical => (group_class, String::new()),
            Orientation::Horizontal => (
                join_classes(&[group_class, "row".to_string()]),
                self.class(keys::HORIZONTAL_FIELD_CLASS, "col-md-10"),
            ),
        };

        if let Some(markup) = field.template() {
            let mut tokens = HashMap::new();
            tokens.insert("rowClass", escape_html(&row_class));
            tokens.insert("labelClass", escape_html(&label_class));
            tokens.insert("fieldClass", escape_html(&field_class));
            tokens.insert("id", escape_html(&id));
            tokens.insert("name", label_text.as_deref().map(escape_html).unwrap_or_default());
            tokens.insert("label", label.clone());
            tokens.insert("field", input.clone());
            tokens.insert("errors", errors.clone());
            return template::render(markup, &tokens);
        }

        if !field.has_wrapper() {
            return format!("{label}{input}{errors}");
        }

        match orientation {
            Orientation::Vertical => format!(
                r#"<div class="{}">{label}{input}{errors}</div>"#,
                escape_html(&row_class)
            ),
            Orientation::Horizontal => format!(
                r#"<div class="{}">{label}<div class="{}">{input}{errors}</div></div>"#,
                escape_html(&row_class),
                escape_html(&field_class)
            ),
        }
    }

    /// The value to render: old input first, then the `value` attribute.
    fn value(&self, field: &FieldConfig) -> Option<String> {
        self.session
            .old(field.name())
            .or_else(|| field.attributes().get("value").and_then(value_to_text))
    }

    /// `id`, `name`, and `class` followed by the field's own attributes and
    /// the on-load hook attributes.
    fn attributes(&self, field: &FieldConfig, id: &str, mut classes: Vec<String>) -> Options {
        let mut attrs = Options::new();
        attrs.insert("id".to_string(), Value::String(id.to_string()));
        attrs.insert("name".to_string(), Value::String(field.name().to_string()));

        classes.extend(field.attributes().get("class").and_then(value_to_text));
        let class = join_classes(&classes);
        if !class.is_empty() {
            attrs.insert("class".to_string(), Value::String(class));
        }

        for (key, value) in field.attributes() {
            if !MANAGED_ATTRIBUTES.contains(&key.as_str()) {
                attrs.insert(key.clone(), value.clone());
            }
        }

        let definition = field.field();
        if let Some(function) = definition.on_load_js(id, field.options()) {
            attrs.insert("data-formsjs-onload".to_string(), Value::String(function));
            if let Some(data) = definition.on_load_js_data(id, field.options()) {
                attrs.insert("data-formsjs-onload-data".to_string(), Value::String(data));
            }
        }
        attrs
    }

    fn input_classes(&self, has_errors: bool) -> Vec<String> {
        let mut classes = vec![self.class(keys::INPUT_CLASS, "form-control")];
        if has_errors {
            classes.push(self.class(keys::INVALID_INPUT_CLASS, "is-invalid"));
        }
        classes
    }

    fn input(&self, field: &FieldConfig, id: &str, input_type: &str, has_errors: bool) -> String {
        let classes = if input_type == "hidden" {
            Vec::new()
        } else {
            self.input_classes(has_errors)
        };

        let mut attrs = Options::new();
        attrs.insert("type".to_string(), Value::String(input_type.to_string()));
        attrs.extend(self.attributes(field, id, classes));
        if !matches!(input_type, "password" | "file") {
            if let Some(value) = self.value(field) {
                attrs.insert("value".to_string(), Value::String(value));
            }
        }
        format!("<input{}>", render_attrs(&attrs))
    }

    fn textarea(&self, field: &FieldConfig, id: &str, has_errors: bool) -> String {
        let attrs = self.attributes(field, id, self.input_classes(has_errors));
        let value = self.value(field).unwrap_or_default();
        format!("<textarea{}>{}</textarea>", render_attrs(&attrs), escape_html(&value))
    }

    fn select(&self, field: &FieldConfig, id: &str, has_errors: bool) -> String {
        let mut attrs = self.attributes(field, id, self.input_classes(has_errors));
        let multiple = field.attributes().get("multiple") == Some(&Value::Bool(true));
        if multiple {
            attrs.insert("name".to_string(), Value::String(format!("{}[]", field.name())));
        }

        let selected: Vec<String> = match (self.session.old(field.name()), field.attributes().get("value")) {
            (Some(old), _) => vec![old],
            (None, Some(Value::Array(values))) => values.iter().filter_map(value_to_text).collect(),
            (None, Some(value)) => value_to_text(value).into_iter().collect(),
            (None, None) => Vec::new(),
        };

        let mut html = format!("<select{}>", render_attrs(&attrs));
        let options = field.options();
        let null_value = options.get("null_value").and_then(value_to_text);
        let null_label = options.get("null_label").and_then(value_to_text);
        if null_value.is_some() || null_label.is_some() {
            html.push_str(&format!(
                r#"<option value="{}">{}</option>"#,
                escape_html(&null_value.unwrap_or_default()),
                escape_html(&null_label.unwrap_or_default())
            ));
        }
        for (label, value) in field.choices() {
            let marker = if selected.contains(&value) { " selected" } else { "" };
            html.push_str(&format!(
                r#"<option value="{}"{marker}>{}</option>"#,
                escape_html(&value),
                escape_html(&label)
            ));
        }
        html.push_str("</select>");
        html
    }

    fn check_input_classes(&self, has_errors: bool) -> Vec<String> {
        let mut classes = vec![self.class(keys::CHECK_INPUT_CLASS, "form-check-input")];
        if has_errors {
            classes.push(self.class(keys::INVALID_INPUT_CLASS, "is-invalid"));
        }
        classes
    }

    fn radios(&self, field: &FieldConfig, id: &str) -> String {
        let current = self.value(field);
        let check_class = self.class(keys::CHECK_CLASS, "form-check");
        let label_class = self.class(keys::CHECK_LABEL_CLASS, "form-check-label");
        let has_errors = !self.session.errors(field.name()).is_empty();

        field
            .choices()
            .into_iter()
            .enumerate()
            .map(|(index, (label, value))| {
                let option_id = format!("{id}_{index}");
                let mut attrs = Options::new();
                attrs.insert("type".to_string(), Value::String("radio".to_string()));
                attrs.extend(self.attributes(field, &option_id, self.check_input_classes(has_errors)));
                attrs.insert("checked".to_string(), Value::Bool(current.as_deref() == Some(value.as_str())));
                attrs.insert("value".to_string(), Value::String(value));
                format!(
                    r#"<div class="{}"><input{}><label class="{}" for="{}">{}</label></div>"#,
                    escape_html(&check_class),
                    render_attrs(&attrs),
                    escape_html(&label_class),
                    escape_html(&option_id),
                    escape_html(&label)
                )
            })
            .collect()
    }

    fn checkbox(
        &self,
        field: &FieldConfig,
        id: &str,
        errors: &[String],
        orientation: Orientation,
    ) -> String {
        let value = field
            .attributes()
            .get("value")
            .and_then(value_to_text)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "1".to_string());
        let checked = field.attributes().get("checked") == Some(&Value::Bool(true))
            || self.session.old(field.name()).as_deref() == Some(value.as_str());

        let mut attrs = Options::new();
        attrs.insert("type".to_string(), Value::String("checkbox".to_string()));
        attrs.extend(self.attributes(field, id, self.check_input_classes(!errors.is_empty())));
        attrs.insert("value".to_string(), Value::String(value));
        attrs.insert("checked".to_string(), Value::Bool(checked));

        let label = field.label_text().map_or_else(String::new, |text| {
            format!(
                r#"<label class="{}" for="{}">{}</label>"#,
                escape_html(&self.class(keys::CHECK_LABEL_CLASS, "form-check-label")),
                escape_html(id),
                escape_html(&text)
            )
        });
        let check = format!(
            r#"<div class="{}"><input{}>{label}</div>"#,
            escape_html(&self.class(keys::CHECK_CLASS, "form-check")),
            render_attrs(&attrs)
        );
        let errors = self.errors(errors);

        if !field.has_wrapper() {
            return format!("{check}{errors}");
        }
        let group_class = self.class(keys::GROUP_CLASS, "form-group");
        match orientation {
            Orientation::Vertical => {
                format!(r#"<div class="{}">{check}{errors}</div>"#, escape_html(&group_class))
            }
            Orientation::Horizontal => format!(
                r#"<div class="{} row"><div class="{}">{check}{errors}</div></div>"#,
                escape_html(&group_class),
                escape_html(&self.class(keys::HORIZONTAL_FIELD_CLASS, "col-md-10"))
            ),
        }
    }

    /// Wraps the input with its `before`/`after` addons.
    fn with_addons(&self, field: &FieldConfig, input: String) -> String {
        if field.before().is_none() && field.after().is_none() {
            return input;
        }
        format!(
            r#"<div class="{}">{}{input}{}</div>"#,
            escape_html(&self.class(keys::BEFORE_AFTER_INPUT_WRAPPER, "input-group")),
            field.before().unwrap_or_default(),
            field.after().unwrap_or_default()
        )
    }

    fn errors(&self, errors: &[String]) -> String {
        let class = escape_html(&self.class(keys::INVALID_FEEDBACK, "invalid-feedback"));
        errors
            .iter()
            .map(|message| format!(r#"<div class="{class}">{}</div>"#, escape_html(message)))
            .collect()
    }
}

fn join_classes(classes: &[String]) -> String {
    classes
        .iter()
        .map(|class| class.trim())
        .filter(|class| !class.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
