//! The option map shared by field definitions and resolved field configs.
//!
//! Options are an insertion-ordered map of JSON values, so select choices
//! and HTML attributes keep the order they were declared in.

use serde_json::Value;

/// An insertion-ordered `String -> JSON value` map.
pub type Options = serde_json::Map<String, Value>;

/// Converts a JSON value into an option map.
///
/// Objects are taken as-is; any other value yields an empty map.
///
/// ```
/// use formkit_fields::opts;
/// use serde_json::json;
///
/// let options = opts(json!({"label": "E-mail", "required": true}));
/// assert_eq!(options.len(), 2);
/// assert!(opts(json!(null)).is_empty());
/// ```
pub fn opts(value: Value) -> Options {
    match value {
        Value::Object(map) => map,
        _ => Options::new(),
    }
}

/// Renders an option value as text, the way it would be printed into markup.
///
/// `null` yields `None`; strings are returned verbatim, numbers in their
/// canonical form, `true` as `"1"` and `false` as `""`. Arrays and objects
/// are rendered as compact JSON.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        other => Some(other.to_string()),
    }
}

/// Returns the string stored under `key`, if it is a string.
pub fn get_str<'a>(options: &'a Options, key: &str) -> Option<&'a str> {
    options.get(key).and_then(Value::as_str)
}

/// Returns the map stored under `key`, if it is an object.
pub fn get_object<'a>(options: &'a Options, key: &str) -> Option<&'a Options> {
    options.get(key).and_then(Value::as_object)
}
