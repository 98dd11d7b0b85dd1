//! URL generation for form actions and cancel links.
//!
//! Forms name their action by route name plus parameters; a
//! [`UrlGenerator`] turns that into a URL. [`RouteTable`] is a small
//! in-process implementation over `name -> template` pairs, where templates
//! use angle-bracket placeholders such as `users/<int:id>/edit/`.

use std::collections::HashMap;
use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};
use serde_json::Value;

use formkit_core::{FormError, FormResult};
use formkit_fields::value_to_text;

/// Characters escaped inside a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Characters escaped inside a query key or value.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Builds URLs for named routes.
pub trait UrlGenerator: Send + Sync + fmt::Debug {
    /// Returns the URL for route `name` with the given parameters.
    ///
    /// Scalar parameters fill placeholders in order; an object parameter
    /// supplies placeholders by name.
    fn route(&self, name: &str, parameters: &[Value]) -> FormResult<String>;

    /// Returns the URL of the current request.
    fn current(&self) -> String;
}

/// A `name -> template` route table.
///
/// # Examples
///
/// ```
/// use formkit_forms::{RouteTable, UrlGenerator};
/// use serde_json::json;
///
/// let routes = RouteTable::new()
///     .with_route("users.update", "/users/<int:id>/")
///     .with_current("/users/5/edit/");
///
/// assert_eq!(routes.route("users.update", &[json!(5)]).unwrap(), "/users/5/");
/// assert_eq!(routes.current(), "/users/5/edit/");
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: HashMap<String, String>,
    current: String,
}

impl RouteTable {
    /// Creates an empty table whose current URL is `/`.
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            current: "/".to_string(),
        }
    }

    /// Adds a named route.
    #[must_use]
    pub fn with_route(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.add(name, template);
        self
    }

    /// Sets the URL reported by [`UrlGenerator::current`].
    #[must_use]
    pub fn with_current(mut self, current: impl Into<String>) -> Self {
        self.current = current.into();
        self
    }

    /// Adds or replaces a named route.
    pub fn add(&mut self, name: impl Into<String>, template: impl Into<String>) {
        self.routes.insert(name.into(), template.into());
    }

    /// Returns the template registered for `name`.
    pub fn template(&self, name: &str) -> Option<&str> {
        self.routes.get(name).map(String::as_str)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlGenerator for RouteTable {
    fn route(&self, name: &str, parameters: &[Value]) -> FormResult<String> {
        let template = self
            .template(name)
            .ok_or_else(|| FormError::NoReverseMatch(name.to_string()))?;

        let mut named = serde_json::Map::new();
        let mut positional = Vec::new();
        for parameter in parameters {
            match parameter {
                Value::Object(map) => named.extend(map.clone()),
                Value::Null => {}
                other => positional.extend(value_to_text(other)),
            }
        }

        let (path, used) = substitute(name, template, &named, &positional)?;

        let query: Vec<String> = named
            .iter()
            .filter(|(key, _)| !used.contains(*key))
            .filter_map(|(key, value)| {
                value_to_text(value).map(|value| {
                    format!(
                        "{}={}",
                        utf8_percent_encode(key, QUERY_COMPONENT),
                        utf8_percent_encode(&value, QUERY_COMPONENT)
                    )
                })
            })
            .collect();

        if query.is_empty() {
            Ok(path)
        } else {
            Ok(format!("{path}?{}", query.join("&")))
        }
    }

    fn current(&self) -> String {
        self.current.clone()
    }
}

/// Fills `<name>` / `<type:name>` placeholders; returns the path and the
/// names taken from `named`.
fn substitute(
    route: &str,
    template: &str,
    named: &serde_json::Map<String, Value>,
    positional: &[String],
) -> FormResult<(String, Vec<String>)> {
    let mut result = String::new();
    let mut used = Vec::new();
    let mut remaining = template;
    let mut index = 0;

    while let Some(start) = remaining.find('<') {
        result.push_str(&remaining[..start]);

        let end = remaining[start..].find('>').ok_or_else(|| {
            FormError::ImproperlyConfigured(format!(
                "Unclosed angle bracket in route template: {template}"
            ))
        })? + start;

        let inner = &remaining[start + 1..end];
        let parameter = inner.find(':').map_or(inner, |pos| &inner[pos + 1..]);

        let value = if let Some(value) = named.get(parameter).and_then(value_to_text) {
            used.push(parameter.to_string());
            value
        } else if let Some(value) = positional.get(index) {
            index += 1;
            value.clone()
        } else {
            return Err(FormError::NoReverseMatch(format!(
                "{route} (missing parameter '{parameter}')"
            )));
        };
        result.push_str(&utf8_percent_encode(&value, PATH_SEGMENT).to_string());

        remaining = &remaining[end + 1..];
    }
    result.push_str(remaining);

    if index < positional.len() {
        tracing::debug!(
            route,
            surplus = positional.len() - index,
            "ignoring surplus route parameters"
        );
    }

    Ok((result, used))
}
