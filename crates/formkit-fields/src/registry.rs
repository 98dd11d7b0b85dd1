//! Lookup of field types by name.
//!
//! Form definitions declared as data (TOML/JSON) name their field types as
//! strings; the registry maps those names to field definitions.

use std::collections::HashMap;
use std::sync::Arc;

use formkit_core::{ConfigLookup, FormError, FormResult};

use crate::config::FieldConfig;
use crate::field::{make_field, Field};
use crate::options::Options;
use crate::password_with_reveal::PasswordWithReveal;
use crate::types::{
    Checkbox, Color, Date, Decimal, Email, File, Hidden, Image, Number, Password, Radio,
    Relationship, Select, Tel, Text, TextArea, Time, Url,
};

/// A name → field type registry.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: HashMap<String, Arc<dyn Field>>,
}

impl FieldRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in field type.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("text", Text);
        registry.register("email", Email);
        registry.register("url", Url);
        registry.register("tel", Tel);
        registry.register("number", Number);
        registry.register("decimal", Decimal);
        registry.register("date", Date);
        registry.register("time", Time);
        registry.register("color", Color);
        registry.register("password", Password);
        registry.register("password-with-reveal", PasswordWithReveal);
        registry.register("textarea", TextArea);
        registry.register("checkbox", Checkbox);
        registry.register("radio", Radio);
        registry.register("hidden", Hidden);
        registry.register("file", File);
        registry.register("image", Image);
        registry.register("select", Select);
        registry.register("relationship", Relationship);
        registry
    }

    /// Registers `field` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, field: impl Field + 'static) {
        self.register_shared(name, Arc::new(field));
    }

    /// Registers an already shared field definition.
    pub fn register_shared(&mut self, name: impl Into<String>, field: Arc<dyn Field>) {
        self.fields.insert(name.into(), field);
    }

    /// Returns the field type registered under `name`.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Field>> {
        self.fields.get(name).cloned()
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolves field `name` of the registered type `type_name`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownFieldType`] if `type_name` is not registered.
    pub fn make(
        &self,
        type_name: &str,
        name: &str,
        options: Options,
        config: &dyn ConfigLookup,
    ) -> FormResult<FieldConfig> {
        let Some(field) = self.get(type_name) else {
            tracing::warn!(field_type = type_name, field = name, "unknown field type");
            return Err(FormError::UnknownFieldType(type_name.to_string()));
        };
        Ok(make_field(field, name, options, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::opts;
    use formkit_core::Settings;
    use serde_json::json;

    #[derive(Debug)]
    struct Slider;

    impl Field for Slider {
        fn field_type(&self) -> Option<&str> {
            Some("range")
        }
    }

    #[test]
    fn test_builtins_registered() {
        let registry = FieldRegistry::with_builtins();
        for name in ["text", "password-with-reveal", "decimal", "image", "select", "relationship"] {
            assert!(registry.contains(name), "{name} missing");
        }
        assert_eq!(registry.names().len(), 19);
    }

    #[test]
    fn test_make_builtin() {
        let registry = FieldRegistry::with_builtins();
        let config = registry
            .make("password-with-reveal", "pwd", Options::new(), &Settings::default())
            .unwrap();
        assert_eq!(config.field_type(), "password");
        assert!(config.template().is_some());
    }

    #[test]
    fn test_unknown_type() {
        let registry = FieldRegistry::new();
        let err = registry
            .make("wysiwyg", "body", Options::new(), &Settings::default())
            .unwrap_err();
        assert!(matches!(err, FormError::UnknownFieldType(ref t) if t == "wysiwyg"));
    }

    #[test]
    fn test_register_custom_type() {
        let mut registry = FieldRegistry::with_builtins();
        registry.register("slider", Slider);
        let config = registry
            .make("slider", "volume", opts(json!({"min": 0})), &Settings::default())
            .unwrap();
        assert_eq!(config.field_type(), "range");
        assert_eq!(config.attributes()["min"], 0);
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = FieldRegistry::new();
        registry.register("text", Text);
        registry.register("text", Slider);
        assert_eq!(registry.get("text").unwrap().field_type(), Some("range"));
    }
}
