//! Settings override utility for tests.
//!
//! [`override_settings`] swaps the effective formkit [`Settings`] for the
//! duration of a closure, then restores the previous ones. Overrides live
//! on a thread-local stack, so nested overrides compose and parallel tests
//! do not see each other's settings.
//!
//! ## Example
//!
//! ```
//! use formkit_core::SETTINGS;
//! use formkit_test::override_settings::{override_settings, SettingsOverride};
//!
//! override_settings(SettingsOverride::new().set_bootstrap_version("5"), || {
//!     let settings = SETTINGS.current();
//!     assert_eq!(settings.forms.bootstrap_version.as_deref(), Some("5"));
//! });
//! ```

use formkit_core::settings::with_override;
use formkit_core::Settings;

/// A builder for the settings to apply.
///
/// Starts from [`Settings::default()`] and allows selective modification.
#[derive(Debug, Clone)]
pub struct SettingsOverride {
    settings: Settings,
}

impl Default for SettingsOverride {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsOverride {
    /// Creates a new override builder starting from default settings.
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
        }
    }

    /// Creates a new override builder starting from the given settings.
    pub const fn from_settings(settings: Settings) -> Self {
        Self { settings }
    }

    /// Sets the `debug` flag.
    #[must_use]
    pub const fn set_debug(mut self, debug: bool) -> Self {
        self.settings.debug = debug;
        self
    }

    /// Sets `forms.bootstrap-version`.
    #[must_use]
    pub fn set_bootstrap_version(mut self, version: &str) -> Self {
        self.settings.forms.bootstrap_version = Some(version.to_string());
        self
    }

    /// Sets `forms.form.horizontal-class`.
    #[must_use]
    pub fn set_horizontal_class(mut self, class: &str) -> Self {
        self.settings.forms.form.horizontal_class = Some(class.to_string());
        self
    }

    /// Sets `forms.form.group-class`.
    #[must_use]
    pub fn set_group_class(mut self, class: &str) -> Self {
        self.settings.forms.form.group_class = Some(class.to_string());
        self
    }

    /// Sets `forms.form.input-class`.
    #[must_use]
    pub fn set_input_class(mut self, class: &str) -> Self {
        self.settings.forms.form.input_class = Some(class.to_string());
        self
    }

    /// Sets the input-group addon classes (`input-group-text`,
    /// `input-group-before`, `input-group-after`).
    #[must_use]
    pub fn set_input_group_classes(mut self, text: &str, before: &str, after: &str) -> Self {
        let form = &mut self.settings.forms.form;
        form.input_group_text = Some(text.to_string());
        form.input_group_before = Some(before.to_string());
        form.input_group_after = Some(after.to_string());
        self
    }

    /// Sets an arbitrary dotted key not covered by the typed settings.
    #[must_use]
    pub fn set_extra(mut self, key: &str, value: serde_json::Value) -> Self {
        self.settings.extra.insert(key.to_string(), value);
        self
    }

    /// Returns the built settings.
    pub fn build(self) -> Settings {
        self.settings
    }
}

/// Runs `f` with `overrides` as the effective settings on this thread.
///
/// The override is popped afterwards, even if the closure panics.
pub fn override_settings<F, R>(overrides: SettingsOverride, f: F) -> R
where
    F: FnOnce() -> R,
{
    with_override(overrides.build(), f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formkit_core::settings::keys;
    use formkit_core::{ConfigLookup, SETTINGS};

    #[test]
    fn test_defaults_without_override() {
        let settings = SETTINGS.current();
        assert!(settings.forms.bootstrap_version.is_none());
    }

    #[test]
    fn test_override_is_scoped() {
        override_settings(SettingsOverride::new().set_bootstrap_version("5"), || {
            assert_eq!(
                SETTINGS.current().lookup(keys::BOOTSTRAP_VERSION).as_deref(),
                Some("5")
            );
        });
        assert!(SETTINGS.current().lookup(keys::BOOTSTRAP_VERSION).is_none());
    }

    #[test]
    fn test_nested_overrides() {
        override_settings(SettingsOverride::new().set_group_class("outer"), || {
            override_settings(SettingsOverride::new().set_group_class("inner"), || {
                assert_eq!(
                    SETTINGS.current().config(keys::GROUP_CLASS, "form-group"),
                    "inner"
                );
            });
            assert_eq!(
                SETTINGS.current().config(keys::GROUP_CLASS, "form-group"),
                "outer"
            );
        });
    }

    #[test]
    fn test_override_restored_after_panic() {
        let result = std::panic::catch_unwind(|| {
            override_settings(SettingsOverride::new().set_debug(false), || {
                panic!("boom");
            })
        });
        assert!(result.is_err());
        assert!(SETTINGS.current().debug);
    }

    #[test]
    fn test_extra_and_addon_classes() {
        let overrides = SettingsOverride::new()
            .set_extra("forms.custom", serde_json::json!("x"))
            .set_input_group_classes("addon", "addon-before", "addon-after");
        override_settings(overrides, || {
            let settings = SETTINGS.current();
            assert_eq!(settings.lookup("forms.custom").as_deref(), Some("x"));
            assert_eq!(settings.lookup(keys::INPUT_GROUP_TEXT).as_deref(), Some("addon"));
        });
    }

    #[test]
    fn test_returns_closure_value() {
        let value = override_settings(SettingsOverride::new(), || 42);
        assert_eq!(value, 42);
    }
}
