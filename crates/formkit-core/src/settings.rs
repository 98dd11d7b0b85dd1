//! Settings system for formkit.
//!
//! This module provides the [`Settings`] struct, the [`ConfigLookup`] trait for
//! reading settings by dotted key (`forms.form.input-group-text`), and
//! [`LazySettings`], a globally-accessible, lazily-initialized settings
//! instance.
//!
//! Every form-level setting is optional. Readers supply the documented
//! fallback at the call site, so an unset key and a key that was never
//! loaded behave identically.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Dotted configuration keys read by the field and form crates.
pub mod keys {
    pub const BOOTSTRAP_VERSION: &str = "forms.bootstrap-version";
    pub const INPUT_GROUP_TEXT: &str = "forms.form.input-group-text";
    pub const INPUT_GROUP_BEFORE: &str = "forms.form.input-group-before";
    pub const INPUT_GROUP_AFTER: &str = "forms.form.input-group-after";
    pub const HORIZONTAL_CLASS: &str = "forms.form.horizontal-class";
    pub const GROUP_CLASS: &str = "forms.form.group-class";
    pub const INPUT_CLASS: &str = "forms.form.input-class";
    pub const LABEL_CLASS: &str = "forms.form.label-class";
    pub const BEFORE_AFTER_INPUT_WRAPPER: &str = "forms.form.before-after-input-wrapper";
    pub const INVALID_INPUT_CLASS: &str = "forms.form.invalid-input-class";
    pub const INVALID_FEEDBACK: &str = "forms.form.invalid-feedback";
    pub const CHECK_CLASS: &str = "forms.form.check-class";
    pub const CHECK_INPUT_CLASS: &str = "forms.form.check-input-class";
    pub const CHECK_LABEL_CLASS: &str = "forms.form.check-label-class";
    pub const HORIZONTAL_LABEL_CLASS: &str = "forms.form.horizontal-label-class";
    pub const HORIZONTAL_FIELD_CLASS: &str = "forms.form.horizontal-field-class";
    pub const BUTTONS_WRAPPER: &str = "forms.form.buttons-wrapper";
    pub const SECTIONS_WRAPPER_CLASS: &str = "forms.form.sections.wrapper-class";
    pub const SECTIONS_COLUMN_BASE: &str = "forms.form.sections.column-base";
    pub const SECTIONS_HEADER_SPACING: &str = "forms.form.sections.header-spacing";
    pub const BUTTON_SUBMIT: &str = "forms.buttons.submit";
    pub const BUTTON_CANCEL: &str = "forms.buttons.cancel";
}

/// Read access to configuration by dotted key.
///
/// This is the configuration-context seam: field resolution and rendering
/// receive a `&dyn ConfigLookup` instead of reaching for global state.
pub trait ConfigLookup {
    /// Returns the configured value for `key`, or `None` when unset.
    fn lookup(&self, key: &str) -> Option<String>;

    /// Returns the configured value for `key`, or `default` when unset.
    fn config(&self, key: &str, default: &str) -> String {
        self.lookup(key).unwrap_or_else(|| default.to_string())
    }
}

/// Layout settings for sectioned forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SectionSettings {
    /// Class of the row wrapping a group of columns.
    pub wrapper_class: Option<String>,
    /// Prefix of the column class; the column width is appended.
    pub column_base: Option<String>,
    /// Spacing classes of a section header.
    pub header_spacing: Option<String>,
}

/// CSS class settings applied to form markup (`forms.form.*`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FormClassSettings {
    pub horizontal_class: Option<String>,
    pub group_class: Option<String>,
    pub input_class: Option<String>,
    pub label_class: Option<String>,
    pub before_after_input_wrapper: Option<String>,
    pub invalid_input_class: Option<String>,
    pub invalid_feedback: Option<String>,
    pub check_class: Option<String>,
    pub check_input_class: Option<String>,
    pub check_label_class: Option<String>,
    pub input_group_text: Option<String>,
    pub input_group_before: Option<String>,
    pub input_group_after: Option<String>,
    pub horizontal_label_class: Option<String>,
    pub horizontal_field_class: Option<String>,
    pub buttons_wrapper: Option<String>,
    pub sections: SectionSettings,
}

/// Button class settings (`forms.buttons.*`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ButtonSettings {
    pub submit: Option<String>,
    pub cancel: Option<String>,
}

/// The `forms` settings table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FormsSettings {
    /// Major version of the CSS framework the markup targets. When unset or
    /// starting with `4`, input-group addons get an extra wrapper `<div>`.
    pub bootstrap_version: Option<String>,
    /// Form markup classes.
    pub form: FormClassSettings,
    /// Button classes.
    pub buttons: ButtonSettings,
}

/// The complete set of formkit settings.
///
/// # Examples
///
/// ```
/// use formkit_core::settings::{ConfigLookup, Settings};
///
/// let settings = Settings::default();
/// assert_eq!(settings.log_level, "info");
/// assert_eq!(settings.lookup("forms.bootstrap-version"), None);
/// assert_eq!(
///     settings.config("forms.form.input-group-text", "input-group-text"),
///     "input-group-text"
/// );
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether debug mode is enabled.
    pub debug: bool,
    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,
    /// Form rendering settings.
    pub forms: FormsSettings,
    /// Custom settings, addressed by their full dotted key.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            forms: FormsSettings::default(),
            extra: HashMap::new(),
        }
    }
}

impl ConfigLookup for Settings {
    fn lookup(&self, key: &str) -> Option<String> {
        let forms = &self.forms;
        let form = &forms.form;
        let value = match key {
            keys::BOOTSTRAP_VERSION => &forms.bootstrap_version,
            keys::INPUT_GROUP_TEXT => &form.input_group_text,
            keys::INPUT_GROUP_BEFORE => &form.input_group_before,
            keys::INPUT_GROUP_AFTER => &form.input_group_after,
            keys::HORIZONTAL_CLASS => &form.horizontal_class,
            keys::GROUP_CLASS => &form.group_class,
            keys::INPUT_CLASS => &form.input_class,
            keys::LABEL_CLASS => &form.label_class,
            keys::BEFORE_AFTER_INPUT_WRAPPER => &form.before_after_input_wrapper,
            keys::INVALID_INPUT_CLASS => &form.invalid_input_class,
            keys::INVALID_FEEDBACK => &form.invalid_feedback,
            keys::CHECK_CLASS => &form.check_class,
            keys::CHECK_INPUT_CLASS => &form.check_input_class,
            keys::CHECK_LABEL_CLASS => &form.check_label_class,
            keys::HORIZONTAL_LABEL_CLASS => &form.horizontal_label_class,
            keys::HORIZONTAL_FIELD_CLASS => &form.horizontal_field_class,
            keys::BUTTONS_WRAPPER => &form.buttons_wrapper,
            keys::SECTIONS_WRAPPER_CLASS => &form.sections.wrapper_class,
            keys::SECTIONS_COLUMN_BASE => &form.sections.column_base,
            keys::SECTIONS_HEADER_SPACING => &form.sections.header_spacing,
            keys::BUTTON_SUBMIT => &forms.buttons.submit,
            keys::BUTTON_CANCEL => &forms.buttons.cancel,
            _ => return self.extra.get(key).and_then(scalar_to_string),
        };
        value.clone()
    }
}

/// Renders a scalar JSON value as configuration text; `null` and containers
/// count as unset.
fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

thread_local! {
    /// Thread-local stack of settings overrides. The top of the stack wins
    /// over the globally configured settings.
    static OVERRIDE_STACK: RefCell<Vec<Settings>> = const { RefCell::new(Vec::new()) };
}

/// Pushes a thread-local settings override. Pair with [`pop_override`].
pub fn push_override(settings: Settings) {
    OVERRIDE_STACK.with(|stack| stack.borrow_mut().push(settings));
}

/// Pops the most recent thread-local settings override, if any.
pub fn pop_override() -> Option<Settings> {
    OVERRIDE_STACK.with(|stack| stack.borrow_mut().pop())
}

/// Runs `f` with `settings` pushed as the innermost override on this thread.
///
/// The override is popped afterwards, even if `f` panics.
pub fn with_override<F, R>(settings: Settings, f: F) -> R
where
    F: FnOnce() -> R,
{
    struct PopGuard;
    impl Drop for PopGuard {
        fn drop(&mut self) {
            pop_override();
        }
    }

    push_override(settings);
    let _guard = PopGuard;
    f()
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup. Reads never
/// panic: [`current`](LazySettings::current) falls back to
/// [`Settings::default`] when nothing was configured.
pub struct LazySettings {
    inner: OnceLock<Settings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings. Must be called exactly once.
    ///
    /// # Panics
    ///
    /// Panics if settings have already been configured.
    pub fn configure(&self, settings: Settings) {
        self.inner
            .set(settings)
            .expect("Settings have already been configured");
    }

    /// Returns the configured settings, if any.
    pub fn get(&self) -> Option<&Settings> {
        self.inner.get()
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }

    /// Returns the effective settings for the current thread: the innermost
    /// override, else the configured settings, else the defaults.
    pub fn current(&self) -> Settings {
        OVERRIDE_STACK
            .with(|stack| stack.borrow().last().cloned())
            .or_else(|| self.inner.get().cloned())
            .unwrap_or_default()
    }
}

/// The global settings instance.
pub static SETTINGS: LazySettings = LazySettings::new();
