//! A password input with a button that toggles the password's visibility.
//!
//! The toggle is driven by the `password-revealer` browser library. The
//! field declares an on-load hook so the library is attached both on the
//! initial page render and whenever the markup is injected later; the hook
//! marks initialized elements with `data-formsjs-rendered` so listeners are
//! never bound twice.
//!
//! Options:
//!
//! - `toggle`: button text (default `Toggle`)
//! - `toggle-classes`: button classes
//! - `toggle-selector`: class used to find the button (default
//!   `PasswordRevealer-trigger`)

use std::collections::HashMap;

use formkit_core::utils::text::escape_html;

use crate::field::Field;
use crate::options::{value_to_text, Options};
use crate::template::{self, escape_braces};

const DEFAULT_TOGGLE: &str = "Toggle";
const DEFAULT_TOGGLE_CLASSES: &str = "btn btn-outline-primary bmx-rounded-left-0";
const DEFAULT_TOGGLE_SELECTOR: &str = "PasswordRevealer-trigger";

const SCRIPT_URL: &str =
    "//cdn.jsdelivr.net/npm/password-revealer@1.1.1/dist/password-revealer.min.js";

const ON_LOAD_FUNCTION: &str = "_formsjs_passwordWithRevealField";

const TEMPLATE: &str = r#"<div class="{rowClass}">
    <label for="{id}" class="{labelClass}">{name}</label>
    <div class="{fieldClass}">
        <div class="input-group mb-3">
            {field}
            <button type="button" class="{toggleSelector} {toggleClasses}">{toggle}</button>
        </div>
    {errors}
    </div>
</div>"#;

const JS: &str = r"_formsjs_passwordWithRevealField = function (element) {
    if (! element.getAttribute('data-formsjs-rendered')) {
        let _selector = '.' + element.getAttribute('data-formsjs-onload-data');
        PasswordRevealer(element, { trigger: { selector: _selector, eventListener: 'click' } }).init();
    }
}";

/// Password input with a reveal toggle button.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordWithReveal;

fn option_or(options: &Options, key: &str, default: &str) -> String {
    options
        .get(key)
        .and_then(value_to_text)
        .unwrap_or_else(|| default.to_string())
}

impl Field for PasswordWithReveal {
    fn field_type(&self) -> Option<&str> {
        Some("password")
    }

    fn factory(&self) -> String {
        "password".to_string()
    }

    fn field_options(&self) -> &[&str] {
        &["toggle", "toggle-classes", "toggle-selector"]
    }

    fn scripts(&self, _options: &Options) -> Vec<String> {
        vec![SCRIPT_URL.to_string()]
    }

    fn on_load_js(&self, _id: &str, _options: &Options) -> Option<String> {
        Some(ON_LOAD_FUNCTION.to_string())
    }

    fn on_load_js_data(&self, _id: &str, options: &Options) -> Option<String> {
        Some(option_or(options, "toggle-selector", DEFAULT_TOGGLE_SELECTOR))
    }

    fn js(&self, _id: &str, _options: &Options) -> Option<String> {
        Some(JS.to_string())
    }

    fn template(&self, options: &Options) -> Option<String> {
        let mut tokens = HashMap::new();
        // The builder renders this template again with the layout tokens.
        let text = |key: &str, default: &str| {
            escape_braces(&escape_html(&option_or(options, key, default)))
        };
        tokens.insert("toggle", text("toggle", DEFAULT_TOGGLE));
        tokens.insert("toggleClasses", text("toggle-classes", DEFAULT_TOGGLE_CLASSES));
        tokens.insert("toggleSelector", text("toggle-selector", DEFAULT_TOGGLE_SELECTOR));

        Some(template::render(TEMPLATE, &tokens))
    }
}
