//! Page assets collected from rendered fields.
//!
//! Fields can require stylesheets, scripts, inline styles, and JavaScript
//! definitions. A form gathers them once per render (deduplicated, in first
//! seen order) so the page can emit them in its `<head>` and before
//! `</body>`.

use formkit_core::utils::text::escape_html;
use formkit_fields::FieldConfig;

/// Calls each element's on-load function once it is in the DOM and marks it
/// as rendered.
const ON_LOAD_JS: &str = r"_formsjs_onLoad = function () {
    document.querySelectorAll('[data-formsjs-onload]').forEach(function (element) {
        let _method = element.getAttribute('data-formsjs-onload');
        if (typeof window[_method] === 'function') {
            window[_method](element);
            element.setAttribute('data-formsjs-rendered', true);
        }
    });
};
document.addEventListener('DOMContentLoaded', _formsjs_onLoad);";

/// Browser-side validation using the constraint validation API.
const VALIDATION_JS: &str = r"document.addEventListener('DOMContentLoaded', function () {
    document.querySelectorAll('form').forEach(function (form) {
        form.setAttribute('novalidate', true);
        form.addEventListener('submit', function (event) {
            if (! form.checkValidity()) {
                event.preventDefault();
                event.stopPropagation();
            }
            form.classList.add('was-validated');
        }, false);
    });
});";

/// Stylesheets, styles, scripts, and JavaScript required by a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormAssets {
    stylesheets: Vec<String>,
    styles: Vec<String>,
    scripts: Vec<String>,
    js: Vec<String>,
    on_load: bool,
    validation: bool,
    form_js: Option<String>,
}

fn push_unique(list: &mut Vec<String>, item: String) {
    if !item.trim().is_empty() && !list.contains(&item) {
        list.push(item);
    }
}

impl FormAssets {
    /// Creates an empty asset set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the assets declared by `field`.
    pub fn collect(&mut self, field: &FieldConfig) {
        let definition = field.field();
        let options = field.options();
        let id = field.id();

        for stylesheet in definition.stylesheets(options) {
            push_unique(&mut self.stylesheets, stylesheet);
        }
        if let Some(styles) = definition.styles(&id, options) {
            push_unique(&mut self.styles, styles);
        }
        for script in definition.scripts(options) {
            push_unique(&mut self.scripts, script);
        }
        if let Some(js) = definition.js(&id, options) {
            push_unique(&mut self.js, js);
        }
        if definition.on_load_js(&id, options).is_some() {
            self.on_load = true;
        }
    }

    /// Enables the client-side validation snippet.
    pub fn set_validation(&mut self, enabled: bool) {
        self.validation = enabled;
    }

    /// Sets form-level JavaScript, emitted after the field definitions.
    pub fn set_form_js(&mut self, js: Option<String>) {
        self.form_js = js;
    }

    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    pub fn styles(&self) -> &[String] {
        &self.styles
    }

    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }

    pub fn js(&self) -> &[String] {
        &self.js
    }

    /// Returns `true` if nothing needs to be emitted.
    pub fn is_empty(&self) -> bool {
        self.stylesheets.is_empty()
            && self.styles.is_empty()
            && self.scripts.is_empty()
            && self.js.is_empty()
            && !self.validation
            && self.form_js.is_none()
    }

    /// `<link>` tags followed by one `<style>` block.
    pub fn render_styles(&self) -> String {
        let mut html: String = self
            .stylesheets
            .iter()
            .map(|href| format!(r#"<link href="{}" rel="stylesheet">"#, escape_html(href)))
            .collect();
        if !self.styles.is_empty() {
            html.push_str("<style>");
            html.push_str(&self.styles.join("\n"));
            html.push_str("</style>");
        }
        html
    }

    /// `<script src>` tags followed by one inline `<script>` block holding
    /// field definitions, the on-load runner, validation, and form js.
    pub fn render_scripts(&self) -> String {
        let mut html: String = self
            .scripts
            .iter()
            .map(|src| format!(r#"<script src="{}"></script>"#, escape_html(src)))
            .collect();

        let mut inline: Vec<&str> = self.js.iter().map(String::as_str).collect();
        if self.on_load {
            inline.push(ON_LOAD_JS);
        }
        if self.validation {
            inline.push(VALIDATION_JS);
        }
        if let Some(js) = &self.form_js {
            inline.push(js);
        }
        if !inline.is_empty() {
            html.push_str("<script>");
            html.push_str(&inline.join("\n"));
            html.push_str("</script>");
        }
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formkit_core::Settings;
    use formkit_fields::{Field, Options, PasswordWithReveal, Text};

    #[derive(Debug)]
    struct Colorful;

    impl Field for Colorful {
        fn stylesheets(&self, _options: &Options) -> Vec<String> {
            vec!["/css/picker.css".to_string()]
        }

        fn styles(&self, id: &str, _options: &Options) -> Option<String> {
            Some(format!("#{id} {{ width: 4rem; }}"))
        }
    }

    fn make(field: impl Field + 'static, name: &str) -> FieldConfig {
        field.make_with(name, Options::new(), &Settings::default())
    }

    #[test]
    fn test_plain_fields_add_nothing() {
        let mut assets = FormAssets::new();
        assets.collect(&make(Text, "name"));
        assert!(assets.is_empty());
        assert_eq!(assets.render_styles(), "");
        assert_eq!(assets.render_scripts(), "");
    }

    #[test]
    fn test_scripts_deduplicated() {
        let mut assets = FormAssets::new();
        assets.collect(&make(PasswordWithReveal, "password"));
        assets.collect(&make(PasswordWithReveal, "password_confirmation"));
        assert_eq!(assets.scripts().len(), 1);
        assert_eq!(assets.js().len(), 1);

        let html = assets.render_scripts();
        assert!(html.starts_with(
            r#"<script src="//cdn.jsdelivr.net/npm/password-revealer@1.1.1/dist/password-revealer.min.js"></script><script>"#
        ));
        assert!(html.contains("_formsjs_passwordWithRevealField = function"));
        assert!(html.contains("_formsjs_onLoad"));
        assert!(!html.contains("was-validated"));
    }

    #[test]
    fn test_styles_per_instance() {
        let mut assets = FormAssets::new();
        assets.collect(&make(Colorful, "primary"));
        assets.collect(&make(Colorful, "secondary"));
        assert_eq!(assets.stylesheets(), ["/css/picker.css"]);
        assert_eq!(assets.styles().len(), 2);
        assert_eq!(
            assets.render_styles(),
            "<link href=\"/css/picker.css\" rel=\"stylesheet\"><style>#primary { width: 4rem; }\n#secondary { width: 4rem; }</style>"
        );
    }

    #[test]
    fn test_validation_and_form_js() {
        let mut assets = FormAssets::new();
        assets.set_validation(true);
        assets.set_form_js(Some("console.log('ready');".to_string()));
        let html = assets.render_scripts();
        assert!(html.contains("was-validated"));
        assert!(html.ends_with("console.log('ready');</script>"));
    }
}
