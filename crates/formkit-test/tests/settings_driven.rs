//! Integration tests for settings-driven markup.
//!
//! Settings are loaded from TOML and JSON configuration files and fed to
//! the renderer, either explicitly through a form context or through the
//! thread-local override stack.

use std::io::Write;

use serde_json::json;

use formkit_core::settings_loader;
use formkit_fields::{opts, Field, FieldConfig, Text};
use formkit_forms::{BaseForm, FormDefinition, Orientation};
use formkit_test::{
    assert_html_contains, assert_html_not_contains, fixture_context_with, fixture_session,
    override_settings, SettingsOverride,
};

// ============================================================================
// Shared helpers
// ============================================================================

const BOOTSTRAP_5_TOML: &str = r#"
debug = false

[forms]
bootstrap-version = "5"

[forms.form]
group-class = "mb-3"
label-class = "form-label"
horizontal-class = "form-horizontal"

[forms.buttons]
submit = "btn btn-success"
"#;

struct PriceForm;

impl FormDefinition for PriceForm {
    fn fields(&self) -> Vec<FieldConfig> {
        vec![Text.make("price", opts(json!({"before": "$", "after": ".00"})))]
    }
}

struct HorizontalForm;

impl FormDefinition for HorizontalForm {
    fn fields(&self) -> Vec<FieldConfig> {
        vec![Text.make("title", opts(json!({})))]
    }

    fn orientation(&self) -> Option<Orientation> {
        Some(Orientation::Horizontal)
    }
}

fn write_temp(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// ============================================================================
// 1. File-loaded settings
// ============================================================================

#[test]
fn test_toml_file_drives_form_classes() {
    let file = write_temp(BOOTSTRAP_5_TOML, ".toml");
    let settings = settings_loader::from_toml_file(file.path()).unwrap();
    assert!(!settings.debug);

    let mut form = BaseForm::new(PriceForm, fixture_context_with(fixture_session(), settings));
    let html = form.make().unwrap().html().to_string();

    assert_html_contains(&html, r#"<div class="mb-3"><label for="price" class="form-label">Price</label>"#);
    assert_html_contains(&html, r#"<button class="btn btn-success" type="submit">Save</button>"#);
    assert_html_not_contains(&html, "input-group-prepend");
}

#[test]
fn test_json_file_drives_section_layout() {
    let file = write_temp(
        r#"{"forms": {"form": {"sections": {"column-base": "col-lg-", "wrapper-class": "grid"}}}}"#,
        ".json",
    );
    let settings = settings_loader::from_json_file(file.path()).unwrap();

    struct TwoColumns;
    impl FormDefinition for TwoColumns {
        fn fields(&self) -> Vec<FieldConfig> {
            vec![Text.make("a", opts(json!({}))), Text.make("b", opts(json!({})))]
        }

        fn columns(&self) -> usize {
            2
        }
    }

    let mut form = BaseForm::new(TwoColumns, fixture_context_with(fixture_session(), settings));
    let html = form.make().unwrap().html().to_string();
    assert_html_contains(&html, r#"<div class="grid"><div class="col-lg-6">"#);
}

#[test]
fn test_missing_file_is_configuration_error() {
    let err = settings_loader::from_toml_file("/nonexistent/forms.toml").unwrap_err();
    assert!(!err.is_declaration_error());
    assert!(err.to_string().contains("Failed to read TOML file"));
}

// ============================================================================
// 2. Field resolution follows the active settings
// ============================================================================

#[test]
fn test_wrappers_follow_loaded_settings() {
    let settings = settings_loader::from_toml_str(BOOTSTRAP_5_TOML).unwrap();
    let config = Text.make_with("price", opts(json!({"before": "$"})), &settings);
    assert_eq!(config.before(), Some(r#"<span class="input-group-text">$</span>"#));
}

#[test]
fn test_override_with_loaded_settings() {
    let settings = settings_loader::from_toml_str(BOOTSTRAP_5_TOML).unwrap();
    override_settings(SettingsOverride::from_settings(settings), || {
        let config = Text.make("price", opts(json!({"after": ".00"})));
        assert_eq!(config.after(), Some(r#"<span class="input-group-text">.00</span>"#));
    });
    let config = Text.make("price", opts(json!({"after": ".00"})));
    assert!(config.after().unwrap().starts_with(r#"<div class="input-group-append">"#));
}

// ============================================================================
// 3. Horizontal class guard
// ============================================================================

#[test]
fn test_unset_form_class_kept_when_horizontal_class_configured() {
    let settings = settings_loader::from_toml_str(BOOTSTRAP_5_TOML).unwrap();
    let mut form = BaseForm::new(HorizontalForm, fixture_context_with(fixture_session(), settings));
    let html = form.make().unwrap().html().to_string();
    assert_html_not_contains(&html, r#"class="form-horizontal""#);
}

#[test]
fn test_default_horizontal_class() {
    let settings = settings_loader::from_json_str("{}").unwrap();
    let mut form = BaseForm::new(HorizontalForm, fixture_context_with(fixture_session(), settings));
    let html = form.make().unwrap().html().to_string();
    assert_html_contains(&html, r#"class="form-horizontal""#);
    assert_html_contains(&html, r#"<div class="form-group row">"#);
}
