//! End-to-end tests for form assembly.
//!
//! These tests exercise the complete path:
//!   form definition -> field resolution -> layout -> open/close markup -> assets
//!
//! They use the fixture routes and session from `formkit-test`.

use http::Method;
use serde_json::{json, Value};

use formkit_core::{Settings, SETTINGS};
use formkit_fields::{
    opts, Checkbox, Email, Field, FieldConfig, Hidden, Image, PasswordWithReveal, Select, Text,
    TextArea,
};
use formkit_forms::{
    BaseForm, ButtonLinks, Buttons, FormDefinition, MemorySession, Orientation, Section,
};
use formkit_test::{
    assert_html_contains, assert_html_count, assert_html_not_contains, assert_html_order,
    fixture_context, fixture_context_with, fixture_session, override_settings, sample_input,
    SettingsOverride, FIXTURE_CSRF_TOKEN,
};

// ============================================================================
// Form definitions
// ============================================================================

/// A sign-up form with a revealable password and a role picker.
struct SignUpForm;

impl FormDefinition for SignUpForm {
    fn fields(&self) -> Vec<FieldConfig> {
        vec![
            Text.make("name", opts(json!({"required": true}))),
            Email.make("email", opts(json!({"placeholder": "you@example.com"}))),
            PasswordWithReveal.make("password", opts(json!({"toggle": "Show"}))),
            Select.make(
                "role",
                opts(json!({
                    "options": {"Reader": "reader", "Editor": "editor"},
                    "null_label": "Choose a role"
                })),
            ),
            Checkbox.make("terms", opts(json!({"label": "I accept the terms"}))),
        ]
    }

    fn route(&self) -> Vec<Value> {
        vec![json!("users.store")]
    }

    fn buttons(&self) -> Buttons {
        Buttons {
            submit: Some("Sign up".to_string()),
            cancel: Some("Cancel".to_string()),
        }
    }
}

/// A profile form laid out horizontally in two sections and two columns.
struct ProfileForm;

impl FormDefinition for ProfileForm {
    fn fields(&self) -> Vec<FieldConfig> {
        vec![
            Text.make("first_name", opts(json!({}))),
            Text.make("last_name", opts(json!({}))),
            Image.make("avatar", opts(json!({}))),
            TextArea.make("bio", opts(json!({}))),
            Hidden.make("user_id", opts(json!({"value": 12}))),
        ]
    }

    fn route(&self) -> Vec<Value> {
        vec![json!("users.update"), json!(12)]
    }

    fn method(&self) -> Method {
        Method::PUT
    }

    fn orientation(&self) -> Option<Orientation> {
        Some(Orientation::Horizontal)
    }

    fn with_js_validation(&self) -> Option<bool> {
        Some(true)
    }

    fn columns(&self) -> usize {
        2
    }

    fn sections(&self) -> Vec<Section> {
        vec![
            Section::new("Identity", ["first_name", "last_name", "user_id"]),
            Section::new("About", ["avatar", "bio"]),
        ]
    }

    fn buttons(&self) -> Buttons {
        Buttons {
            submit: Some("Update".to_string()),
            cancel: Some("Back".to_string()),
        }
    }

    fn button_links(&self) -> ButtonLinks {
        ButtonLinks {
            cancel: Some("/users/12/".to_string()),
        }
    }

    fn form_id(&self) -> Option<String> {
        Some("profile".to_string())
    }
}

/// A search form submitted with GET.
struct SearchForm;

impl FormDefinition for SearchForm {
    fn fields(&self) -> Vec<FieldConfig> {
        vec![Text.make("q", opts(json!({"label": false, "before": "Search"})))]
    }

    fn method(&self) -> Method {
        Method::GET
    }

    fn scripts(&self) -> Option<String> {
        Some("document.getElementById('q').focus();".to_string())
    }
}

// ============================================================================
// 1. Complete forms
// ============================================================================

#[test]
fn test_sign_up_form() {
    let mut form = BaseForm::new(SignUpForm, fixture_context());
    let html = form.make().unwrap().html().to_string();

    assert!(html.starts_with(
        r#"<form method="POST" action="/users/" accept-charset="UTF-8"><input name="_token" type="hidden" value="test-csrf-token">"#
    ));
    assert_html_contains(&html, r#"<input type="text" id="name" name="name" class="form-control" required>"#);
    assert_html_contains(&html, r#"placeholder="you@example.com""#);
    assert_html_contains(&html, r#">Show</button>"#);
    assert_html_contains(&html, r#"<option value="">Choose a role</option>"#);
    assert_html_contains(&html, r#"<label class="form-check-label" for="terms">I accept the terms</label>"#);
    assert_html_contains(
        &html,
        r#"<a class="btn btn-secondary" href="/users/create/">Cancel</a><button class="btn btn-primary" type="submit">Sign up</button></div></form>"#,
    );
    assert_html_order(&html, r#"name="email""#, r#"name="password""#);
    assert_html_not_contains(&html, "toggle=");
    assert_html_not_contains(&html, "null_label");
}

#[test]
fn test_sign_up_form_assets() {
    let mut form = BaseForm::new(SignUpForm, fixture_context());
    form.make().unwrap();

    assert_eq!(form.render_styles(), "");
    let scripts = form.render_scripts();
    assert_html_count(&scripts, "password-revealer.min.js", 1);
    assert_html_contains(&scripts, "_formsjs_passwordWithRevealField = function (element)");
    assert_html_contains(&scripts, "_formsjs_onLoad");
    assert_html_not_contains(&scripts, "was-validated");
}

#[test]
fn test_profile_form_layout() {
    let mut form = BaseForm::new(ProfileForm, fixture_context());
    let html = form.make().unwrap().html().to_string();

    assert!(html.starts_with(
        r#"<form method="POST" action="/users/12/" accept-charset="UTF-8" class="form-horizontal" id="profile" enctype="multipart/form-data">"#
    ));
    assert_html_contains(&html, r#"<input name="_method" type="hidden" value="PUT">"#);
    assert_html_contains(&html, r#"<div class="mt-2 mb-2"><h4>Identity</h4></div>"#);
    assert_html_order(&html, "<h4>Identity</h4>", "<h4>About</h4>");
    assert_html_count(&html, r#"<div class="col-md-6">"#, 5);
    assert_html_count(&html, r#"<div class="row">"#, 3);
    assert_html_contains(&html, r#"<label for="first_name" class="col-md-2 col-form-label">First name</label>"#);
    assert_html_contains(&html, r#"accept="image/*""#);
    assert_html_contains(&html, r#"<input type="hidden" id="user_id" name="user_id" value="12">"#);
    assert_html_contains(&html, r#"<a class="btn btn-secondary" href="/users/12/">Back</a>"#);
    assert_html_contains(&html, ">Update</button>");

    assert_html_contains(&form.render_scripts(), "was-validated");
}

#[test]
fn test_search_form() {
    let mut form = BaseForm::new(SearchForm, fixture_context());
    let html = form.make().unwrap().html().to_string();

    assert!(html.starts_with(r#"<form method="GET" action="/users/create/" accept-charset="UTF-8">"#));
    assert_html_not_contains(&html, FIXTURE_CSRF_TOKEN);
    assert_html_not_contains(&html, "<label");
    assert_html_contains(
        &html,
        r#"<div class="input-group"><div class="input-group-prepend"><span class="input-group-text">Search</span></div><input type="text" id="q" name="q" class="form-control"></div>"#,
    );
    assert!(form
        .render_scripts()
        .ends_with("document.getElementById('q').focus();</script>"));
}

// ============================================================================
// 2. Session state
// ============================================================================

#[test]
fn test_failed_submission_rerenders_input_and_errors() {
    let session = fixture_session()
        .with_old_input("name", "Jane <Doe>")
        .with_old_input("password", "hunter2")
        .with_old_input("role", "editor")
        .with_error("email", "The email must be a valid email address.");
    let mut form = BaseForm::new(SignUpForm, fixture_context_with(session, Settings::default()));
    let html = form.make().unwrap().html().to_string();

    assert_html_contains(&html, r#"value="Jane &lt;Doe&gt;""#);
    assert_html_not_contains(&html, "hunter2");
    assert_html_contains(&html, r#"<option value="editor" selected>Editor</option>"#);
    assert_html_contains(&html, r#"class="form-control is-invalid""#);
    assert_html_contains(
        &html,
        r#"<div class="invalid-feedback">The email must be a valid email address.</div>"#,
    );
}

#[test]
fn test_form_without_token() {
    let context = fixture_context_with(MemorySession::new(), Settings::default());
    let mut form = BaseForm::new(SignUpForm, context);
    let html = form.make().unwrap().html().to_string();
    assert_html_not_contains(&html, "_token");
}

// ============================================================================
// 3. Routes and settings
// ============================================================================

#[test]
fn test_set_route_overrides_definition() {
    let mut form = BaseForm::new(SignUpForm, fixture_context());
    form.set_route("users.update", 7).set_method(Method::PATCH);
    assert_eq!(form.route(), [json!("users.update"), json!(7)]);

    let html = form.make().unwrap().html().to_string();
    assert_html_contains(&html, r#"action="/users/7/""#);
    assert_html_contains(&html, r#"value="PATCH""#);
}

#[test]
fn test_set_route_with_list() {
    let mut form = BaseForm::new(SignUpForm, fixture_context());
    form.set_route("users.index", ["a", "b"]);
    assert_eq!(form.route(), [json!("users.index"), json!("a"), json!("b")]);
}

#[test]
fn test_missing_route_parameter() {
    let mut form = BaseForm::new(SignUpForm, fixture_context());
    form.set_route("users.update", ());
    let err = form.make().unwrap_err();
    assert!(err.is_declaration_error());
}

#[test]
fn test_configured_classes_apply_to_whole_form() {
    let overrides = SettingsOverride::new()
        .set_group_class("mb-3")
        .set_horizontal_class("row-form")
        .set_bootstrap_version("5");
    override_settings(overrides, || {
        let context = fixture_context_with(fixture_session(), SETTINGS.current());
        let mut form = BaseForm::new(ProfileForm, context);
        let html = form.make().unwrap().html().to_string();
        assert_html_contains(&html, r#"<div class="mb-3 row">"#);
        assert_html_not_contains(&html, "form-horizontal");
        assert_html_not_contains(&html, r#"class="row-form""#);
    });
}

// ============================================================================
// 4. Sample input
// ============================================================================

#[test]
fn test_sample_input_covers_sign_up_fields() {
    let fields = SignUpForm.fields();
    let input = sample_input(&fields, 42);
    assert!(input["email"].as_str().unwrap().contains('@'));
    assert!(input["password"].as_str().unwrap().len() >= 8);
    assert!(["reader", "editor"].contains(&input["role"].as_str().unwrap()));
    assert!(input["terms"].is_boolean());
}
