//! # formkit-test
//!
//! Testing utilities for formkit: thread-local settings overrides, fixture
//! routes/sessions/contexts, seeded sample input generated from field
//! factory specs, and assertions over rendered markup.

pub mod assert_html;
pub mod fixtures;
pub mod override_settings;

pub use assert_html::{
    assert_html_contains, assert_html_count, assert_html_not_contains, assert_html_order,
};
pub use fixtures::{
    fixture_context, fixture_context_with, fixture_routes, fixture_session, sample_input,
    FIXTURE_CSRF_TOKEN,
};
pub use override_settings::{override_settings, SettingsOverride};
