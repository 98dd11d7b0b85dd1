//! Ready-made collaborators and sample data for form tests.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

use formkit_core::Settings;
use formkit_fields::{FactorySpec, FieldConfig, Options};
use formkit_forms::{FormContext, MemorySession, RouteTable};

/// CSRF token carried by [`fixture_session`].
pub const FIXTURE_CSRF_TOKEN: &str = "test-csrf-token";

/// A route table with the usual resource routes for `users` and `posts`.
///
/// The current URL is `/users/create/`.
pub fn fixture_routes() -> RouteTable {
    RouteTable::new()
        .with_route("users.index", "/users/")
        .with_route("users.create", "/users/create/")
        .with_route("users.store", "/users/")
        .with_route("users.show", "/users/<int:id>/")
        .with_route("users.edit", "/users/<int:id>/edit/")
        .with_route("users.update", "/users/<int:id>/")
        .with_route("users.destroy", "/users/<int:id>/")
        .with_route("posts.store", "/posts/")
        .with_route("posts.update", "/posts/<slug:slug>/")
        .with_current("/users/create/")
}

/// A session holding [`FIXTURE_CSRF_TOKEN`] and nothing else.
pub fn fixture_session() -> MemorySession {
    MemorySession::new().with_csrf_token(FIXTURE_CSRF_TOKEN)
}

/// A form context over [`fixture_routes`], [`fixture_session`], and
/// default settings.
pub fn fixture_context() -> FormContext {
    fixture_context_with(fixture_session(), Settings::default())
}

/// A form context over [`fixture_routes`] with the given session and
/// settings.
pub fn fixture_context_with(session: MemorySession, settings: Settings) -> FormContext {
    FormContext::new(fixture_routes(), session).with_settings(settings)
}

/// Generates sample input for `fields` from their factory specs.
///
/// The same seed always yields the same values. Fields whose factory has
/// no generator are left out, except choice fields, which get their first
/// choice.
pub fn sample_input(fields: &[FieldConfig], seed: u64) -> Options {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut input = Options::new();
    for field in fields {
        let value = FactorySpec::parse(field.factory()).generate(&mut rng);
        let value = if value.is_null() {
            field
                .choices()
                .into_iter()
                .next()
                .map_or(Value::Null, |(_, value)| Value::String(value))
        } else {
            value
        };
        if !value.is_null() {
            input.insert(field.name().to_string(), value);
        }
    }
    input
}
