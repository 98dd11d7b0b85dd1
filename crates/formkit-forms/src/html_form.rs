//! Opening and closing form markup.
//!
//! Browsers only submit `GET` and `POST`; other methods are sent as `POST`
//! with a hidden `_method` input naming the intended method, and every
//! non-`GET` form carries the session's CSRF token in a hidden `_token`
//! input.

use http::Method;
use serde_json::Value;

use formkit_core::settings::keys;
use formkit_core::utils::text::escape_html;
use formkit_core::{ConfigLookup, FormResult};

use crate::session::Session;
use crate::url::UrlGenerator;

/// Button labels. A button without a label is not rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buttons {
    pub submit: Option<String>,
    pub cancel: Option<String>,
}

impl Default for Buttons {
    fn default() -> Self {
        Self {
            submit: Some("Save".to_string()),
            cancel: None,
        }
    }
}

/// Button targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonLinks {
    pub cancel: Option<String>,
}

/// Arguments for [`HtmlForm::open`].
#[derive(Debug, Clone)]
pub struct FormOpen<'a> {
    /// Route name followed by its parameters; empty posts to the current URL.
    pub route: &'a [Value],
    pub method: &'a Method,
    pub files: bool,
    pub class: Option<&'a str>,
    pub id: Option<&'a str>,
}

/// Renders `<form>` open and close markup.
#[derive(Clone, Copy)]
pub struct HtmlForm<'a> {
    url: &'a dyn UrlGenerator,
    session: &'a dyn Session,
    config: &'a dyn ConfigLookup,
}

impl std::fmt::Debug for HtmlForm<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlForm")
            .field("url", &self.url)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl<'a> HtmlForm<'a> {
    pub fn new(
        url: &'a dyn UrlGenerator,
        session: &'a dyn Session,
        config: &'a dyn ConfigLookup,
    ) -> Self {
        Self {
            url,
            session,
            config,
        }
    }

    /// Renders the opening `<form>` tag plus its hidden inputs.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NoReverseMatch`](formkit_core::FormError::NoReverseMatch)
    /// if the route cannot be resolved.
    pub fn open(&self, open: &FormOpen<'_>) -> FormResult<String> {
        let action = match open.route.split_first() {
            Some((Value::String(name), parameters)) => self.url.route(name, parameters)?,
            Some((other, _)) => {
                return Err(formkit_core::FormError::NoReverseMatch(other.to_string()));
            }
            None => self.url.current(),
        };

        let spoofed = [Method::PUT, Method::PATCH, Method::DELETE].contains(open.method);
        let form_method = if *open.method == Method::GET { "GET" } else { "POST" };

        let mut html = format!(
            r#"<form method="{form_method}" action="{}" accept-charset="UTF-8""#,
            escape_html(&action)
        );
        if let Some(class) = open.class.filter(|class| !class.is_empty()) {
            html.push_str(&format!(r#" class="{}""#, escape_html(class)));
        }
        if let Some(id) = open.id.filter(|id| !id.is_empty()) {
            html.push_str(&format!(r#" id="{}""#, escape_html(id)));
        }
        if open.files {
            html.push_str(r#" enctype="multipart/form-data""#);
        }
        html.push('>');

        if *open.method != Method::GET {
            if let Some(token) = self.session.csrf_token() {
                html.push_str(&format!(
                    r#"<input name="_token" type="hidden" value="{}">"#,
                    escape_html(&token)
                ));
            }
        }
        if spoofed {
            html.push_str(&format!(
                r#"<input name="_method" type="hidden" value="{}">"#,
                open.method.as_str()
            ));
        }

        Ok(html)
    }

    /// Renders the button row and the closing `</form>` tag.
    pub fn buttons_and_close(&self, buttons: &Buttons, links: &ButtonLinks) -> String {
        let mut row = String::new();

        if let (Some(label), Some(link)) = (&buttons.cancel, &links.cancel) {
            row.push_str(&format!(
                r#"<a class="{}" href="{}">{}</a>"#,
                escape_html(&self.config.config(keys::BUTTON_CANCEL, "btn btn-secondary")),
                escape_html(link),
                escape_html(label)
            ));
        }
        if let Some(label) = &buttons.submit {
            row.push_str(&format!(
                r#"<button class="{}" type="submit">{}</button>"#,
                escape_html(&self.config.config(keys::BUTTON_SUBMIT, "btn btn-primary")),
                escape_html(label)
            ));
        }

        let mut html = String::new();
        if !row.is_empty() {
            html.push_str(&format!(
                r#"<div class="{}">{row}</div>"#,
                escape_html(
                    &self
                        .config
                        .config(keys::BUTTONS_WRAPPER, "d-flex justify-content-between")
                )
            ));
        }
        html.push_str("</form>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySession;
    use crate::url::RouteTable;
    use formkit_core::{FormError, Settings};
    use serde_json::json;

    fn routes() -> RouteTable {
        RouteTable::new()
            .with_route("users.store", "/users/")
            .with_route("users.update", "/users/<int:id>/")
            .with_current("/users/create/")
    }

    fn open(method: &Method, route: &[Value], files: bool) -> FormResult<String> {
        let routes = routes();
        let session = MemorySession::new().with_csrf_token("tok3n");
        let settings = Settings::default();
        HtmlForm::new(&routes, &session, &settings).open(&FormOpen {
            route,
            method,
            files,
            class: Some("form"),
            id: None,
        })
    }

    #[test]
    fn test_post_form() {
        let html = open(&Method::POST, &[json!("users.store")], false).unwrap();
        assert_eq!(
            html,
            r#"<form method="POST" action="/users/" accept-charset="UTF-8" class="form"><input name="_token" type="hidden" value="tok3n">"#
        );
    }

    #[test]
    fn test_put_is_spoofed() {
        let html = open(&Method::PUT, &[json!("users.update"), json!(5)], false).unwrap();
        assert!(html.starts_with(r#"<form method="POST" action="/users/5/""#));
        assert!(html.ends_with(r#"<input name="_method" type="hidden" value="PUT">"#));
    }

    #[test]
    fn test_get_has_no_token() {
        let html = open(&Method::GET, &[], false).unwrap();
        assert_eq!(
            html,
            r#"<form method="GET" action="/users/create/" accept-charset="UTF-8" class="form">"#
        );
    }

    #[test]
    fn test_files_set_enctype() {
        let html = open(&Method::POST, &[json!("users.store")], true).unwrap();
        assert!(html.contains(r#" enctype="multipart/form-data">"#));
    }

    #[test]
    fn test_unknown_route() {
        let err = open(&Method::POST, &[json!("missing")], false).unwrap_err();
        assert!(matches!(err, FormError::NoReverseMatch(_)));
    }

    #[test]
    fn test_buttons_and_close() {
        let routes = routes();
        let session = MemorySession::new();
        let settings = Settings::default();
        let form = HtmlForm::new(&routes, &session, &settings);

        let buttons = Buttons {
            submit: Some("Create".into()),
            cancel: Some("Cancel".into()),
        };
        let links = ButtonLinks {
            cancel: Some("/users/".into()),
        };
        assert_eq!(
            form.buttons_and_close(&buttons, &links),
            r#"<div class="d-flex justify-content-between"><a class="btn btn-secondary" href="/users/">Cancel</a><button class="btn btn-primary" type="submit">Create</button></div></form>"#
        );

        // no cancel label: only submit
        let html = form.buttons_and_close(&Buttons::default(), &links);
        assert!(!html.contains("<a "));
        assert!(html.contains(">Save</button>"));

        let none = Buttons {
            submit: None,
            cancel: None,
        };
        assert_eq!(form.buttons_and_close(&none, &links), "</form>");
    }
}
