//! Token substitution for field templates.
//!
//! Field templates are plain markup with `{token}` placeholders, e.g.
//! `<label for="{id}">{name}</label>{field}`. Rendering replaces each token
//! found in the token map and leaves unknown tokens untouched, so a template
//! can be filled in stages.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};

fn token_re() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new(r"\{([A-Za-z][A-Za-z0-9_-]*)\}").unwrap())
}

/// Replaces `{token}` placeholders with values from `tokens`.
///
/// Substitution is a single pass: a substituted value is never scanned for
/// further placeholders.
///
/// ```
/// use std::collections::HashMap;
/// use formkit_fields::template::render;
///
/// let mut tokens = HashMap::new();
/// tokens.insert("id", "email".to_string());
/// assert_eq!(render(r#"<label for="{id}">{name}</label>"#, &tokens),
///            r#"<label for="email">{name}</label>"#);
/// ```
pub fn render(template: &str, tokens: &HashMap<&str, String>) -> String {
    token_re()
        .replace_all(template, |caps: &Captures<'_>| {
            tokens
                .get(&caps[1])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Escapes `{` and `}` as HTML entities.
///
/// Apply this to text substituted into a template that is rendered again
/// later, so the text cannot form a placeholder on the later pass.
///
/// ```
/// use formkit_fields::template::escape_braces;
///
/// assert_eq!(escape_braces("{field}"), "&#123;field&#125;");
/// ```
pub fn escape_braces(text: &str) -> String {
    text.replace('{', "&#123;").replace('}', "&#125;")
}
