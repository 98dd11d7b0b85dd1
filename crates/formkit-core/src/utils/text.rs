//! String utility functions.

use regex::Regex;
use std::sync::OnceLock;

/// Escapes HTML special characters in a string.
///
/// Replaces `&`, `<`, `>`, `"`, and `'` with their HTML entity equivalents.
///
/// # Examples
///
/// ```
/// use formkit_core::utils::text::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">"#), "&lt;a href=&quot;x&quot;&gt;");
/// ```
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Capitalizes the first character of a string.
///
/// # Examples
///
/// ```
/// use formkit_core::utils::text::capfirst;
///
/// assert_eq!(capfirst("hello"), "Hello");
/// assert_eq!(capfirst(""), "");
/// ```
pub fn capfirst(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |c| {
        let mut result = c.to_uppercase().to_string();
        result.extend(chars);
        result
    })
}

/// Turns a field name into a human-readable label.
///
/// Underscores, hyphens, and dots become spaces, bracketed array suffixes
/// are dropped, and the first letter is capitalized.
///
/// # Examples
///
/// ```
/// use formkit_core::utils::text::humanize;
///
/// assert_eq!(humanize("first_name"), "First name");
/// assert_eq!(humanize("roles[]"), "Roles");
/// ```
pub fn humanize(name: &str) -> String {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    let separators = SEPARATORS.get_or_init(|| Regex::new(r"[_\-.\s]+").unwrap());

    let trimmed = name.trim_end_matches("[]");
    let spaced = separators.replace_all(trimmed, " ");
    capfirst(spaced.trim())
}
