//! Assertions over rendered markup.
//!
//! Rendered forms are long single-line strings, so a bare
//! `assert!(html.contains(..))` failure says little. These helpers print
//! the fragment and the markup on failure.
//!
//! ## Example
//!
//! ```
//! use formkit_test::assert_html::{assert_html_contains, assert_html_count};
//!
//! let html = r#"<div class="row"><input name="a"><input name="b"></div>"#;
//! assert_html_contains(html, r#"<input name="a">"#);
//! assert_html_count(html, "<input", 2);
//! ```

/// Asserts that `html` contains `fragment`.
///
/// # Panics
///
/// Panics if `fragment` does not occur in `html`.
pub fn assert_html_contains(html: &str, fragment: &str) {
    assert!(
        html.contains(fragment),
        "Expected markup to contain\n  {fragment}\nbut it was\n  {html}"
    );
}

/// Asserts that `html` does not contain `fragment`.
///
/// # Panics
///
/// Panics if `fragment` occurs in `html`.
pub fn assert_html_not_contains(html: &str, fragment: &str) {
    assert!(
        !html.contains(fragment),
        "Expected markup not to contain\n  {fragment}\nbut it was\n  {html}"
    );
}

/// Asserts that `fragment` occurs exactly `expected` times in `html`.
///
/// # Panics
///
/// Panics if the count differs.
pub fn assert_html_count(html: &str, fragment: &str, expected: usize) {
    let actual = html.matches(fragment).count();
    assert_eq!(
        actual, expected,
        "Expected {expected} occurrences of {fragment}, found {actual} in\n  {html}"
    );
}

/// Asserts that `first` occurs in `html` before `second`.
///
/// # Panics
///
/// Panics if either fragment is missing or they are out of order.
pub fn assert_html_order(html: &str, first: &str, second: &str) {
    let a = html.find(first);
    let b = html.find(second);
    assert!(
        matches!((a, b), (Some(a), Some(b)) if a < b),
        "Expected {first} before {second} in\n  {html}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        assert_html_contains("<b>x</b>", "x</b>");
        assert_html_not_contains("<b>x</b>", "<i>");
    }

    #[test]
    #[should_panic(expected = "Expected markup to contain")]
    fn test_contains_failure() {
        assert_html_contains("<b>x</b>", "<i>");
    }

    #[test]
    fn test_order() {
        assert_html_order("<a><b>", "<a>", "<b>");
    }

    #[test]
    #[should_panic(expected = "before")]
    fn test_order_failure() {
        assert_html_order("<a><b>", "<b>", "<a>");
    }

    #[test]
    fn test_count() {
        assert_html_count("<i><i><i>", "<i>", 3);
    }
}
