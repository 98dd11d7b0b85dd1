//! Input-group addon markup for the `before` and `after` options.
//!
//! A field declared with `before => "$"` renders its input inside an input
//! group with a text addon in front of it. The addon markup is computed once
//! when the field is resolved and stored on the config.

use formkit_core::settings::keys;
use formkit_core::ConfigLookup;

use crate::options::{value_to_text, Options};

/// Which side of the input an addon sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapperSide {
    /// In front of the input (`before` option).
    Before,
    /// After the input (`after` option).
    After,
}

impl WrapperSide {
    /// The option key holding the raw addon for this side.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

/// Builds the addon markup for one side of a field.
///
/// Returns `None` when the option is absent or `null`. Values containing a
/// `<button` are used verbatim; anything else is wrapped in an
/// `input-group-text` span. Under Bootstrap 4 (or when no version is
/// configured) the result is additionally wrapped in the side's
/// prepend/append `<div>`.
///
/// ```
/// use formkit_core::Settings;
/// use formkit_fields::{get_wrappers, opts, WrapperSide};
/// use serde_json::json;
///
/// let options = opts(json!({"before": "$"}));
/// assert_eq!(
///     get_wrappers(&options, WrapperSide::Before, &Settings::default()).as_deref(),
///     Some(r#"<div class="input-group-prepend"><span class="input-group-text">$</span></div>"#)
/// );
/// ```
pub fn get_wrappers(
    options: &Options,
    side: WrapperSide,
    config: &dyn ConfigLookup,
) -> Option<String> {
    let raw = options.get(side.key()).and_then(value_to_text)?;

    let mut content = if raw.contains("<button") {
        raw
    } else {
        let group_text_class = config.config(keys::INPUT_GROUP_TEXT, "input-group-text");
        format!(r#"<span class="{group_text_class}">{raw}</span>"#)
    };

    if uses_addon_wrappers(config) {
        let class = match side {
            WrapperSide::Before => config.config(keys::INPUT_GROUP_BEFORE, "input-group-prepend"),
            WrapperSide::After => config.config(keys::INPUT_GROUP_AFTER, "input-group-append"),
        };
        content = format!(r#"<div class="{class}">{content}</div>"#);
    }

    Some(content)
}

/// Bootstrap 4 needs `input-group-prepend`/`-append` wrappers around addons;
/// later versions place addons directly inside the input group.
pub fn uses_addon_wrappers(config: &dyn ConfigLookup) -> bool {
    config
        .lookup(keys::BOOTSTRAP_VERSION)
        .map_or(true, |version| version.starts_with('4'))
}
