//! Built-in field types.
//!
//! Each type is a unit struct implementing [`Field`]; most only name their
//! input type and factory spec.

use serde_json::json;

use crate::field::Field;
use crate::options::{opts, Options};

/// `<input type="text">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl Field for Text {}

/// `<input type="email">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl Field for Email {
    fn field_type(&self) -> Option<&str> {
        Some("email")
    }

    fn factory(&self) -> String {
        "email".to_string()
    }
}

/// `<input type="url">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Url;

impl Field for Url {
    fn field_type(&self) -> Option<&str> {
        Some("url")
    }

    fn factory(&self) -> String {
        "url".to_string()
    }
}

/// `<input type="tel">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tel;

impl Field for Tel {
    fn field_type(&self) -> Option<&str> {
        Some("tel")
    }

    fn factory(&self) -> String {
        "tel".to_string()
    }
}

/// `<input type="number">` for integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Number;

impl Field for Number {
    fn field_type(&self) -> Option<&str> {
        Some("number")
    }

    fn factory(&self) -> String {
        "integer(0,1000)".to_string()
    }
}

/// `<input type="number" step="any">` for decimal values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decimal;

impl Field for Decimal {
    fn field_type(&self) -> Option<&str> {
        Some("number")
    }

    fn factory(&self) -> String {
        "decimal(2)".to_string()
    }

    fn attributes(&self) -> Options {
        opts(json!({"step": "any"}))
    }
}

/// `<input type="date">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Date;

impl Field for Date {
    fn field_type(&self) -> Option<&str> {
        Some("date")
    }

    fn factory(&self) -> String {
        "date".to_string()
    }
}

/// `<input type="time">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Time;

impl Field for Time {
    fn field_type(&self) -> Option<&str> {
        Some("time")
    }

    fn factory(&self) -> String {
        "time".to_string()
    }
}

/// `<input type="color">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Color;

impl Field for Color {
    fn field_type(&self) -> Option<&str> {
        Some("color")
    }

    fn factory(&self) -> String {
        "color".to_string()
    }
}

/// `<input type="password">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Password;

impl Field for Password {
    fn field_type(&self) -> Option<&str> {
        Some("password")
    }

    fn factory(&self) -> String {
        "password".to_string()
    }
}

/// `<textarea>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextArea;

impl Field for TextArea {
    fn field_type(&self) -> Option<&str> {
        Some("textarea")
    }

    fn factory(&self) -> String {
        "text(200)".to_string()
    }

    fn attributes(&self) -> Options {
        opts(json!({"rows": 5}))
    }
}

/// A single `<input type="checkbox">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checkbox;

impl Field for Checkbox {
    fn field_type(&self) -> Option<&str> {
        Some("checkbox")
    }

    fn factory(&self) -> String {
        "boolean".to_string()
    }
}

/// A group of `<input type="radio">` elements, one per choice.
#[derive(Debug, Clone, Copy, Default)]
pub struct Radio;

impl Field for Radio {
    fn field_type(&self) -> Option<&str> {
        Some("radio")
    }

    fn factory(&self) -> String {
        "choice".to_string()
    }
}

/// `<input type="hidden">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hidden;

impl Field for Hidden {
    fn field_type(&self) -> Option<&str> {
        Some("hidden")
    }
}

/// `<input type="file">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct File;

impl Field for File {
    fn field_type(&self) -> Option<&str> {
        Some("file")
    }

    fn factory(&self) -> String {
        "file".to_string()
    }
}

/// `<input type="file" accept="image/*">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Image;

impl Field for Image {
    fn field_type(&self) -> Option<&str> {
        Some("file")
    }

    fn factory(&self) -> String {
        "file".to_string()
    }

    fn attributes(&self) -> Options {
        opts(json!({"accept": "image/*"}))
    }
}

/// `<select>` over the `options` choices (`label => value`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Select;

impl Field for Select {
    fn field_type(&self) -> Option<&str> {
        Some("select")
    }

    fn factory(&self) -> String {
        "choice".to_string()
    }
}

/// `<select>` over related records.
///
/// The caller supplies the related records as `options` (`label => id`);
/// `multiple => true` turns it into a many-relationship picker.
#[derive(Debug, Clone, Copy, Default)]
pub struct Relationship;

impl Field for Relationship {
    fn field_type(&self) -> Option<&str> {
        Some("relationship")
    }

    fn factory(&self) -> String {
        "integer(1,1000)".to_string()
    }
}
