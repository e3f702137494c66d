//! Decoder for free-text fields whose JSON shape varies between records.
//!
//! # Design
//! Open Library stores `description` on works and `bio` on authors either as
//! a bare string or as a typed object `{"type": "/type/text", "value": ...}`.
//! `TextValue` accepts both and keeps only the text. The typed shape is tried
//! first, then the bare string; anything else fails the enclosing record.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A free-text field normalized to a plain string.
///
/// Serializes back out as a bare string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Option<TextShape>", into = "String")]
pub struct TextValue(String);

/// The two wire shapes, in the order they are attempted.
///
/// The typed shape is held as a raw map so that arrays never match it.
#[derive(Deserialize)]
#[serde(untagged)]
enum TextShape {
    Typed(Map<String, Value>),
    Plain(String),
}

impl TryFrom<Option<TextShape>> for TextValue {
    type Error = String;

    fn try_from(shape: Option<TextShape>) -> Result<Self, Self::Error> {
        let mut members = match shape {
            None => return Ok(TextValue::default()),
            Some(TextShape::Plain(text)) => return Ok(TextValue(text)),
            Some(TextShape::Typed(members)) => members,
        };
        // `type` only names the markup and is dropped.
        if let Some(kind) = members.get("type") {
            if !(kind.is_string() || kind.is_null()) {
                return Err(format!("`type` must be a string, found {kind}"));
            }
        }
        match members.remove("value") {
            Some(Value::String(text)) => Ok(TextValue(text)),
            None | Some(Value::Null) => Ok(TextValue::default()),
            Some(other) => Err(format!("`value` must be a string, found {other}")),
        }
    }
}

impl From<TextValue> for String {
    fn from(text: TextValue) -> Self {
        text.0
    }
}

impl From<String> for TextValue {
    fn from(text: String) -> Self {
        TextValue(text)
    }
}

impl From<&str> for TextValue {
    fn from(text: &str) -> Self {
        TextValue(text.to_string())
    }
}

impl TextValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for TextValue {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TextValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TextValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TextValue {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failure to decode a single free-text field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// The input is not valid JSON at all.
    #[error("malformed JSON: {0}")]
    Malformed(String),

    /// Valid JSON, but neither a string nor a `{type, value}` object.
    #[error("expected a string or a {{type, value}} object: {0}")]
    Mismatch(String),
}

/// Decode one field's raw JSON into its normalized text.
pub fn decode_text(json: &[u8]) -> Result<String, ShapeError> {
    serde_json::from_slice::<TextValue>(json)
        .map(TextValue::into_string)
        .map_err(|e| match e.classify() {
            serde_json::error::Category::Data => ShapeError::Mismatch(e.to_string()),
            _ => ShapeError::Malformed(e.to_string()),
        })
}
