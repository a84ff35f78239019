//! Typed configuration values and text conversions.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

/// A parsed configuration: parameter name to typed value, in the order the
/// parameters first appear in the file.
pub type Configuration = IndexMap<String, Value>;

/// A single typed configuration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Str(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

/// Raw text that could not be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("invalid literal for int: {0:?}")]
    InvalidInt(String),

    #[error("integer out of range: {0:?}")]
    IntOutOfRange(String),

    #[error("could not convert string to float: {0:?}")]
    InvalidFloat(String),
}

/// Parse a base-10 integer.
///
/// Accepts an optional sign and single underscores between digits
/// (`1_000`). Rejects empty text, decimal points and exponents.
pub fn parse_int(raw: &str) -> Result<i64, ConversionError> {
    let digits = strip_digit_separators(raw)
        .ok_or_else(|| ConversionError::InvalidInt(raw.to_string()))?;

    let unsigned = digits.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(&digits);
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConversionError::InvalidInt(raw.to_string()));
    }

    digits
        .parse::<i64>()
        .map_err(|_| ConversionError::IntOutOfRange(raw.to_string()))
}

/// Parse a float in decimal or exponent notation, or one of the special
/// values `inf`, `infinity` and `nan` (any case, optionally signed).
pub fn parse_float(raw: &str) -> Result<f64, ConversionError> {
    let text = strip_digit_separators(raw)
        .ok_or_else(|| ConversionError::InvalidFloat(raw.to_string()))?;

    text.parse::<f64>()
        .map_err(|_| ConversionError::InvalidFloat(raw.to_string()))
}

/// Remove `_` separators that sit between two ASCII digits.
///
/// Returns `None` if any underscore is leading, trailing, doubled or next
/// to a non-digit.
fn strip_digit_separators(raw: &str) -> Option<String> {
    if !raw.contains('_') {
        return Some(raw.to_string());
    }

    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    for (i, c) in raw.char_indices() {
        if c == '_' {
            let before = i.checked_sub(1).map(|j| bytes[j]);
            let after = bytes.get(i + 1).copied();
            match (before, after) {
                (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => continue,
                _ => return None,
            }
        }
        out.push(c);
    }
    Some(out)
}
