//! Field values and the coercion rules records apply when a value is assigned.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// The storage kind of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Boolean,
    Date,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
        }
    }

    /// Placeholder reported for a field that has not been set.
    pub fn default_value(&self) -> Value {
        match self {
            FieldKind::Text => Value::Text(String::new()),
            FieldKind::Integer => Value::Integer(-1),
            FieldKind::Float => Value::Float(0.0),
            FieldKind::Boolean => Value::Boolean(false),
            FieldKind::Date => Value::Date(NaiveDate::default()),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Text(_) => FieldKind::Text,
            Value::Integer(_) => FieldKind::Integer,
            Value::Float(_) => FieldKind::Float,
            Value::Boolean(_) => FieldKind::Boolean,
            Value::Date(_) => FieldKind::Date,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(date) => Some(*date),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Integer(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

/// Parses the loose boolean spellings found in hand-edited sheets.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" | "x" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Converts `value` into the storage kind of a field.
///
/// Returns `Ok(None)` for empty text, which clears the field.
pub(crate) fn coerce(field: &'static str, kind: FieldKind, value: Value) -> Result<Option<Value>> {
    let invalid = |raw: String| ModelError::InvalidValue {
        field,
        value: raw,
        expected: kind,
    };
    if let Value::Text(raw) = &value
        && raw.trim().is_empty()
    {
        return Ok(None);
    }
    let coerced = match (kind, value) {
        (FieldKind::Text, Value::Text(raw)) => Value::Text(raw),
        (FieldKind::Text, other) => Value::Text(other.to_string()),
        (FieldKind::Integer, Value::Integer(v)) => Value::Integer(v),
        (FieldKind::Integer, Value::Text(raw)) => {
            Value::Integer(raw.trim().parse::<i64>().map_err(|_| invalid(raw))?)
        }
        (FieldKind::Float, Value::Float(v)) => Value::Float(v),
        (FieldKind::Float, Value::Integer(v)) => Value::Float(v as f64),
        (FieldKind::Float, Value::Text(raw)) => {
            Value::Float(raw.trim().parse::<f64>().map_err(|_| invalid(raw))?)
        }
        (FieldKind::Boolean, Value::Boolean(v)) => Value::Boolean(v),
        (FieldKind::Boolean, Value::Text(raw)) => {
            Value::Boolean(parse_bool(&raw).ok_or_else(|| invalid(raw))?)
        }
        (FieldKind::Date, Value::Date(date)) => Value::Date(date),
        (FieldKind::Date, Value::Text(raw)) => Value::Date(
            NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| invalid(raw))?,
        ),
        (_, other) => return Err(invalid(other.to_string())),
    };
    Ok(Some(coerced))
}
