//! Attribute value definitions
//!
//! This module provides the dynamically typed scalar held by entity
//! attributes and bound as statement parameters.

use std::fmt;
use uuid::Uuid;

/// A single attribute value. Values keep whatever variant they were stored
/// with; nothing here coerces between variants implicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Uuid(Uuid),
    Timestamp(chrono::DateTime<chrono::Utc>),
    Json(serde_json::Value),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Text content, if this is a text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of the value. Integers widen to f64, text is parsed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Truth value. Accepts 0 / 1 and the usual PostgreSQL spellings in text.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            FieldValue::Int(0) => Some(false),
            FieldValue::Int(1) => Some(true),
            FieldValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "t" | "true" | "yes" | "on" | "1" => Some(true),
                "f" | "false" | "no" | "off" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Short variant name used in log lines and error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::Text(_) => "text",
            FieldValue::Uuid(_) => "uuid",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::Json(_) => "json",
        }
    }

    /// True for null and for empty or whitespace-only text
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "NULL"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Uuid(u) => write!(f, "{}", u),
            FieldValue::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
            FieldValue::Json(v) => write!(f, "{}", v),
        }
    }
}

impl From<String> for FieldValue {
    fn from(val: String) -> Self {
        FieldValue::Text(val)
    }
}

impl From<&str> for FieldValue {
    fn from(val: &str) -> Self {
        FieldValue::Text(val.to_string())
    }
}

impl From<i16> for FieldValue {
    fn from(val: i16) -> Self {
        FieldValue::Int(val as i64)
    }
}

impl From<i32> for FieldValue {
    fn from(val: i32) -> Self {
        FieldValue::Int(val as i64)
    }
}

impl From<i64> for FieldValue {
    fn from(val: i64) -> Self {
        FieldValue::Int(val)
    }
}

impl From<f32> for FieldValue {
    fn from(val: f32) -> Self {
        FieldValue::Float(val as f64)
    }
}

impl From<f64> for FieldValue {
    fn from(val: f64) -> Self {
        FieldValue::Float(val)
    }
}

impl From<bool> for FieldValue {
    fn from(val: bool) -> Self {
        FieldValue::Bool(val)
    }
}

impl From<Uuid> for FieldValue {
    fn from(val: Uuid) -> Self {
        FieldValue::Uuid(val)
    }
}

impl From<chrono::DateTime<chrono::Utc>> for FieldValue {
    fn from(val: chrono::DateTime<chrono::Utc>) -> Self {
        FieldValue::Timestamp(val)
    }
}

impl<T> From<Option<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => FieldValue::Null,
        }
    }
}
