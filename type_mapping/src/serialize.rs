//! Serialization utilities
//!
//! This module converts attribute values to and from JSON, and types raw
//! text coming from outside the entity layer (path segments, form input).

use crate::types::FieldValue;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

impl FieldValue {
    /// Render the value as plain JSON for view projections
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Int(i) => serde_json::Value::from(*i),
            // NaN and infinities have no JSON form
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Text(s) => serde_json::Value::String(s.clone()),
            FieldValue::Uuid(u) => serde_json::Value::String(u.to_string()),
            FieldValue::Timestamp(ts) => serde_json::Value::String(ts.to_rfc3339()),
            FieldValue::Json(v) => v.clone(),
        }
    }

    /// Build a value from JSON. Strings go through [`FieldValue::infer`],
    /// arrays and objects stay JSON.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else if let Some(f) = n.as_f64() {
                    FieldValue::Float(f)
                } else {
                    FieldValue::Json(serde_json::Value::Number(n))
                }
            }
            serde_json::Value::String(s) => Self::infer(&s),
            other => FieldValue::Json(other),
        }
    }

    /// Type a raw text value: integer, then uuid, then RFC3339 timestamp,
    /// otherwise text. Floats are left as text so identifiers such as
    /// "1e3" are not silently reinterpreted.
    pub fn infer(raw: &str) -> Self {
        if let Ok(i) = raw.parse::<i64>() {
            return FieldValue::Int(i);
        }
        if let Ok(uuid) = uuid::Uuid::parse_str(raw) {
            return FieldValue::Uuid(uuid);
        }
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
            return FieldValue::Timestamp(dt.with_timezone(&chrono::Utc));
        }
        FieldValue::Text(raw.to_string())
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(FieldValue::from_json(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_infer_raw_segments() {
        assert_eq!(FieldValue::infer("42"), FieldValue::Int(42));
        assert_eq!(FieldValue::infer("-7"), FieldValue::Int(-7));
        assert!(matches!(
            FieldValue::infer("67e55044-10b1-426f-9247-bb680e5fe0c8"),
            FieldValue::Uuid(_)
        ));
        assert!(matches!(
            FieldValue::infer("2024-01-01T00:00:00Z"),
            FieldValue::Timestamp(_)
        ));
        assert_eq!(
            FieldValue::infer("a@x.com"),
            FieldValue::Text("a@x.com".to_string())
        );
        assert_eq!(FieldValue::infer("1e3"), FieldValue::Text("1e3".to_string()));
    }

    #[test]
    fn test_json_rendering() {
        assert_eq!(FieldValue::Int(42).to_json(), json!(42));
        assert_eq!(FieldValue::Float(f64::NAN).to_json(), json!(null));
        assert_eq!(FieldValue::from("A").to_json(), json!("A"));
        assert_eq!(
            serde_json::to_value(FieldValue::Json(json!({"a": [1, 2]}))).unwrap(),
            json!({"a": [1, 2]})
        );
    }

    #[test]
    fn test_from_json_objects_stay_json() {
        let value = FieldValue::from_json(json!({"nested": true}));
        assert_eq!(value, FieldValue::Json(json!({"nested": true})));
        assert_eq!(FieldValue::from_json(json!(1.5)), FieldValue::Float(1.5));
    }
}
