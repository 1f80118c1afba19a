//! Validation engine

use crate::rules::rule::ValidationRule;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use type_mapping::FieldValue;

/// Failure messages keyed by field, in field-name order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages recorded for one field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with at least one failure
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn message_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join("; ")))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Outcome of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: ValidationErrors,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}

pub struct ValidationEngine;

impl ValidationEngine {
    /// Evaluate every (value, rule) pair. No pair short-circuits another, so
    /// the report always carries the complete error set.
    pub fn validate(pairs: &[(Option<&FieldValue>, &ValidationRule)]) -> ValidationReport {
        let mut errors = ValidationErrors::new();

        for (value, rule) in pairs {
            if let Err(message) = rule.check(*value) {
                let message = if message.is_empty() {
                    format!("{} is invalid", rule.field())
                } else {
                    message
                };
                errors.add(rule.field(), message);
            }
        }

        ValidationReport { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_pairs_are_evaluated() {
        let name_required = ValidationRule::required("name");
        let name_min = ValidationRule::min_length("name", 10);
        let email = ValidationRule::email("email");
        let name = FieldValue::from("Al");
        let bad_email = FieldValue::from("nope");

        let report = ValidationEngine::validate(&[
            (Some(&name), &name_required),
            (Some(&name), &name_min),
            (Some(&bad_email), &email),
        ]);

        assert!(!report.is_valid());
        assert_eq!(report.errors().len(), 2);
        assert_eq!(report.errors().get("name").unwrap().len(), 1);
        assert_eq!(report.errors().get("email").unwrap().len(), 1);
    }

    #[test]
    fn test_messages_accumulate_per_field() {
        let required = ValidationRule::required("code");
        let custom = ValidationRule::custom("code", |_| Err(String::new()));

        let report = ValidationEngine::validate(&[(None, &required), (None, &custom)]);
        assert_eq!(
            report.errors().get("code").unwrap(),
            &["code is required".to_string(), "code is invalid".to_string()]
        );
        assert_eq!(report.errors().message_count(), 2);
    }

    #[test]
    fn test_empty_pair_list_is_valid() {
        let report = ValidationEngine::validate(&[]);
        assert!(report.is_valid());
        assert_eq!(report.errors().to_string(), "");
    }

    #[test]
    fn test_errors_serialize_as_object() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "name is required");
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({"name": ["name is required"]})
        );
    }
}
