//! Validation rule definitions

use regex::Regex;
use std::sync::LazyLock;
use type_mapping::FieldValue;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .unwrap_or_else(|e| panic!("email pattern must compile: {}", e))
});

/// Custom check. Receives the current value (or `None` when unset) and
/// returns the failure message.
pub type CustomCheck = fn(Option<&FieldValue>) -> Result<(), String>;

/// The constraint a rule enforces
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Value must be set, non-null and not blank text
    Required,
    /// Minimum length in characters
    MinLength(usize),
    /// Maximum length in characters
    MaxLength(usize),
    Email,
    /// Integer, float, or text that parses as a number
    Numeric,
    /// Integer, or text that parses as an integer
    Integer,
    /// Inclusive numeric range
    Range { min: f64, max: f64 },
    Pattern(Regex),
    OneOf(Vec<FieldValue>),
    Custom(CustomCheck),
}

/// A constraint bound to exactly one field
#[derive(Debug, Clone)]
pub struct ValidationRule {
    field: String,
    kind: RuleKind,
    message: Option<String>,
}

impl ValidationRule {
    pub fn new(field: impl Into<String>, kind: RuleKind) -> Self {
        Self {
            field: field.into(),
            kind,
            message: None,
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, RuleKind::Required)
    }

    pub fn min_length(field: impl Into<String>, min: usize) -> Self {
        Self::new(field, RuleKind::MinLength(min))
    }

    pub fn max_length(field: impl Into<String>, max: usize) -> Self {
        Self::new(field, RuleKind::MaxLength(max))
    }

    pub fn email(field: impl Into<String>) -> Self {
        Self::new(field, RuleKind::Email)
    }

    pub fn numeric(field: impl Into<String>) -> Self {
        Self::new(field, RuleKind::Numeric)
    }

    pub fn integer(field: impl Into<String>) -> Self {
        Self::new(field, RuleKind::Integer)
    }

    pub fn range(field: impl Into<String>, min: f64, max: f64) -> Self {
        Self::new(field, RuleKind::Range { min, max })
    }

    pub fn pattern(field: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::new(field, RuleKind::Pattern(Regex::new(pattern)?)))
    }

    pub fn one_of(field: impl Into<String>, values: Vec<FieldValue>) -> Self {
        Self::new(field, RuleKind::OneOf(values))
    }

    pub fn custom(field: impl Into<String>, check: CustomCheck) -> Self {
        Self::new(field, RuleKind::Custom(check))
    }

    /// Replace the default failure message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The field this rule is bound to
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Evaluate the rule against a value.
    ///
    /// Every kind except `Required` accepts a missing, null or blank value;
    /// optional fields are only checked once they carry something.
    pub fn check(&self, value: Option<&FieldValue>) -> Result<(), String> {
        let present = value.filter(|v| !v.is_blank());

        let outcome = match (&self.kind, present) {
            (RuleKind::Required, None) => Err(format!("{} is required", self.field)),
            (RuleKind::Required, Some(_)) => Ok(()),
            (RuleKind::Custom(check), _) => check(value),
            (_, None) => Ok(()),
            (kind, Some(value)) => self.check_present(kind, value),
        };

        outcome.map_err(|default| self.message.clone().unwrap_or(default))
    }

    fn check_present(&self, kind: &RuleKind, value: &FieldValue) -> Result<(), String> {
        let field = &self.field;
        match kind {
            RuleKind::MinLength(min) => {
                if char_len(value) < *min {
                    return Err(format!("{} must be at least {} characters", field, min));
                }
            }
            RuleKind::MaxLength(max) => {
                if char_len(value) > *max {
                    return Err(format!("{} must be at most {} characters", field, max));
                }
            }
            RuleKind::Email => {
                let valid = value
                    .as_str()
                    .map(|s| EMAIL_PATTERN.is_match(s.trim()))
                    .unwrap_or(false);
                if !valid {
                    return Err(format!("{} must be a valid email address", field));
                }
            }
            RuleKind::Numeric => {
                if value.as_f64().is_none() {
                    return Err(format!("{} must be a number", field));
                }
            }
            RuleKind::Integer => {
                let valid = match value {
                    FieldValue::Int(_) => true,
                    FieldValue::Text(s) => s.trim().parse::<i64>().is_ok(),
                    _ => false,
                };
                if !valid {
                    return Err(format!("{} must be an integer", field));
                }
            }
            RuleKind::Range { min, max } => match value.as_f64() {
                Some(n) if n >= *min && n <= *max => {}
                _ => {
                    return Err(format!("{} must be between {} and {}", field, min, max));
                }
            },
            RuleKind::Pattern(regex) => {
                if !regex.is_match(&value.to_string()) {
                    return Err(format!("{} has an invalid format", field));
                }
            }
            RuleKind::OneOf(allowed) => {
                if !allowed.contains(value) {
                    let options: Vec<String> = allowed.iter().map(|v| v.to_string()).collect();
                    return Err(format!("{} must be one of: {}", field, options.join(", ")));
                }
            }
            // Handled before a value is required
            RuleKind::Required | RuleKind::Custom(_) => {}
        }
        Ok(())
    }
}

fn char_len(value: &FieldValue) -> usize {
    match value {
        FieldValue::Text(s) => s.chars().count(),
        other => other.to_string().chars().count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_missing_null_and_blank() {
        let rule = ValidationRule::required("name");
        assert!(rule.check(None).is_err());
        assert!(rule.check(Some(&FieldValue::Null)).is_err());
        assert!(rule.check(Some(&FieldValue::from("  "))).is_err());
        assert!(rule.check(Some(&FieldValue::from("A"))).is_ok());
        assert_eq!(rule.check(None).unwrap_err(), "name is required");
    }

    #[test]
    fn test_optional_rules_accept_missing_value() {
        assert!(ValidationRule::email("email").check(None).is_ok());
        assert!(ValidationRule::min_length("name", 3)
            .check(Some(&FieldValue::from("")))
            .is_ok());
        assert!(ValidationRule::range("age", 1.0, 5.0)
            .check(Some(&FieldValue::Null))
            .is_ok());
    }

    #[test]
    fn test_length_counts_characters() {
        let rule = ValidationRule::max_length("name", 3);
        assert!(rule.check(Some(&FieldValue::from("äöü"))).is_ok());
        assert!(rule.check(Some(&FieldValue::from("abcd"))).is_err());
        assert!(ValidationRule::min_length("code", 2)
            .check(Some(&FieldValue::Int(7)))
            .is_err());
    }

    #[test]
    fn test_email() {
        let rule = ValidationRule::email("email");
        assert!(rule.check(Some(&FieldValue::from("a@x.com"))).is_ok());
        assert!(rule.check(Some(&FieldValue::from("a@x"))).is_err());
        assert!(rule.check(Some(&FieldValue::from("not an email"))).is_err());
        assert!(rule.check(Some(&FieldValue::Int(1))).is_err());
    }

    #[test]
    fn test_numeric_integer_range() {
        assert!(ValidationRule::numeric("n")
            .check(Some(&FieldValue::from("2.5")))
            .is_ok());
        assert!(ValidationRule::integer("n")
            .check(Some(&FieldValue::from("2.5")))
            .is_err());
        assert!(ValidationRule::integer("n")
            .check(Some(&FieldValue::Int(2)))
            .is_ok());

        let range = ValidationRule::range("age", 18.0, 99.0);
        assert!(range.check(Some(&FieldValue::Int(18))).is_ok());
        assert!(range.check(Some(&FieldValue::Int(100))).is_err());
        assert!(range.check(Some(&FieldValue::from("abc"))).is_err());
    }

    #[test]
    fn test_pattern_and_one_of() {
        let rule = ValidationRule::pattern("slug", r"^[a-z0-9-]+$").unwrap();
        assert!(rule.check(Some(&FieldValue::from("hello-world"))).is_ok());
        assert!(rule.check(Some(&FieldValue::from("Hello World"))).is_err());

        let rule = ValidationRule::one_of("role", vec!["admin".into(), "user".into()]);
        assert!(rule.check(Some(&FieldValue::from("user"))).is_ok());
        assert_eq!(
            rule.check(Some(&FieldValue::from("root"))).unwrap_err(),
            "role must be one of: admin, user"
        );
    }

    #[test]
    fn test_custom_sees_missing_value() {
        fn must_be_set(value: Option<&FieldValue>) -> Result<(), String> {
            value.map(|_| ()).ok_or_else(|| "missing".to_string())
        }
        let rule = ValidationRule::custom("token", must_be_set);
        assert_eq!(rule.check(None).unwrap_err(), "missing");
        assert!(rule.check(Some(&FieldValue::Null)).is_ok());
    }

    #[test]
    fn test_custom_message_overrides_default() {
        let rule = ValidationRule::required("name").with_message("Please enter a name");
        assert_eq!(rule.check(None).unwrap_err(), "Please enter a name");
    }
}
