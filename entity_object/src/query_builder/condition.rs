//! Equality conditions for WHERE clauses

use type_mapping::FieldValue;

/// Positional equality conditions: `field1 = ? and field2 = ?` plus the
/// values bound to each placeholder, in the same order.
#[derive(Debug, Clone, Default)]
pub struct Condition {
    pub(crate) fields: Vec<String>,
    pub(crate) params: Vec<FieldValue>,
}

impl Condition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.push(field, value);
        self
    }

    pub(crate) fn push(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.push(field.into());
        self.params.push(value.into());
    }

    /// The condition in `a = ? and b = ?` form
    pub fn template(&self) -> String {
        self.fields
            .iter()
            .map(|field| format!("{} = ?", field))
            .collect::<Vec<_>>()
            .join(" and ")
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn params(&self) -> &[FieldValue] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
