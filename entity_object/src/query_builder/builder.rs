//! Fluent statement builder

use crate::errors::StatementError;
use crate::query_builder::assignment::AssignmentSet;
use crate::query_builder::condition::Condition;
use crate::query_builder::pagination::Pagination;
use crate::query_builder::sql_generation::SqlGenerator;
use crate::query_builder::statement::{Statement, StatementKind};
use type_mapping::FieldValue;

/// Accumulates the parts of one statement. Built fresh for every operation
/// and consumed by [`StatementBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct StatementBuilder {
    pub(crate) fields: Vec<String>,
    pub(crate) condition: Condition,
    pub(crate) assignments: AssignmentSet,
    pub(crate) pagination: Option<Pagination>,
    pending_error: Option<StatementError>,
}

impl StatementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add columns to the projection. An empty projection selects every column.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Add `field = ?` to the condition
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.condition.push(field, value);
        self
    }

    /// Add one `field = ?` per field, bound positionally to `params`.
    /// A length mismatch is reported by `build`.
    pub fn where_all<I, S>(mut self, fields: I, params: Vec<FieldValue>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.len() != params.len() {
            self.pending_error.get_or_insert(StatementError::ConditionArity {
                fields: fields.len(),
                params: params.len(),
            });
            return self;
        }
        for (field, value) in fields.into_iter().zip(params) {
            self.condition.push(field, value);
        }
        self
    }

    /// Add a prepared condition
    pub fn condition(mut self, condition: Condition) -> Self {
        self.condition.fields.extend(condition.fields);
        self.condition.params.extend(condition.params);
        self
    }

    /// Assign a column for INSERT / UPDATE
    pub fn set(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.assignments.insert(field, value);
        self
    }

    /// Assign several columns in order
    pub fn set_all<I, S, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<FieldValue>,
    {
        for (field, value) in values {
            self.assignments.insert(field, value);
        }
        self
    }

    pub fn limit(mut self, count: i64, offset: i64) -> Self {
        self.pagination = Some(Pagination::new(count, offset));
        self
    }

    /// The condition in `a = ? and b = ?` form
    pub fn condition_template(&self) -> String {
        self.condition.template()
    }

    /// Values bound to the condition placeholders, in order
    pub fn params(&self) -> &[FieldValue] {
        self.condition.params()
    }

    pub fn assignments(&self) -> &AssignmentSet {
        &self.assignments
    }

    /// Validate every identifier and render the statement
    pub fn build(self, kind: StatementKind, table: &str) -> Result<Statement, StatementError> {
        if let Some(error) = self.pending_error {
            return Err(error);
        }
        SqlGenerator::generate(
            kind,
            table,
            &self.fields,
            &self.condition,
            &self.assignments,
            self.pagination,
        )
    }
}
