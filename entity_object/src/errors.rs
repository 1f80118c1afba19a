use crate::rules::ValidationErrors;
use crate::validation::IdentifierError;
use thiserror::Error;
use type_mapping::ValueKind;

/// A statement the builder refuses to emit
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatementError {
    #[error("Invalid identifier '{name}': {source}")]
    InvalidIdentifier {
        name: String,
        #[source]
        source: IdentifierError,
    },

    #[error("Condition has {fields} fields but {params} parameters")]
    ConditionArity { fields: usize, params: usize },

    #[error("{0} statement needs at least one assignment")]
    EmptyAssignments(&'static str),

    #[error("{0} statement does not take assignments")]
    UnexpectedAssignments(&'static str),

    #[error("{0} statement without a condition would touch every row")]
    UnboundedWrite(&'static str),
}

impl StatementError {
    pub(crate) fn identifier(name: &str, source: IdentifierError) -> Self {
        Self::InvalidIdentifier {
            name: name.to_string(),
            source,
        }
    }
}

/// Failure of the data store facade
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid statement: {0}")]
    Statement(#[from] StatementError),

    #[error("Query execution failed on table '{table}': {source}")]
    QueryExecution {
        table: String,
        sql: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Cannot decode column '{column}' of type {type_name}")]
    Decode { column: String, type_name: String },

    #[error("Cannot write a {value_kind} value to column '{column}' ({expected:?}) of '{table}'")]
    Coercion {
        table: String,
        column: String,
        value_kind: &'static str,
        expected: ValueKind,
    },
}

impl StoreError {
    pub fn query_execution(table: &str, sql: &str, source: sqlx::Error) -> Self {
        Self::QueryExecution {
            table: table.to_string(),
            sql: sql.to_string(),
            source,
        }
    }
}

/// Outcome of an entity operation that did not succeed.
///
/// Expected failures (not found, invalid attributes, duplicate keys) are
/// ordinary values here, never panics. A `Store` error after a write was sent
/// means the write is unconfirmed, not that it did not happen.
#[derive(Error, Debug)]
pub enum EntityError {
    #[error("No record in '{table}' matched the lookup value on any key field")]
    NotFound { table: String },

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Duplicate key: a row in '{table}' already has this '{field}'")]
    KeyConflict { table: String, field: String },

    #[error("Uniqueness check on '{table}' needs both primary and unique keys")]
    MissingKeys { table: String },

    #[error("'{table}' declares no primary key to constrain the statement")]
    NoPrimaryKey { table: String },

    #[error("'{table}' has no visible fields to select")]
    NoVisibleFields { table: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EntityError {
    /// Validation messages, when this is a validation failure
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            EntityError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<StatementError> for EntityError {
    fn from(e: StatementError) -> Self {
        EntityError::Store(StoreError::Statement(e))
    }
}
