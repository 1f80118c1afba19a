//! Entity Object - active-record core for RecordHaus
//!
//! This crate provides the entity layer: attribute storage, declarative
//! validation, parameterized statement building and the data store facade
//! that executes statements.

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod attributes;
pub mod data_store;
pub mod entity;
pub mod errors;
pub mod prelude;
pub mod query_builder;
pub mod result;
pub mod rules;
pub mod traits;
pub mod validation;

pub use attributes::AttributeStore;
pub use data_store::{DataStore, PgExecutor, StatementExecutor};
pub use entity::Entity;
pub use errors::{EntityError, StatementError, StoreError};
pub use query_builder::{Statement, StatementBuilder, StatementKind};
pub use result::{ExecutionResult, ResultRow};
pub use rules::{RuleKind, ValidationEngine, ValidationErrors, ValidationReport, ValidationRule};
pub use traits::*;
pub use type_mapping::FieldValue;
pub use validation::{IdentifierError, ValidatedFieldName, ValidatedTableName};
