//! Convenience re-exports for common entity-object usage

// Core traits
pub use crate::traits::{EntityMetadata, EntitySchema};

// Entities and their storage
pub use crate::attributes::AttributeStore;
pub use crate::entity::Entity;

// Error types
pub use crate::errors::{EntityError, StatementError, StoreError};

// Data store
pub use crate::data_store::{DataStore, PgExecutor, StatementExecutor};
pub use crate::result::{ExecutionResult, ResultRow};

// Validation
pub use crate::rules::{RuleKind, ValidationErrors, ValidationReport, ValidationRule};

// Statement building
pub use crate::query_builder::{Condition, ParamRole, Statement, StatementBuilder, StatementKind};

// Values
pub use type_mapping::FieldValue;

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use sqlx::PgPool;
