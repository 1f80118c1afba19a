//! Unified value typing between entity attributes and PostgreSQL
//! This crate provides the dynamically typed scalar stored in every entity attribute

pub mod serialize;
pub mod sql;
pub mod types;

pub use sql::{pg_type_to_value_kind, ValueKind};
pub use types::FieldValue;
