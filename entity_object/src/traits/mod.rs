//! Traits implemented by entity types
//!
//! `EntityMetadata` is usually derived; `EntitySchema` is written by hand.

pub mod metadata;
pub mod schema;

pub use metadata::EntityMetadata;
pub use schema::EntitySchema;
