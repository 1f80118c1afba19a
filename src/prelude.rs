//! Convenience re-exports for common RecordHaus usage
//!
//! This prelude module re-exports the most commonly used items from the RecordHaus ecosystem,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use recordhaus::prelude::*;
//!
//! // Now you have access to all the common RecordHaus types and traits
//! ```

// Core RecordHaus components
pub use crate::binding::{Controller, PathData, bind_model};
pub use crate::core::RecordHaus;
pub use crate::errors::RecordHausError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig};

// Re-export commonly used entity-object types for convenience
pub use entity_object::prelude::*;

// Re-export entity_object module for macro-generated code
pub use entity_object;

// Re-export entity derive for model creation
pub use entity_derive::EntityMetadata;

// Common external dependencies
pub use anyhow;
pub use sqlx;
pub use tokio;
