//! Error types for the RecordHaus crate
//!
//! This module contains all error types that can be returned by RecordHaus operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordHausError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Entity(#[from] entity_object::EntityError),
}
