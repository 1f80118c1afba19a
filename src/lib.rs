//! # RecordHaus
//!
//! An active-record entity layer for PostgreSQL: records resolved by primary
//! or unique key, declarative validation in front of every write, and
//! parameterized statements built with validated identifiers.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use recordhaus::prelude::*;
//!
//! #[derive(EntityMetadata)]
//! #[entity(primary_keys(id), unique_keys(email), hidden(password))]
//! pub struct User;
//!
//! impl EntitySchema for User {
//!     fn rules() -> Vec<ValidationRule> {
//!         vec![
//!             ValidationRule::required("name"),
//!             ValidationRule::required("email"),
//!             ValidationRule::email("email"),
//!         ]
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 5432, "recordhaus".to_string(),
//!         "postgres".to_string(), "password".to_string(),
//!         1, 5, 30, 600, 3600,
//!     );
//!
//!     let recordhaus = RecordHaus::new(config).await?;
//!     let store = recordhaus.data_store();
//!
//!     let mut user = recordhaus.entity::<User>();
//!     user.set("name", "John Doe");
//!     user.set("email", "john@example.com");
//!     user.insert(store).await?;
//!
//!     let mut found = recordhaus.entity::<User>();
//!     found.find_and_load(store, "john@example.com").await?;
//!     println!("Loaded: {:?}", found.to_map());
//!
//!     Ok(())
//! }
//! ```

pub mod binding;
pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use binding::{Controller, PathData, bind_model};
pub use self::core::RecordHaus;
pub use errors::RecordHausError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig};

// Re-export internal crates used by macros and public API
// These MUST be public for the generated macro code to work correctly
pub use entity_derive;
pub use entity_object;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
