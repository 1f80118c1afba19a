//! Data store facade
//!
//! The entity layer talks to the database only through [`DataStore`], which
//! builds statements and hands them to a [`StatementExecutor`].

pub mod executor;
pub mod facade;
mod params;
pub mod postgres;

pub use executor::StatementExecutor;
pub use facade::DataStore;
pub use postgres::PgExecutor;
