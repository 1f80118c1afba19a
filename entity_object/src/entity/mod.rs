//! Active-record entities
//!
//! An [`Entity`] owns the attributes of one row of its schema's table and
//! drives lookup, validation and writes through a [`DataStore`].
//!
//! [`DataStore`]: crate::data_store::DataStore

pub mod core;
pub mod lookup;
pub mod mutation;

pub use self::core::Entity;
