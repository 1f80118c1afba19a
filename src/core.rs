//! Core RecordHaus functionality
//!
//! This module contains the main RecordHaus struct, which owns the
//! connection pool and the data store every entity operation goes through.

use sqlx::PgPool;
use std::time::Duration;

use crate::binding::{self, Controller, PathData};
use crate::errors::RecordHausError;
use config::DatabaseConfig;
use entity_object::{DataStore, Entity, EntitySchema};

/// Main RecordHaus coordinator that manages the database connection
pub struct RecordHaus {
    pool: PgPool,
    store: DataStore,
}

impl RecordHaus {
    /// Create new RecordHaus with database connection
    pub async fn new(config: DatabaseConfig) -> Result<Self, RecordHausError> {
        config.validate()?;
        let connection_string = config.connection_string();

        let mut pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&connection_string).await?;
        tracing::info!(
            host = %config.host,
            database = %config.database,
            max_connections = config.max_connections,
            "connected to PostgreSQL"
        );

        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        let store = DataStore::postgres(pool.clone());
        Self { pool, store }
    }

    /// Get database pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// The data store shared by every entity operation
    pub fn data_store(&self) -> &DataStore {
        &self.store
    }

    /// A fresh, empty entity of schema `S`
    pub fn entity<S: EntitySchema>(&self) -> Entity<S> {
        Entity::new()
    }

    /// Resolve the entity a request path addresses, see [`binding::bind_model`]
    pub async fn bind_model<C: Controller>(
        &self,
        path_data: &PathData,
    ) -> Result<Option<Entity<C::Model>>, RecordHausError> {
        Ok(binding::bind_model::<C>(path_data, &self.store).await?)
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), RecordHausError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
