//! Gated writes
//!
//! Every write validates first. No statement is sent for an entity that
//! fails its rules, and any `Err` means no write was confirmed.

use crate::data_store::DataStore;
use crate::entity::Entity;
use crate::errors::EntityError;
use crate::query_builder::Condition;
use crate::result::ExecutionResult;
use crate::traits::EntitySchema;

impl<S: EntitySchema> Entity<S> {
    /// Insert the fillable attributes as a new row.
    ///
    /// Gated by [`Entity::key_check`], then by validation. The returned row
    /// (with any generated keys) is loaded back into the attributes.
    pub async fn insert(&mut self, store: &DataStore) -> Result<ExecutionResult, EntityError> {
        self.key_check(store).await?;
        self.ensure_valid()?;

        let payload = self.payload();
        let result = store
            .insert(S::table_name(), |q| q.set_all(payload))
            .await?;
        self.load_data(&result);
        Ok(result)
    }

    /// Write the fillable attributes to the row matching every primary key
    pub async fn update(&mut self, store: &DataStore) -> Result<ExecutionResult, EntityError> {
        self.ensure_valid()?;
        let condition = self.primary_key_condition()?;

        let payload = self.payload();
        let result = store
            .update(S::table_name(), |q| q.set_all(payload).condition(condition))
            .await?;
        Ok(result)
    }

    /// Delete the row matching every primary key
    pub async fn delete(&mut self, store: &DataStore) -> Result<ExecutionResult, EntityError> {
        self.ensure_valid()?;
        let condition = self.primary_key_condition()?;

        let result = store
            .delete(S::table_name(), |q| q.condition(condition))
            .await?;
        Ok(result)
    }

    fn ensure_valid(&mut self) -> Result<(), EntityError> {
        let report = self.validate();
        if report.is_valid() {
            return Ok(());
        }
        tracing::debug!(
            table = S::table_name(),
            fields = report.errors().len(),
            "write refused by validation"
        );
        Err(EntityError::Validation(report.into_errors()))
    }

    fn primary_key_condition(&self) -> Result<Condition, EntityError> {
        let keys = S::primary_keys();
        if keys.is_empty() {
            return Err(EntityError::NoPrimaryKey {
                table: S::table_name().to_string(),
            });
        }
        Ok(keys
            .iter()
            .fold(Condition::new(), |condition, key| {
                condition.eq(*key, self.key_value(key))
            }))
    }
}
