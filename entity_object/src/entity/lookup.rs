//! Key resolution and reads

use crate::data_store::DataStore;
use crate::entity::Entity;
use crate::errors::EntityError;
use crate::result::ExecutionResult;
use crate::traits::EntitySchema;
use type_mapping::FieldValue;

impl<S: EntitySchema> Entity<S> {
    /// Resolve one record by a lookup value and load it.
    ///
    /// Tries each primary key field, then each unique key field, with an
    /// equality select on `value`. The first field whose result holds exactly
    /// one row wins and later fields are never queried. Results with several
    /// rows are ambiguous and skipped. On `NotFound` the attributes are left
    /// as they were.
    pub async fn find_and_load(
        &mut self,
        store: &DataStore,
        value: impl Into<FieldValue> + Send,
    ) -> Result<(), EntityError> {
        let value = value.into();
        let table = S::table_name();

        for field in S::primary_keys().iter().chain(S::unique_keys()) {
            let result = store
                .select(table, |q| q.where_eq(*field, value.clone()))
                .await?;

            if self.load_data(&result) {
                tracing::debug!(table, field, "record resolved");
                return Ok(());
            }
            crate::trace_log!(
                "[FIND] {}.{} matched {} row(s)",
                table,
                field,
                result.row_count()
            );
        }

        tracing::debug!(table, "no key field matched the lookup value");
        Err(EntityError::NotFound {
            table: table.to_string(),
        })
    }

    /// Check that no existing row shares a key value with this entity.
    ///
    /// Runs one existence select per primary and unique key field that holds
    /// a value. Unset and NULL keys are skipped since `= NULL` matches no row.
    /// Both key lists must be declared. The check and
    /// a following insert are separate round trips, so two writers can both
    /// pass it for the same value.
    pub async fn key_check(&self, store: &DataStore) -> Result<(), EntityError> {
        let table = S::table_name();
        if S::primary_keys().is_empty() || S::unique_keys().is_empty() {
            return Err(EntityError::MissingKeys {
                table: table.to_string(),
            });
        }

        for field in S::primary_keys().iter().chain(S::unique_keys()) {
            let current = self.key_value(field);
            if current.is_null() {
                crate::trace_log!("[KEY CHECK] {}.{} unset, skipped", table, field);
                continue;
            }
            let result = store
                .select(table, |q| {
                    q.fields([*field]).where_eq(*field, current).limit(1, 0)
                })
                .await?;

            if !result.is_empty() {
                tracing::debug!(table, field, "key conflict");
                return Err(EntityError::KeyConflict {
                    table: table.to_string(),
                    field: field.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Select `count` rows starting at `offset`, projected onto the
    /// viewable fields
    pub async fn first(
        &self,
        store: &DataStore,
        count: i64,
        offset: i64,
    ) -> Result<ExecutionResult, EntityError> {
        let table = S::table_name();
        let fields = self.viewable_fields();
        if fields.is_empty() {
            return Err(EntityError::NoVisibleFields {
                table: table.to_string(),
            });
        }

        let result = store
            .select(table, |q| q.fields(fields).limit(count, offset))
            .await?;
        Ok(result)
    }
}
