//! Data store facade

use crate::data_store::executor::StatementExecutor;
use crate::data_store::postgres::PgExecutor;
use crate::errors::StoreError;
use crate::query_builder::{Statement, StatementBuilder, StatementKind};
use crate::result::ExecutionResult;
use std::sync::Arc;

/// Entry point for every statement the entity layer issues.
///
/// Each call takes a table name and a closure that configures a fresh
/// [`StatementBuilder`]. Cloning shares the executor.
#[derive(Clone)]
pub struct DataStore {
    executor: Arc<dyn StatementExecutor>,
}

impl std::fmt::Debug for DataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataStore").finish_non_exhaustive()
    }
}

impl DataStore {
    pub fn new(executor: Arc<dyn StatementExecutor>) -> Self {
        Self { executor }
    }

    /// Facade over a PostgreSQL pool
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self::new(Arc::new(PgExecutor::new(pool)))
    }

    pub async fn select<F>(&self, table: &str, configure: F) -> Result<ExecutionResult, StoreError>
    where
        F: FnOnce(StatementBuilder) -> StatementBuilder,
    {
        self.run(StatementKind::Select, table, configure).await
    }

    pub async fn insert<F>(&self, table: &str, configure: F) -> Result<ExecutionResult, StoreError>
    where
        F: FnOnce(StatementBuilder) -> StatementBuilder,
    {
        self.run(StatementKind::Insert, table, configure).await
    }

    pub async fn update<F>(&self, table: &str, configure: F) -> Result<ExecutionResult, StoreError>
    where
        F: FnOnce(StatementBuilder) -> StatementBuilder,
    {
        self.run(StatementKind::Update, table, configure).await
    }

    pub async fn delete<F>(&self, table: &str, configure: F) -> Result<ExecutionResult, StoreError>
    where
        F: FnOnce(StatementBuilder) -> StatementBuilder,
    {
        self.run(StatementKind::Delete, table, configure).await
    }

    /// Execute an already built statement
    pub async fn execute(&self, statement: Statement) -> Result<ExecutionResult, StoreError> {
        tracing::debug!(
            kind = statement.kind().as_str(),
            table = statement.table(),
            params = statement.params().len(),
            "executing statement"
        );
        crate::trace_log!("[STATEMENT] SQL: {}", statement.sql());

        match self.executor.execute(&statement).await {
            Ok(result) => {
                crate::trace_log!("[STATEMENT] rows: {}", result.row_count());
                Ok(result)
            }
            Err(e) => {
                tracing::warn!(
                    kind = statement.kind().as_str(),
                    table = statement.table(),
                    error = %e,
                    "statement failed"
                );
                Err(e)
            }
        }
    }

    async fn run<F>(
        &self,
        kind: StatementKind,
        table: &str,
        configure: F,
    ) -> Result<ExecutionResult, StoreError>
    where
        F: FnOnce(StatementBuilder) -> StatementBuilder,
    {
        let statement = configure(StatementBuilder::new()).build(kind, table)?;
        self.execute(statement).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<Statement>>,
    }

    #[async_trait]
    impl StatementExecutor for Recorder {
        async fn execute(&self, statement: &Statement) -> Result<ExecutionResult, StoreError> {
            self.seen.lock().unwrap().push(statement.clone());
            Ok(ExecutionResult::empty())
        }
    }

    #[tokio::test]
    async fn test_entry_points_issue_matching_kinds() {
        let recorder = Arc::new(Recorder::default());
        let store = DataStore::new(recorder.clone());

        store.select("users", |q| q.where_eq("id", 1)).await.unwrap();
        store.insert("users", |q| q.set("name", "A")).await.unwrap();
        store
            .update("users", |q| q.set("name", "B").where_eq("id", 1))
            .await
            .unwrap();
        store.delete("users", |q| q.where_eq("id", 1)).await.unwrap();

        let kinds: Vec<StatementKind> = recorder
            .seen
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                StatementKind::Select,
                StatementKind::Insert,
                StatementKind::Update,
                StatementKind::Delete
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_statement_never_reaches_executor() {
        let recorder = Arc::new(Recorder::default());
        let store = DataStore::new(recorder.clone());

        let result = store.delete("users", |q| q).await;
        assert!(matches!(result, Err(StoreError::Statement(_))));
        assert!(recorder.seen.lock().unwrap().is_empty());
    }
}
