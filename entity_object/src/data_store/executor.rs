//! Statement execution seam

use crate::errors::StoreError;
use crate::query_builder::Statement;
use crate::result::ExecutionResult;
use async_trait::async_trait;

/// Runs a built statement against a backing store.
///
/// Implementations decide pooling, timeouts and retries; callers above this
/// seam never retry.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    async fn execute(&self, statement: &Statement) -> Result<ExecutionResult, StoreError>;
}
