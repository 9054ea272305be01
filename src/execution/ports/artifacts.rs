//! Durable execution log port.

use crate::execution::domain::ExecutionResult;
use crate::intake::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for execution log store operations.
pub type ExecutionLogStoreResult<T> = Result<T, ExecutionLogStoreError>;

/// Durable storage contract for per-task execution artifacts.
///
/// The full structured result is persisted regardless of success; on
/// non-success the standard error text is additionally persisted as a
/// separate error artifact.
#[async_trait]
pub trait ExecutionLogStore: Send + Sync {
    /// Persists the full structured execution result, keyed by task id.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionLogStoreError::Persistence`] when the write fails.
    async fn save_result(&self, result: &ExecutionResult) -> ExecutionLogStoreResult<()>;

    /// Persists the raw standard error text as the per-task error artifact.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionLogStoreError::Persistence`] when the write fails.
    async fn save_error(&self, task_id: &TaskId, stderr: &str) -> ExecutionLogStoreResult<()>;
}

/// Errors returned by execution log store implementations.
#[derive(Debug, Clone, Error)]
pub enum ExecutionLogStoreError {
    /// Persistence-layer failure.
    #[error("execution log persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ExecutionLogStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
