//! Persistence port for task records handed between pipeline stages.

use crate::intake::domain::{TaskId, TaskRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task record store operations.
pub type TaskRecordStoreResult<T> = Result<T, TaskRecordStoreError>;

/// Durable storage contract for task records.
///
/// Each pipeline stage runs as a discrete scheduled invocation, so the task
/// record produced at intake must be durable rather than held in memory for
/// the orchestrator and report builder to pick up later.
#[async_trait]
pub trait TaskRecordStore: Send + Sync {
    /// Persists a newly created task record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRecordStoreError::Persistence`] when the write fails.
    async fn save(&self, task: &TaskRecord) -> TaskRecordStoreResult<()>;

    /// Loads a task record by identifier.
    ///
    /// Returns `None` when no record exists for the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRecordStoreError::Persistence`] when the stored record
    /// exists but cannot be read or decoded.
    async fn find_by_id(&self, id: &TaskId) -> TaskRecordStoreResult<Option<TaskRecord>>;
}

/// Errors returned by task record store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRecordStoreError {
    /// Persistence-layer failure.
    #[error("task record persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRecordStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
