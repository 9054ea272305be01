//! Persistence port for rendered report artifacts.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for report store operations.
pub type ReportStoreResult<T> = Result<T, ReportStoreError>;

/// Durable storage contract for rendered reports.
///
/// A report that cannot be persisted is a pipeline-level failure; callers
/// treat store errors as fatal, never as degradable.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persists the rendered HTML for a task.
    ///
    /// # Errors
    ///
    /// Returns [`ReportStoreError::Persistence`] when the write fails.
    async fn save(&self, task_id: &str, html: &str) -> ReportStoreResult<()>;
}

/// Errors returned by report store implementations.
#[derive(Debug, Clone, Error)]
pub enum ReportStoreError {
    /// Persistence-layer failure.
    #[error("report persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReportStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
