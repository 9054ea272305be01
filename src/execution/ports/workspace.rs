//! Workspace preparation port.

use crate::intake::domain::TaskRecord;
use async_trait::async_trait;
use camino::Utf8PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Result type for workspace operations.
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

/// Contract for allocating an isolated working directory per task and
/// materialising the project the tool operates on.
#[async_trait]
pub trait WorkspaceManager: Send + Sync {
    /// Prepares the working directory for a task and returns its path.
    ///
    /// Allocation is keyed by the task id and idempotent: calling again for
    /// the same id must not clobber an already materialised workspace.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError`] when the directory cannot be created or a
    /// remote project cannot be cloned; both are infrastructure failures.
    async fn prepare(&self, task: &TaskRecord) -> WorkspaceResult<Utf8PathBuf>;
}

/// Errors returned by workspace manager implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkspaceError {
    /// The working directory could not be created or populated.
    #[error("failed to allocate working directory: {0}")]
    Allocation(Arc<std::io::Error>),

    /// A remote repository could not be cloned into the workspace.
    #[error("failed to clone {locator}: {reason}")]
    Clone {
        /// Remote repository locator that failed to clone.
        locator: String,
        /// Diagnostic output from the clone attempt.
        reason: String,
    },
}

impl WorkspaceError {
    /// Wraps a directory allocation failure.
    #[must_use]
    pub fn allocation(err: std::io::Error) -> Self {
        Self::Allocation(Arc::new(err))
    }
}
