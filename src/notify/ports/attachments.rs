//! Attachment discovery port.

use crate::notify::domain::MailAttachment;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for attachment source operations.
pub type AttachmentSourceResult<T> = Result<T, AttachmentSourceError>;

/// Contract for discovering artifacts worth attaching to a notification.
///
/// Attachment gathering is opportunistic; callers treat errors as
/// degradable and send with fewer or no attachments.
#[async_trait]
pub trait AttachmentSource: Send + Sync {
    /// Returns the most recent execution-log artifacts, newest first,
    /// capped at `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentSourceError::Persistence`] when the artifact
    /// directory cannot be scanned.
    async fn recent_logs(&self, limit: usize) -> AttachmentSourceResult<Vec<MailAttachment>>;

    /// Returns the single most recent rendered report, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentSourceError::Persistence`] when the artifact
    /// directory cannot be scanned.
    async fn latest_report(&self) -> AttachmentSourceResult<Option<MailAttachment>>;
}

/// Errors returned by attachment source implementations.
#[derive(Debug, Clone, Error)]
pub enum AttachmentSourceError {
    /// Persistence-layer failure.
    #[error("attachment discovery error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AttachmentSourceError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
