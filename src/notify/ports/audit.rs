//! Delivery audit log port.

use crate::notify::domain::{FailedAuditEntry, SentAuditEntry};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for audit log operations.
pub type DeliveryAuditLogResult<T> = Result<T, DeliveryAuditLogError>;

/// Append-only audit trail of delivery attempts.
///
/// Success and failure entries land in distinct logs; entries are never
/// rewritten or removed.
#[async_trait]
pub trait DeliveryAuditLog: Send + Sync {
    /// Appends a success entry.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryAuditLogError::Persistence`] when the append fails.
    async fn record_sent(&self, entry: &SentAuditEntry) -> DeliveryAuditLogResult<()>;

    /// Appends a failure entry.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryAuditLogError::Persistence`] when the append fails.
    async fn record_failed(&self, entry: &FailedAuditEntry) -> DeliveryAuditLogResult<()>;
}

/// Errors returned by audit log implementations.
#[derive(Debug, Clone, Error)]
pub enum DeliveryAuditLogError {
    /// Persistence-layer failure.
    #[error("delivery audit persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DeliveryAuditLogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
