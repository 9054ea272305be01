//! Persistence port for the dedup seen-set.

use crate::intake::domain::SeenSet;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for seen-set store operations.
pub type SeenSetStoreResult<T> = Result<T, SeenSetStoreError>;

/// Durable storage contract for the seen-set.
///
/// Implementations must make `save` atomic: the write succeeds fully or the
/// previously persisted set remains intact, so a crash mid-cycle never
/// produces a torn seen-set.
#[async_trait]
pub trait SeenSetStore: Send + Sync {
    /// Loads the persisted seen-set, or an empty set when none exists yet.
    ///
    /// # Errors
    ///
    /// Returns [`SeenSetStoreError::Persistence`] when the stored set exists
    /// but cannot be read or decoded.
    async fn load(&self) -> SeenSetStoreResult<SeenSet>;

    /// Atomically replaces the persisted seen-set.
    ///
    /// # Errors
    ///
    /// Returns [`SeenSetStoreError::Persistence`] when the write fails; the
    /// previous set must remain readable in that case.
    async fn save(&self, seen: &SeenSet) -> SeenSetStoreResult<()>;
}

/// Errors returned by seen-set store implementations.
#[derive(Debug, Clone, Error)]
pub enum SeenSetStoreError {
    /// Persistence-layer failure.
    #[error("seen-set persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SeenSetStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
