//! External template source port.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for template source operations.
pub type TemplateSourceResult<T> = Result<T, TemplateSourceError>;

/// The two fixed report templates, selected by execution outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Template for a successful execution.
    Success,
    /// Template for a failed execution.
    Failure,
}

/// Contract for loading externally maintained report templates.
///
/// An absent template is not an error; the builder substitutes its built-in
/// fallback so report generation never fails for a missing template.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Loads the template of the given kind, or `None` when unavailable.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateSourceError::Persistence`] when the template exists
    /// but cannot be read.
    async fn load(&self, kind: TemplateKind) -> TemplateSourceResult<Option<String>>;
}

/// Errors returned by template source implementations.
#[derive(Debug, Clone, Error)]
pub enum TemplateSourceError {
    /// Persistence-layer failure.
    #[error("template source error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TemplateSourceError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
