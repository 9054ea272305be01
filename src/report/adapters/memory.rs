//! In-memory report adapters for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::report::ports::{
    ReportStore, ReportStoreError, ReportStoreResult, TemplateKind, TemplateSource,
    TemplateSourceResult,
};

/// Template source serving templates registered up front.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateSource {
    templates: Arc<RwLock<HashMap<TemplateKind, String>>>,
}

impl InMemoryTemplateSource {
    /// Creates a source with no templates, so every lookup falls back.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a template for a kind.
    ///
    /// # Panics
    ///
    /// Panics when the state lock is poisoned; the fake is test-only.
    pub fn register(&self, kind: TemplateKind, template: impl Into<String>) {
        let mut templates = self
            .templates
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        templates.insert(kind, template.into());
    }
}

#[async_trait]
impl TemplateSource for InMemoryTemplateSource {
    async fn load(&self, kind: TemplateKind) -> TemplateSourceResult<Option<String>> {
        let templates = self
            .templates
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(templates.get(&kind).cloned())
    }
}

/// Thread-safe in-memory report store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportStore {
    saved: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryReportStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the persisted HTML for a task, if any.
    ///
    /// # Panics
    ///
    /// Panics when the state lock is poisoned; the fake is test-only.
    #[must_use]
    pub fn saved(&self, task_id: &str) -> Option<String> {
        let saved = self
            .saved
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        saved.get(task_id).cloned()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn save(&self, task_id: &str, html: &str) -> ReportStoreResult<()> {
        let mut saved = self.saved.write().map_err(|err| {
            ReportStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        saved.insert(task_id.to_owned(), html.to_owned());
        Ok(())
    }
}
