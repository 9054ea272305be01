//! Port contracts for the report stage.

mod store;
mod templates;

pub use store::{ReportStore, ReportStoreError, ReportStoreResult};
pub use templates::{TemplateKind, TemplateSource, TemplateSourceError, TemplateSourceResult};
