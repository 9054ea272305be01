//! Adapter implementations for the report ports.

pub mod fs;
pub mod memory;

pub use fs::{FsReportStore, FsTemplateSource};
pub use memory::{InMemoryReportStore, InMemoryTemplateSource};
