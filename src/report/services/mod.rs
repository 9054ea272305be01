//! Service layer for report derivation and rendering.

mod builder;

pub use builder::{
    ReportBuilderError, ReportBuilderResult, ReportBuilderService, ReportSource,
};
