//! Domain model for report derivation and rendering.

mod format;
mod payload;

pub use format::{
    MAX_OUTPUT_CHARS, MAX_SUBJECT_DESCRIPTION_CHARS, TRUNCATION_MARKER, UNKNOWN_PLACEHOLDER,
    build_subject, format_duration, format_timestamp, truncate_output,
};
pub use payload::{RenderedReport, ReportPayload};
