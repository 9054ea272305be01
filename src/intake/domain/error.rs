//! Error types for intake domain parsing.

use thiserror::Error;

/// Errors returned while parsing an inbound message into a task record.
///
/// Parse failures are isolated per message: the intake service logs them and
/// skips the message without aborting the batch, leaving it unread so a
/// later poll may retry it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskParseError {
    /// The subject does not contain the task marker token.
    #[error("subject does not contain the task marker: {0}")]
    MissingMarker(String),

    /// The subject contains nothing besides the marker token.
    #[error("task description is empty after stripping the marker")]
    EmptyDescription,
}
