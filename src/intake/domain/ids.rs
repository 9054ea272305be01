//! Identifier newtypes for the intake domain.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque unique identifier for a task record.
///
/// Generated at intake when the source message does not carry one; accepted
/// verbatim when supplied through the configuration surface. The identifier
/// is the join key across the execution result and the rendered report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a new random task identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("task-{}", Uuid::new_v4().simple()))
    }

    /// Wraps an externally supplied identifier.
    #[must_use]
    pub fn from_value(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to an inbound message held by the mailbox transport.
///
/// The value is transport-defined (an IMAP sequence number, a provider
/// message handle) and is only ever passed back to the same transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageRef(String);

impl MessageRef {
    /// Wraps a transport-assigned message reference.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
