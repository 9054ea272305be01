//! Append-only delivery audit entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit entry appended after a successful delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentAuditEntry {
    timestamp: DateTime<Utc>,
    recipient: String,
    subject: String,
    message_id: String,
    status: String,
}

impl SentAuditEntry {
    /// Creates a success entry.
    #[must_use]
    pub fn new(
        timestamp: DateTime<Utc>,
        recipient: impl Into<String>,
        subject: impl Into<String>,
        message_id: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            recipient: recipient.into(),
            subject: subject.into(),
            message_id: message_id.into(),
            status: "sent".to_owned(),
        }
    }

    /// Returns the delivery time.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the recipient address.
    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Returns the subject line that was sent.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the provider-assigned message identifier.
    #[must_use]
    pub fn message_id(&self) -> &str {
        &self.message_id
    }
}

/// Audit entry appended after a failed delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedAuditEntry {
    timestamp: DateTime<Utc>,
    error: String,
    status: String,
}

impl FailedAuditEntry {
    /// Creates a failure entry.
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, error: impl Into<String>) -> Self {
        Self {
            timestamp,
            error: error.into(),
            status: "failed".to_owned(),
        }
    }

    /// Returns the failure time.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the error detail.
    #[must_use]
    pub fn error(&self) -> &str {
        &self.error
    }
}
