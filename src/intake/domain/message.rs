//! Inbound message value type handed over by the mailbox transport.

use super::Fingerprint;
use chrono::{DateTime, Utc};

/// Full inbound message as fetched from the mailbox transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    message_id: String,
    subject: String,
    from: String,
    body: String,
    received_at: DateTime<Utc>,
}

impl InboundMessage {
    /// Creates an inbound message from transport-level fields.
    #[must_use]
    pub fn new(
        message_id: impl Into<String>,
        subject: impl Into<String>,
        from: impl Into<String>,
        body: impl Into<String>,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            subject: subject.into(),
            from: from.into(),
            body: body.into(),
            received_at,
        }
    }

    /// Returns the transport-assigned message identifier.
    #[must_use]
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// Returns the subject line.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the sender address.
    #[must_use]
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Returns the plain-text body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the delivery timestamp.
    #[must_use]
    pub const fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// Computes the dedup fingerprint for this message.
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::compute(&self.message_id, self.received_at)
    }
}
