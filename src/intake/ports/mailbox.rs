//! Mailbox port for the inbound message transport.

use crate::intake::domain::{InboundMessage, MessageRef};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for mailbox operations.
pub type MailboxResult<T> = Result<T, MailboxError>;

/// Inbound transport contract.
///
/// The core requires three operations of a mailbox-style endpoint: list
/// unread messages matching a subject filter, fetch a full message body by
/// reference, and mark a message as read. Connection lifecycle is owned by
/// the adapter; any connection failure surfaces as
/// [`MailboxError::Connection`] and aborts the polling cycle.
#[async_trait]
pub trait TaskMailbox: Send + Sync {
    /// Lists unread messages whose subject contains the given marker token.
    ///
    /// # Errors
    ///
    /// Returns [`MailboxError::Connection`] when the transport cannot be
    /// reached or the query fails.
    async fn list_unread(&self, subject_marker: &str) -> MailboxResult<Vec<MessageRef>>;

    /// Fetches the full message for a previously listed reference.
    ///
    /// # Errors
    ///
    /// Returns [`MailboxError::Connection`] on transport failure or
    /// [`MailboxError::NotFound`] when the reference is no longer valid.
    async fn fetch(&self, message: &MessageRef) -> MailboxResult<InboundMessage>;

    /// Marks a message as read so later polls no longer return it.
    ///
    /// # Errors
    ///
    /// Returns [`MailboxError::Connection`] on transport failure or
    /// [`MailboxError::NotFound`] when the reference is no longer valid.
    async fn mark_read(&self, message: &MessageRef) -> MailboxResult<()>;
}

/// Errors returned by mailbox transport implementations.
#[derive(Debug, Clone, Error)]
pub enum MailboxError {
    /// The transport could not be reached or the operation failed in flight.
    #[error("mailbox transport error: {0}")]
    Connection(Arc<dyn std::error::Error + Send + Sync>),

    /// The referenced message no longer exists on the transport.
    #[error("message not found: {0}")]
    NotFound(MessageRef),
}

impl MailboxError {
    /// Wraps a transport-level error.
    pub fn connection(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Connection(Arc::new(err))
    }
}
