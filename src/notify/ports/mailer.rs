//! Outbound mail transport port.

use crate::notify::domain::{MailReceipt, OutgoingMail};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for mailer operations.
pub type MailerResult<T> = Result<T, MailerError>;

/// Contract for the outbound mail relay.
///
/// The concrete relay protocol client is an external collaborator; the core
/// requires only connectivity verification and a single send operation
/// returning the provider-assigned message identifier.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Verifies connectivity to the relay.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::Connection`] when the relay is unreachable.
    async fn verify(&self) -> MailerResult<()>;

    /// Sends one mail and returns the provider receipt.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::Delivery`] when the relay rejects or fails
    /// the send.
    async fn send(&self, mail: &OutgoingMail) -> MailerResult<MailReceipt>;
}

/// Errors returned by mailer implementations.
#[derive(Debug, Clone, Error)]
pub enum MailerError {
    /// The relay could not be reached.
    #[error("mail relay connection error: {0}")]
    Connection(Arc<dyn std::error::Error + Send + Sync>),

    /// The relay failed to deliver the mail.
    #[error("mail delivery error: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl MailerError {
    /// Wraps a connection error.
    pub fn connection(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Connection(Arc::new(err))
    }

    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
