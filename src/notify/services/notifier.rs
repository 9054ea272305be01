//! Outbound delivery with audit trail.

use crate::notify::{
    domain::{FailedAuditEntry, MailAttachment, MailReceipt, OutgoingMail, SentAuditEntry},
    ports::{
        AttachmentSource, DeliveryAuditLog, DeliveryAuditLogError, Mailer, MailerError,
    },
};
use crate::report::domain::RenderedReport;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Maximum number of execution-log artifacts attached to one mail.
pub const MAX_LOG_ATTACHMENTS: usize = 3;

/// Service-level errors for the notify stage.
#[derive(Debug, Error)]
pub enum NotifierError {
    /// The recipient address is empty.
    #[error("notification recipient is not configured")]
    MissingRecipient,
    /// The rendered report body is empty.
    #[error("notification body is empty")]
    EmptyBody,
    /// The outbound transport failed.
    #[error(transparent)]
    Mailer(#[from] MailerError),
    /// The audit trail could not be appended.
    #[error(transparent)]
    Audit(#[from] DeliveryAuditLogError),
}

/// Result type for notifier operations.
pub type NotifierResult<T> = Result<T, NotifierError>;

/// Notifier stage.
///
/// Delivers a rendered report through the outbound transport with
/// opportunistically gathered attachments and appends one audit entry per
/// attempt. Never retries or resends on its own; re-delivery is the external
/// scheduler's responsibility.
#[derive(Clone)]
pub struct NotifierService<M, A, L, C>
where
    M: Mailer,
    A: AttachmentSource,
    L: DeliveryAuditLog,
    C: Clock + Send + Sync,
{
    mailer: Arc<M>,
    attachments: Arc<A>,
    audit: Arc<L>,
    clock: Arc<C>,
}

impl<M, A, L, C> NotifierService<M, A, L, C>
where
    M: Mailer,
    A: AttachmentSource,
    L: DeliveryAuditLog,
    C: Clock + Send + Sync,
{
    /// Creates a new notifier.
    #[must_use]
    pub const fn new(mailer: Arc<M>, attachments: Arc<A>, audit: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            mailer,
            attachments,
            audit,
            clock,
        }
    }

    /// Delivers one rendered report to the recipient.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::MissingRecipient`] or
    /// [`NotifierError::EmptyBody`] for configuration errors,
    /// [`NotifierError::Mailer`] when verification or the send fails, and
    /// [`NotifierError::Audit`] when the audit trail cannot be appended.
    /// Attachment-gathering failures are not errors; the mail is sent with
    /// fewer or no attachments.
    pub async fn deliver(
        &self,
        report: &RenderedReport,
        recipient: &str,
    ) -> NotifierResult<MailReceipt> {
        if recipient.trim().is_empty() {
            return Err(NotifierError::MissingRecipient);
        }
        if report.html().trim().is_empty() {
            return Err(NotifierError::EmptyBody);
        }

        if let Err(err) = self.mailer.verify().await {
            self.record_failure(&err).await?;
            return Err(err.into());
        }

        let attachments = self.gather_attachments().await;
        let mail = OutgoingMail::new(recipient, report.subject(), report.html())
            .with_attachments(attachments);

        match self.mailer.send(&mail).await {
            Ok(receipt) => {
                let entry = SentAuditEntry::new(
                    self.clock.utc(),
                    recipient,
                    report.subject(),
                    receipt.message_id(),
                );
                self.audit.record_sent(&entry).await?;
                tracing::info!(
                    recipient,
                    message_id = receipt.message_id(),
                    attachment_count = mail.attachments().len(),
                    "notification delivered"
                );
                Ok(receipt)
            }
            Err(err) => {
                self.record_failure(&err).await?;
                Err(err.into())
            }
        }
    }

    async fn gather_attachments(&self) -> Vec<MailAttachment> {
        let mut attachments = match self.attachments.recent_logs(MAX_LOG_ATTACHMENTS).await {
            Ok(logs) => logs,
            Err(err) => {
                tracing::warn!(error = %err, "skipping log attachments");
                Vec::new()
            }
        };
        match self.attachments.latest_report().await {
            Ok(Some(report)) => attachments.push(report),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "skipping report attachment");
            }
        }
        attachments
    }

    async fn record_failure(&self, err: &MailerError) -> NotifierResult<()> {
        tracing::warn!(error = %err, "notification delivery failed");
        let entry = FailedAuditEntry::new(self.clock.utc(), err.to_string());
        self.audit.record_failed(&entry).await?;
        Ok(())
    }
}
