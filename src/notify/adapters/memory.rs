//! In-memory notify adapters for tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::notify::{
    domain::{FailedAuditEntry, MailAttachment, MailReceipt, OutgoingMail, SentAuditEntry},
    ports::{
        AttachmentSource, AttachmentSourceError, AttachmentSourceResult, DeliveryAuditLog,
        DeliveryAuditLogError, DeliveryAuditLogResult, Mailer, MailerError, MailerResult,
    },
};

/// Mailer fake recording sent mail and supporting scripted failures.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMailer {
    state: Arc<RwLock<MailerState>>,
}

#[derive(Debug, Default)]
struct MailerState {
    sent: Vec<OutgoingMail>,
    fail_verify: bool,
    fail_send: bool,
}

impl InMemoryMailer {
    /// Creates a mailer that accepts every send.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent connectivity checks fail.
    ///
    /// # Panics
    ///
    /// Panics when the state lock is poisoned; the fake is test-only.
    pub fn fail_verify(&self) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        state.fail_verify = true;
    }

    /// Makes subsequent sends fail.
    ///
    /// # Panics
    ///
    /// Panics when the state lock is poisoned; the fake is test-only.
    pub fn fail_send(&self) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        state.fail_send = true;
    }

    /// Returns the mails sent so far.
    ///
    /// # Panics
    ///
    /// Panics when the state lock is poisoned; the fake is test-only.
    #[must_use]
    pub fn sent(&self) -> Vec<OutgoingMail> {
        let state = self
            .state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        state.sent.clone()
    }
}

#[async_trait]
impl Mailer for InMemoryMailer {
    async fn verify(&self) -> MailerResult<()> {
        let state = self.state.read().map_err(|err| {
            MailerError::connection(std::io::Error::other(err.to_string()))
        })?;
        if state.fail_verify {
            return Err(MailerError::connection(std::io::Error::other(
                "scripted connection failure",
            )));
        }
        Ok(())
    }

    async fn send(&self, mail: &OutgoingMail) -> MailerResult<MailReceipt> {
        let mut state = self.state.write().map_err(|err| {
            MailerError::delivery(std::io::Error::other(err.to_string()))
        })?;
        if state.fail_send {
            return Err(MailerError::delivery(std::io::Error::other(
                "scripted delivery failure",
            )));
        }
        state.sent.push(mail.clone());
        Ok(MailReceipt::new(format!("<receipt-{}>", state.sent.len())))
    }
}

/// Attachment source serving a fixed set, with a scripted failure mode.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttachmentSource {
    state: Arc<RwLock<AttachmentState>>,
}

#[derive(Debug, Default)]
struct AttachmentState {
    logs: Vec<MailAttachment>,
    report: Option<MailAttachment>,
    fail: bool,
}

impl InMemoryAttachmentSource {
    /// Creates a source with no artifacts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an execution-log attachment (newest last).
    ///
    /// # Panics
    ///
    /// Panics when the state lock is poisoned; the fake is test-only.
    pub fn add_log(&self, attachment: MailAttachment) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        state.logs.push(attachment);
    }

    /// Registers the rendered report attachment.
    ///
    /// # Panics
    ///
    /// Panics when the state lock is poisoned; the fake is test-only.
    pub fn set_report(&self, attachment: MailAttachment) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        state.report = Some(attachment);
    }

    /// Makes every scan fail.
    ///
    /// # Panics
    ///
    /// Panics when the state lock is poisoned; the fake is test-only.
    pub fn fail_scans(&self) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        state.fail = true;
    }
}

#[async_trait]
impl AttachmentSource for InMemoryAttachmentSource {
    async fn recent_logs(&self, limit: usize) -> AttachmentSourceResult<Vec<MailAttachment>> {
        let state = self.state.read().map_err(|err| {
            AttachmentSourceError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.fail {
            return Err(AttachmentSourceError::persistence(std::io::Error::other(
                "scripted scan failure",
            )));
        }
        Ok(state.logs.iter().rev().take(limit).cloned().collect())
    }

    async fn latest_report(&self) -> AttachmentSourceResult<Option<MailAttachment>> {
        let state = self.state.read().map_err(|err| {
            AttachmentSourceError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.fail {
            return Err(AttachmentSourceError::persistence(std::io::Error::other(
                "scripted scan failure",
            )));
        }
        Ok(state.report.clone())
    }
}

/// Thread-safe in-memory audit log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDeliveryAuditLog {
    state: Arc<RwLock<AuditState>>,
}

#[derive(Debug, Default)]
struct AuditState {
    sent: Vec<SentAuditEntry>,
    failed: Vec<FailedAuditEntry>,
}

impl InMemoryDeliveryAuditLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the success entries appended so far.
    ///
    /// # Panics
    ///
    /// Panics when the state lock is poisoned; the fake is test-only.
    #[must_use]
    pub fn sent_entries(&self) -> Vec<SentAuditEntry> {
        let state = self
            .state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        state.sent.clone()
    }

    /// Returns the failure entries appended so far.
    ///
    /// # Panics
    ///
    /// Panics when the state lock is poisoned; the fake is test-only.
    #[must_use]
    pub fn failed_entries(&self) -> Vec<FailedAuditEntry> {
        let state = self
            .state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        state.failed.clone()
    }
}

#[async_trait]
impl DeliveryAuditLog for InMemoryDeliveryAuditLog {
    async fn record_sent(&self, entry: &SentAuditEntry) -> DeliveryAuditLogResult<()> {
        let mut state = self.state.write().map_err(|err| {
            DeliveryAuditLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.sent.push(entry.clone());
        Ok(())
    }

    async fn record_failed(&self, entry: &FailedAuditEntry) -> DeliveryAuditLogResult<()> {
        let mut state = self.state.write().map_err(|err| {
            DeliveryAuditLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.failed.push(entry.clone());
        Ok(())
    }
}
