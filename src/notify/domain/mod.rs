//! Domain model for outbound notification.

mod audit;
mod mail;

pub use audit::{FailedAuditEntry, SentAuditEntry};
pub use mail::{
    LOG_CONTENT_TYPE, MailAttachment, MailReceipt, OutgoingMail, REPORT_CONTENT_TYPE,
};
