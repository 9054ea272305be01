//! Adapter implementations for the notify ports.

pub mod fs;
pub mod memory;

pub use fs::{FAILED_AUDIT_FILE, FsAttachmentSource, FsDeliveryAuditLog, SENT_AUDIT_FILE};
pub use memory::{InMemoryAttachmentSource, InMemoryDeliveryAuditLog, InMemoryMailer};
