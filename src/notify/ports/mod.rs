//! Port contracts for the notify stage.

mod attachments;
mod audit;
mod mailer;

pub use attachments::{AttachmentSource, AttachmentSourceError, AttachmentSourceResult};
pub use audit::{DeliveryAuditLog, DeliveryAuditLogError, DeliveryAuditLogResult};
pub use mailer::{Mailer, MailerError, MailerResult};
