//! Port contracts for the intake stage.

mod mailbox;
mod seen_store;
mod task_store;

pub use mailbox::{MailboxError, MailboxResult, TaskMailbox};
pub use seen_store::{SeenSetStore, SeenSetStoreError, SeenSetStoreResult};
pub use task_store::{TaskRecordStore, TaskRecordStoreError, TaskRecordStoreResult};
