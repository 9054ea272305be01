//! Domain model for deduplicated task intake.
//!
//! Models the immutable task record, the inbound message handed over by the
//! mailbox transport, the message fingerprint and seen-set used for
//! deduplication, and the line-oriented grammar that turns a message body
//! into a task record. Infrastructure concerns stay outside the domain
//! boundary.

mod error;
mod fingerprint;
mod ids;
mod message;
mod parser;
mod task;

pub use error::TaskParseError;
pub use fingerprint::{Fingerprint, SeenSet};
pub use ids::{MessageRef, TaskId};
pub use message::InboundMessage;
pub use parser::{TASK_MARKER, parse_task_message};
pub use task::{ProjectPath, TaskRecord, TaskType};
