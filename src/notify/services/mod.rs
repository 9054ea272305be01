//! Service layer for outbound delivery.

mod notifier;

pub use notifier::{MAX_LOG_ATTACHMENTS, NotifierError, NotifierResult, NotifierService};
