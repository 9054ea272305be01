//! Service layer for deduplicated task intake.

mod intake;

pub use intake::{IntakeError, IntakeResult, IntakeService};
