//! Domain model for bounded tool execution.
//!
//! Models the deterministic tool invocation, the structured execution
//! result, and the one-shot latch that resolves the race between a natural
//! process exit and the wall-clock timeout.

mod invocation;
mod outcome;

pub use invocation::{ToolInvocation, mode_flag, shell_escape};
pub use outcome::{ExecutionLatch, ExecutionOutcome, ExecutionResult, ExecutionResultParts};
