//! Bounded tool execution for Courier.
//!
//! Turns a task record into one supervised subprocess run of the external
//! code-modification tool: a per-task workspace is prepared, the invocation
//! is resolved deterministically from the task, the process runs under a
//! hard wall-clock deadline with both output streams captured, and the
//! structured result is persisted before flowing on to reporting. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The orchestration flow in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
