//! Courier: mail-driven task automation pipeline.
//!
//! This crate provides the core of an unattended automation pipeline: an
//! inbound mail matching a convention produces a task, the pipeline executes
//! an external code-modification tool against a target project under a hard
//! timeout, and delivers a formatted result notification with a durable
//! audit trail.
//!
//! # Architecture
//!
//! Courier follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (filesystem, process,
//!   in-memory fakes)
//!
//! # Modules
//!
//! - [`intake`]: Deduplicated task intake from the inbound mailbox
//! - [`execution`]: Bounded subprocess execution with streaming capture
//! - [`report`]: Result rendering into notification payloads
//! - [`notify`]: Outbound delivery with append-only audit logs
//! - [`config`]: Process-boundary configuration surface

pub mod config;
pub mod execution;
pub mod intake;
pub mod notify;
pub mod report;
