//! Deduplicated task intake for Courier.
//!
//! Consumes raw inbound messages from the mailbox transport, parses the task
//! convention into immutable task records, suppresses previously seen
//! messages through a durable fingerprint set, and hands durable task
//! records to the execution stage. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The polling cycle in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
