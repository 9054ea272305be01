//! Outbound notification for Courier.
//!
//! Delivers rendered reports through the outbound mail transport with
//! opportunistically gathered log and report attachments, and keeps an
//! append-only audit trail of every delivery attempt. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The delivery flow in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
