//! Result reporting for Courier.
//!
//! Converts a finalised execution result (or a bare failure when no result
//! exists) into a rendered HTML notification plus a terse subject line,
//! degrading to placeholders when the originating task record is absent and
//! to built-in templates when the external ones are missing. The rendered
//! artifact is persisted before delivery. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Derivation and rendering in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
