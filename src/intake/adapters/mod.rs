//! Adapter implementations for the intake ports.

pub mod fs;
pub mod memory;

pub use fs::{FsSeenSetStore, FsTaskRecordStore, SEEN_SET_FILE};
pub use memory::{InMemoryMailbox, InMemorySeenSetStore, InMemoryTaskRecordStore};
