//! Adapter implementations for the execution ports.

pub mod fs;
pub mod memory;
pub mod process;

pub use fs::{FsExecutionLogStore, FsWorkspace};
pub use memory::{
    InMemoryExecutionLogStore, RecordedInvocation, ScriptedToolRunner, StaticWorkspace,
};
pub use process::TokioToolRunner;
