//! Port contracts for the execution stage.

mod artifacts;
mod runner;
mod workspace;

pub use artifacts::{ExecutionLogStore, ExecutionLogStoreError, ExecutionLogStoreResult};
pub use runner::{ProcessCapture, ToolRunner, ToolRunnerError, ToolRunnerResult};
pub use workspace::{WorkspaceError, WorkspaceManager, WorkspaceResult};
