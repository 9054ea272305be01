//! Subprocess runner port for the external tool.

use crate::execution::domain::{ExecutionOutcome, ToolInvocation};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for tool runner operations.
pub type ToolRunnerResult<T> = Result<T, ToolRunnerError>;

/// Raw capture of one subprocess run, before finalisation into an
/// [`crate::execution::domain::ExecutionResult`].
///
/// Standard output and standard error are accumulated as two independent
/// append-only sinks; no ordering is guaranteed between them, only within
/// each stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCapture {
    /// Terminal outcome of the run.
    pub outcome: ExecutionOutcome,
    /// Accumulated standard output.
    pub stdout: String,
    /// Accumulated standard error.
    pub stderr: String,
}

/// Contract for launching the external tool as a bounded child process.
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Runs the invocation to completion or to the wall-clock deadline.
    ///
    /// A non-zero exit or a timeout is captured as data, not an error; only
    /// the inability to start or supervise the process is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRunnerError::Spawn`] when the process cannot be started
    /// (e.g. the tool binary is missing) and [`ToolRunnerError::Supervision`]
    /// when waiting on the started process fails.
    async fn run(
        &self,
        invocation: &ToolInvocation,
        env: &[(String, String)],
        timeout: Duration,
    ) -> ToolRunnerResult<ProcessCapture>;
}

/// Errors returned by tool runner implementations.
///
/// All variants are infrastructure failures, fatal to the pipeline
/// invocation; result-level failures travel inside [`ProcessCapture`].
#[derive(Debug, Clone, Error)]
pub enum ToolRunnerError {
    /// The tool process could not be started.
    #[error("failed to start tool process: {0}")]
    Spawn(Arc<std::io::Error>),

    /// The started process could not be supervised to completion.
    #[error("failed to supervise tool process: {0}")]
    Supervision(Arc<std::io::Error>),
}

impl ToolRunnerError {
    /// Wraps a spawn failure.
    #[must_use]
    pub fn spawn(err: std::io::Error) -> Self {
        Self::Spawn(Arc::new(err))
    }

    /// Wraps a supervision failure.
    #[must_use]
    pub fn supervision(err: std::io::Error) -> Self {
        Self::Supervision(Arc::new(err))
    }
}
