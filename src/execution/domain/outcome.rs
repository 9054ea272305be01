//! Execution result and its single-assignment terminal state.

use crate::intake::domain::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal outcome of one tool subprocess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    /// The process exited on its own.
    Completed {
        /// Raw process exit code; `-1` when terminated by a signal.
        exit_code: i32,
    },
    /// The process was forcibly terminated at the wall-clock deadline.
    TimedOut,
}

/// One-shot latch resolving the race between natural exit and timeout.
///
/// Whichever event settles first owns the terminal outcome; the losing
/// event's settle call is a guaranteed no-op.
#[derive(Debug, Default)]
pub struct ExecutionLatch {
    settled: Option<ExecutionOutcome>,
}

impl ExecutionLatch {
    /// Creates an unsettled latch.
    #[must_use]
    pub const fn new() -> Self {
        Self { settled: None }
    }

    /// Settles the latch, returning `false` when it was already settled.
    pub fn settle(&mut self, outcome: ExecutionOutcome) -> bool {
        if self.settled.is_some() {
            return false;
        }
        self.settled = Some(outcome);
        true
    }

    /// Returns the terminal outcome, if settled.
    #[must_use]
    pub const fn outcome(&self) -> Option<ExecutionOutcome> {
        self.settled
    }
}

/// Parameter object for assembling a finalised execution result.
#[derive(Debug, Clone)]
pub struct ExecutionResultParts {
    /// Task the execution belongs to.
    pub task_id: TaskId,
    /// Shell-rendered invocation string.
    pub command: String,
    /// Working directory the process was rooted at.
    pub work_dir: String,
    /// Process start time.
    pub started_at: DateTime<Utc>,
    /// Finalisation time (exit or forced termination).
    pub finished_at: DateTime<Utc>,
    /// Terminal outcome.
    pub outcome: ExecutionOutcome,
    /// Accumulated standard output.
    pub stdout: String,
    /// Accumulated standard error.
    pub stderr: String,
}

/// Structured, immutable-once-finalised outcome of running the tool.
///
/// Created by the orchestrator when the subprocess terminates; never mutated
/// afterwards. Persisted verbatim as the per-task execution log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    task_id: TaskId,
    command: String,
    work_dir: String,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    duration_ms: u64,
    outcome: ExecutionOutcome,
    stdout: String,
    stderr: String,
}

impl ExecutionResult {
    /// Assembles a finalised result, deriving the duration from the
    /// start and finish timestamps.
    #[must_use]
    pub fn new(parts: ExecutionResultParts) -> Self {
        let duration_ms = parts
            .finished_at
            .signed_duration_since(parts.started_at)
            .num_milliseconds()
            .try_into()
            .unwrap_or(0);
        Self {
            task_id: parts.task_id,
            command: parts.command,
            work_dir: parts.work_dir,
            started_at: parts.started_at,
            finished_at: parts.finished_at,
            duration_ms,
            outcome: parts.outcome,
            stdout: parts.stdout,
            stderr: parts.stderr,
        }
    }

    /// Returns the owning task identifier.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the resolved invocation string.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Returns the working directory.
    #[must_use]
    pub fn work_dir(&self) -> &str {
        &self.work_dir
    }

    /// Returns the process start time.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns the finalisation time.
    #[must_use]
    pub const fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }

    /// Returns the wall-clock duration in milliseconds.
    #[must_use]
    pub const fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Returns the terminal outcome.
    #[must_use]
    pub const fn outcome(&self) -> ExecutionOutcome {
        self.outcome
    }

    /// Returns the exit code, or `None` when the process was timed out.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self.outcome {
            ExecutionOutcome::Completed { exit_code } => Some(exit_code),
            ExecutionOutcome::TimedOut => None,
        }
    }

    /// Returns `true` when the execution hit the wall-clock deadline.
    #[must_use]
    pub const fn timed_out(&self) -> bool {
        matches!(self.outcome, ExecutionOutcome::TimedOut)
    }

    /// Returns `true` when the process exited cleanly with code zero.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.outcome, ExecutionOutcome::Completed { exit_code: 0 })
    }

    /// Returns the accumulated standard output.
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Returns the accumulated standard error.
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
