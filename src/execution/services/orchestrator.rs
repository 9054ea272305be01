//! Execution orchestration: workspace, subprocess, timeout, durable log.

use crate::execution::{
    domain::{ExecutionResult, ExecutionResultParts, ToolInvocation},
    ports::{
        ExecutionLogStore, ExecutionLogStoreError, ToolRunner, ToolRunnerError, WorkspaceError,
        WorkspaceManager,
    },
};
use crate::intake::domain::TaskRecord;
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Hard wall-clock deadline for one tool run (30 minutes).
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Settings for invoking the external tool.
#[derive(Debug, Clone)]
pub struct ToolSettings {
    program: String,
    credential_var: String,
    credential: String,
    timeout: Duration,
}

impl ToolSettings {
    /// Creates settings with the default 30-minute timeout.
    ///
    /// The credential is propagated to the child process under
    /// `credential_var`; nothing else sensitive is added to its environment.
    #[must_use]
    pub fn new(
        program: impl Into<String>,
        credential_var: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            credential_var: credential_var.into(),
            credential: credential.into(),
            timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }

    /// Overrides the wall-clock timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the tool program name.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the wall-clock timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Service-level errors for the execution stage.
///
/// Every variant is an infrastructure failure. Tool-level failures
/// (non-zero exit, timeout) are captured inside the returned
/// [`ExecutionResult`] instead.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The workspace could not be prepared.
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
    /// The tool process could not be started or supervised.
    #[error(transparent)]
    Runner(#[from] ToolRunnerError),
    /// The execution log could not be persisted.
    #[error(transparent)]
    Artifacts(#[from] ExecutionLogStoreError),
}

/// Result type for orchestrator operations.
pub type OrchestratorResult<T> = Result<T, OrchestratorError>;

/// Execution orchestrator stage.
///
/// Given a task record, prepares an isolated workspace, invokes the external
/// tool as a bounded subprocess, and persists the structured result. Never
/// raises past its boundary for subprocess-level failures; those become a
/// non-success execution result that flows forward into reporting.
#[derive(Clone)]
pub struct OrchestratorService<W, R, L, C>
where
    W: WorkspaceManager,
    R: ToolRunner,
    L: ExecutionLogStore,
    C: Clock + Send + Sync,
{
    workspace: Arc<W>,
    runner: Arc<R>,
    logs: Arc<L>,
    clock: Arc<C>,
    settings: ToolSettings,
}

impl<W, R, L, C> OrchestratorService<W, R, L, C>
where
    W: WorkspaceManager,
    R: ToolRunner,
    L: ExecutionLogStore,
    C: Clock + Send + Sync,
{
    /// Creates a new orchestrator.
    #[must_use]
    pub const fn new(
        workspace: Arc<W>,
        runner: Arc<R>,
        logs: Arc<L>,
        clock: Arc<C>,
        settings: ToolSettings,
    ) -> Self {
        Self {
            workspace,
            runner,
            logs,
            clock,
            settings,
        }
    }

    /// Executes the tool for a task and returns the finalised result.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError`] only for infrastructure failures:
    /// workspace preparation, process spawn or supervision, and artifact
    /// persistence. Timeout and non-zero exit are reported inside the
    /// returned result.
    pub async fn execute(&self, task: &TaskRecord) -> OrchestratorResult<ExecutionResult> {
        let work_dir = self.workspace.prepare(task).await?;
        let invocation = ToolInvocation::for_task(&self.settings.program, task, &work_dir);
        tracing::info!(
            task_id = %task.id(),
            command = invocation.command_line(),
            "starting tool execution"
        );

        let env = [(
            self.settings.credential_var.clone(),
            self.settings.credential.clone(),
        )];
        let started_at = self.clock.utc();
        let capture = self
            .runner
            .run(&invocation, &env, self.settings.timeout)
            .await?;
        let finished_at = self.clock.utc();

        let result = ExecutionResult::new(ExecutionResultParts {
            task_id: task.id().clone(),
            command: invocation.command_line(),
            work_dir: work_dir.to_string(),
            started_at,
            finished_at,
            outcome: capture.outcome,
            stdout: capture.stdout,
            stderr: capture.stderr,
        });

        self.logs.save_result(&result).await?;
        if result.success() {
            tracing::info!(
                task_id = %task.id(),
                duration_ms = result.duration_ms(),
                "tool execution succeeded"
            );
        } else {
            self.logs.save_error(task.id(), result.stderr()).await?;
            tracing::warn!(
                task_id = %task.id(),
                exit_code = ?result.exit_code(),
                timed_out = result.timed_out(),
                "tool execution failed"
            );
        }
        Ok(result)
    }
}
