//! In-memory execution adapters for tests.

use async_trait::async_trait;
use camino::Utf8PathBuf;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::execution::{
    domain::{ExecutionResult, ToolInvocation},
    ports::{
        ExecutionLogStore, ExecutionLogStoreError, ExecutionLogStoreResult, ProcessCapture,
        ToolRunner, ToolRunnerError, ToolRunnerResult, WorkspaceManager, WorkspaceResult,
    },
};
use crate::intake::domain::{TaskId, TaskRecord};

/// Scripted tool runner returning queued captures in order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedToolRunner {
    state: Arc<RwLock<ScriptedState>>,
}

#[derive(Debug, Default)]
struct ScriptedState {
    queued: Vec<ToolRunnerResult<ProcessCapture>>,
    invocations: Vec<RecordedInvocation>,
}

/// Invocation recorded by [`ScriptedToolRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedInvocation {
    /// The invocation passed to the runner.
    pub invocation: ToolInvocation,
    /// The environment pairs passed to the runner.
    pub env: Vec<(String, String)>,
    /// The timeout passed to the runner.
    pub timeout: Duration,
}

impl ScriptedToolRunner {
    /// Creates a runner with no queued outcomes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the next run's capture or error.
    ///
    /// # Panics
    ///
    /// Panics when the state lock is poisoned; the fake is test-only.
    pub fn enqueue(&self, outcome: ToolRunnerResult<ProcessCapture>) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        state.queued.push(outcome);
    }

    /// Returns the invocations observed so far.
    ///
    /// # Panics
    ///
    /// Panics when the state lock is poisoned; the fake is test-only.
    #[must_use]
    pub fn invocations(&self) -> Vec<RecordedInvocation> {
        let state = self
            .state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        state.invocations.clone()
    }
}

#[async_trait]
impl ToolRunner for ScriptedToolRunner {
    async fn run(
        &self,
        invocation: &ToolInvocation,
        env: &[(String, String)],
        timeout: Duration,
    ) -> ToolRunnerResult<ProcessCapture> {
        let mut state = self.state.write().map_err(|err| {
            ToolRunnerError::supervision(std::io::Error::other(err.to_string()))
        })?;
        state.invocations.push(RecordedInvocation {
            invocation: invocation.clone(),
            env: env.to_vec(),
            timeout,
        });
        if state.queued.is_empty() {
            return Err(ToolRunnerError::spawn(std::io::Error::other(
                "no scripted capture queued",
            )));
        }
        state.queued.remove(0)
    }
}

/// Workspace manager returning a fixed path without touching the filesystem.
#[derive(Debug, Clone)]
pub struct StaticWorkspace {
    path: Utf8PathBuf,
}

impl StaticWorkspace {
    /// Creates a manager that always prepares the given path.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl WorkspaceManager for StaticWorkspace {
    async fn prepare(&self, _task: &TaskRecord) -> WorkspaceResult<Utf8PathBuf> {
        Ok(self.path.clone())
    }
}

/// Thread-safe in-memory execution log store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExecutionLogStore {
    state: Arc<RwLock<LogState>>,
}

#[derive(Debug, Default)]
struct LogState {
    results: HashMap<TaskId, ExecutionResult>,
    errors: HashMap<TaskId, String>,
}

impl InMemoryExecutionLogStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the persisted result for a task, if any.
    ///
    /// # Panics
    ///
    /// Panics when the state lock is poisoned; the fake is test-only.
    #[must_use]
    pub fn saved_result(&self, task_id: &TaskId) -> Option<ExecutionResult> {
        let state = self
            .state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        state.results.get(task_id).cloned()
    }

    /// Returns the persisted error artifact for a task, if any.
    ///
    /// # Panics
    ///
    /// Panics when the state lock is poisoned; the fake is test-only.
    #[must_use]
    pub fn saved_error(&self, task_id: &TaskId) -> Option<String> {
        let state = self
            .state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        state.errors.get(task_id).cloned()
    }
}

#[async_trait]
impl ExecutionLogStore for InMemoryExecutionLogStore {
    async fn save_result(&self, result: &ExecutionResult) -> ExecutionLogStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ExecutionLogStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.results.insert(result.task_id().clone(), result.clone());
        Ok(())
    }

    async fn save_error(&self, task_id: &TaskId, stderr: &str) -> ExecutionLogStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ExecutionLogStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.errors.insert(task_id.clone(), stderr.to_owned());
        Ok(())
    }
}
