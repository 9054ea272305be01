//! Filesystem-backed workspace manager and execution log store.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tokio::process::Command;

use crate::execution::{
    domain::ExecutionResult,
    ports::{
        ExecutionLogStore, ExecutionLogStoreError, ExecutionLogStoreResult, WorkspaceError,
        WorkspaceManager, WorkspaceResult,
    },
};
use crate::intake::domain::{TaskId, TaskRecord};

/// Workspace manager allocating one directory per task beneath a root.
///
/// Remote projects are cloned into the fresh workspace; local ones get a
/// minimal placeholder project (a README, a manifest, an entry file) so the
/// tool always has a valid directory to operate in. An already populated
/// workspace is reused untouched.
#[derive(Debug, Clone)]
pub struct FsWorkspace {
    root: Utf8PathBuf,
}

impl FsWorkspace {
    /// Creates a workspace manager rooted at the given directory.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl WorkspaceManager for FsWorkspace {
    async fn prepare(&self, task: &TaskRecord) -> WorkspaceResult<Utf8PathBuf> {
        let path = self.root.join(task.id().as_str());
        std::fs::create_dir_all(path.as_std_path()).map_err(WorkspaceError::allocation)?;
        let dir = Dir::open_ambient_dir(&path, ambient_authority())
            .map_err(WorkspaceError::allocation)?;

        let occupied = dir
            .entries()
            .map_err(WorkspaceError::allocation)?
            .next()
            .is_some();
        if occupied {
            tracing::debug!(task_id = %task.id(), %path, "reusing existing workspace");
            return Ok(path);
        }

        if task.project_path().is_remote() {
            clone_repository(task.project_path().as_str(), &path).await?;
        } else {
            scaffold_placeholder(&dir).map_err(WorkspaceError::allocation)?;
        }
        Ok(path)
    }
}

async fn clone_repository(locator: &str, path: &Utf8Path) -> WorkspaceResult<()> {
    tracing::info!(%locator, "cloning repository into workspace");
    let output = Command::new("git")
        .args(["clone", locator, "."])
        .current_dir(path)
        .output()
        .await
        .map_err(|err| WorkspaceError::Clone {
            locator: locator.to_owned(),
            reason: err.to_string(),
        })?;

    if output.status.success() {
        Ok(())
    } else {
        Err(WorkspaceError::Clone {
            locator: locator.to_owned(),
            reason: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

fn scaffold_placeholder(dir: &Dir) -> std::io::Result<()> {
    dir.write(
        "README.md",
        b"# Task Workspace\n\nPlaceholder project created for automated task execution.\n",
    )?;
    dir.write(
        "Cargo.toml",
        b"[package]\nname = \"task-workspace\"\nversion = \"0.1.0\"\nedition = \"2021\"\n",
    )?;
    dir.create_dir_all("src")?;
    dir.write(
        "src/main.rs",
        b"fn main() {\n    println!(\"placeholder task workspace\");\n}\n",
    )?;
    Ok(())
}

/// Execution log store writing per-task artifacts under `logs/`.
///
/// The structured result lands in `<task-id>.json`; on non-success the raw
/// standard error is additionally written to `<task-id>_error.log`.
#[derive(Debug)]
pub struct FsExecutionLogStore {
    dir: Dir,
}

impl FsExecutionLogStore {
    /// Opens the store, creating the `logs/` directory beneath the root.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionLogStoreError::Persistence`] when the directory
    /// cannot be created or opened.
    pub fn open(root: &Utf8Path) -> ExecutionLogStoreResult<Self> {
        let logs_root = root.join("logs");
        std::fs::create_dir_all(logs_root.as_std_path())
            .map_err(ExecutionLogStoreError::persistence)?;
        let dir = Dir::open_ambient_dir(&logs_root, ambient_authority())
            .map_err(ExecutionLogStoreError::persistence)?;
        Ok(Self { dir })
    }
}

#[async_trait]
impl ExecutionLogStore for FsExecutionLogStore {
    async fn save_result(&self, result: &ExecutionResult) -> ExecutionLogStoreResult<()> {
        let encoded =
            serde_json::to_string_pretty(result).map_err(ExecutionLogStoreError::persistence)?;
        self.dir
            .write(format!("{}.json", result.task_id()), encoded.as_bytes())
            .map_err(ExecutionLogStoreError::persistence)?;
        Ok(())
    }

    async fn save_error(&self, task_id: &TaskId, stderr: &str) -> ExecutionLogStoreResult<()> {
        self.dir
            .write(format!("{task_id}_error.log"), stderr.as_bytes())
            .map_err(ExecutionLogStoreError::persistence)?;
        Ok(())
    }
}
