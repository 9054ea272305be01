//! Task record aggregate and related value types.

use super::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tool invocation mode for a task.
///
/// Determines the mode flag passed to the external tool. Unrecognised values
/// in inbound messages are ignored and the default retained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// General code modification (default).
    #[default]
    Code,
    /// Defect diagnosis and repair.
    Debug,
    /// Test authoring or execution.
    Test,
    /// Deployment preparation.
    Deploy,
}

impl TaskType {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Debug => "debug",
            Self::Test => "test",
            Self::Deploy => "deploy",
        }
    }

    /// Parses a task type, returning `None` for unrecognised values.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "code" => Some(Self::Code),
            "debug" => Some(Self::Debug),
            "test" => Some(Self::Test),
            "deploy" => Some(Self::Deploy),
            _ => None,
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location of the project a task operates on.
///
/// Either a local filesystem path or a remote repository locator. Remote
/// locators are recognised by their URI scheme and are cloned into the task
/// workspace; anything else is treated as a local path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectPath(String);

impl ProjectPath {
    /// Wraps a project path or repository locator.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the current-directory placeholder path.
    #[must_use]
    pub fn current_dir() -> Self {
        Self(".".to_owned())
    }

    /// Returns the raw path or locator string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the value names a remote repository.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        const REMOTE_SCHEMES: [&str; 4] = ["https://", "http://", "git@", "ssh://"];
        REMOTE_SCHEMES
            .iter()
            .any(|scheme| self.0.starts_with(scheme))
    }
}

impl Default for ProjectPath {
    fn default() -> Self {
        Self::current_dir()
    }
}

impl fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical, immutable description of one unit of work.
///
/// A task record is created once at intake and is a read-only input to every
/// later pipeline stage. The `with_*` builders consume the record and are
/// only used while assembling it from an inbound message or the
/// configuration surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    id: TaskId,
    description: String,
    project_path: ProjectPath,
    task_type: TaskType,
    user_email: String,
    requirements: Vec<String>,
    created_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Creates a new task record with default project path and task type.
    #[must_use]
    pub fn new(
        id: TaskId,
        description: impl Into<String>,
        user_email: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            project_path: ProjectPath::current_dir(),
            task_type: TaskType::default(),
            user_email: user_email.into(),
            requirements: Vec::new(),
            created_at: clock.utc(),
        }
    }

    /// Sets the project path.
    #[must_use]
    pub fn with_project_path(mut self, project_path: ProjectPath) -> Self {
        self.project_path = project_path;
        self
    }

    /// Sets the task type.
    #[must_use]
    pub const fn with_task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = task_type;
        self
    }

    /// Sets the ordered requirement constraints.
    #[must_use]
    pub fn with_requirements(mut self, requirements: impl IntoIterator<Item = String>) -> Self {
        self.requirements = requirements.into_iter().collect();
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the free-text instruction for the tool.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the project path or repository locator.
    #[must_use]
    pub const fn project_path(&self) -> &ProjectPath {
        &self.project_path
    }

    /// Returns the tool invocation mode.
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Returns the originating identity used for audit and reply routing.
    #[must_use]
    pub fn user_email(&self) -> &str {
        &self.user_email
    }

    /// Returns the constraint strings in authoring order.
    #[must_use]
    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
