//! Resolved tool invocation for a task.

use crate::intake::domain::{TaskRecord, TaskType};
use camino::{Utf8Path, Utf8PathBuf};

/// Command-line invocation of the external code-modification tool.
///
/// Resolved deterministically from the task: each task type maps to one
/// fixed mode flag, the workspace becomes the project directory, and
/// machine-readable output is always requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    program: String,
    args: Vec<String>,
    work_dir: Utf8PathBuf,
}

impl ToolInvocation {
    /// Creates an invocation from raw parts.
    #[must_use]
    pub fn new(
        program: impl Into<String>,
        args: impl IntoIterator<Item = String>,
        work_dir: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().collect(),
            work_dir: work_dir.into(),
        }
    }

    /// Resolves the invocation for a task rooted at the given workspace.
    #[must_use]
    pub fn for_task(program: &str, task: &TaskRecord, work_dir: &Utf8Path) -> Self {
        let mode = mode_flag(task.task_type());
        let args = vec![
            "--mode".to_owned(),
            mode.to_owned(),
            "--project-dir".to_owned(),
            work_dir.to_string(),
            "--task".to_owned(),
            task.description().to_owned(),
            "--output".to_owned(),
            "json".to_owned(),
        ];
        Self::new(program, args, work_dir)
    }

    /// Returns the program name.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the argument list.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the working directory the process is rooted at.
    #[must_use]
    pub fn work_dir(&self) -> &Utf8Path {
        &self.work_dir
    }

    /// Renders the invocation as a shell-quoted command string for logging.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut rendered = shell_escape(&self.program);
        for arg in &self.args {
            rendered.push(' ');
            rendered.push_str(&shell_escape(arg));
        }
        rendered
    }
}

/// Maps a task type to its fixed tool mode flag.
#[must_use]
pub const fn mode_flag(task_type: TaskType) -> &'static str {
    match task_type {
        TaskType::Code => "code",
        TaskType::Debug => "debug",
        TaskType::Test => "test",
        TaskType::Deploy => "deploy",
    }
}

/// Escapes a value for safe inclusion in a POSIX shell command.
///
/// Uses single-quote wrapping and the standard `'\''` sequence for embedded
/// quotes. Values made solely of shell-safe characters pass through bare.
#[must_use]
pub fn shell_escape(value: &str) -> String {
    let safe = !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '/' | ':' | '='));
    if safe {
        return value.to_owned();
    }

    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            escaped.push_str("'\\''");
        } else {
            escaped.push(ch);
        }
    }
    escaped.push('\'');
    escaped
}
