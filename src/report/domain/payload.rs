//! Report payload fed to the templating engine.

use serde::Serialize;

/// Flat data map substituted into the report template.
///
/// Derived per notification by the report builder, which is its sole owner;
/// downstream consumers receive the rendered output, never the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPayload {
    /// Whether the execution attempt succeeded.
    pub success: bool,
    /// Identifier joining the report to its task and execution log.
    pub task_id: String,
    /// Free-text instruction the tool was given.
    pub description: String,
    /// Human-readable report generation time.
    pub formatted_time: String,
    /// Coarsest-unit elapsed time, or a placeholder when unknown.
    pub duration: String,
    /// Tool output, truncated at the report length cap.
    pub output: String,
    /// Error detail for failed attempts, empty on success.
    pub error: String,
    /// Constraint strings in authoring order.
    pub requirements: Vec<String>,
    /// Project path or repository locator the tool operated on.
    pub project_path: String,
    /// Tool invocation mode.
    pub task_type: String,
}

/// Rendered notification produced by the report builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    task_id: String,
    subject: String,
    html: String,
}

impl RenderedReport {
    /// Assembles a rendered report.
    #[must_use]
    pub fn new(
        task_id: impl Into<String>,
        subject: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            subject: subject.into(),
            html: html.into(),
        }
    }

    /// Returns the identifier of the task the report describes.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Returns the notification subject line.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the rendered HTML body.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }
}
