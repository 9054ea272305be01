//! Report derivation and template rendering.

use crate::execution::domain::ExecutionResult;
use crate::intake::domain::TaskRecord;
use crate::report::{
    domain::{
        RenderedReport, ReportPayload, UNKNOWN_PLACEHOLDER, build_subject, format_duration,
        format_timestamp, truncate_output,
    },
    ports::{
        ReportStore, ReportStoreError, TemplateKind, TemplateSource, TemplateSourceError,
    },
};
use minijinja::Environment;
use mockable::Clock;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// Error detail recorded when the tool hit the wall-clock deadline.
const TIMEOUT_ERROR: &str = "execution timed out at the wall-clock deadline";

/// Built-in success template used when the external one is unavailable.
const FALLBACK_SUCCESS_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{{ subject }}</title></head>
<body>
  <h1>✅ 任务执行成功</h1>
  <p><strong>任务编号:</strong> {{ task_id }}</p>
  <p><strong>任务描述:</strong> {{ description }}</p>
  <p><strong>项目路径:</strong> {{ project_path }}</p>
  <p><strong>任务类型:</strong> {{ task_type }}</p>
  <p><strong>完成时间:</strong> {{ formatted_time }}</p>
  <p><strong>执行耗时:</strong> {{ duration }}</p>
  {% if requirements %}
  <h2>具体要求</h2>
  <ul>
  {% for requirement in requirements %}
    <li>{{ requirement }}</li>
  {% endfor %}
  </ul>
  {% endif %}
  <h2>执行输出</h2>
  <pre>{{ output }}</pre>
</body>
</html>
"#;

/// Built-in failure template used when the external one is unavailable.
const FALLBACK_FAILURE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{{ subject }}</title></head>
<body>
  <h1>❌ 任务执行失败</h1>
  <p><strong>任务编号:</strong> {{ task_id }}</p>
  <p><strong>任务描述:</strong> {{ description }}</p>
  <p><strong>项目路径:</strong> {{ project_path }}</p>
  <p><strong>任务类型:</strong> {{ task_type }}</p>
  <p><strong>失败时间:</strong> {{ formatted_time }}</p>
  <p><strong>执行耗时:</strong> {{ duration }}</p>
  <h2>错误详情</h2>
  <pre>{{ error }}</pre>
  {% if output %}
  <h2>部分输出</h2>
  <pre>{{ output }}</pre>
  {% endif %}
</body>
</html>
"#;

/// Source material for one report.
///
/// A failure string stands in when no execution result exists at all, e.g.
/// an infrastructure failure before the tool could be started.
#[derive(Debug, Clone)]
pub enum ReportSource {
    /// A finalised execution result, successful or not.
    Execution(ExecutionResult),
    /// A bare failure description with no execution result behind it.
    Failure(String),
}

/// Service-level errors for the report stage.
///
/// All variants are fatal; a report that cannot be rendered or persisted is
/// a pipeline-level failure.
#[derive(Debug, Error)]
pub enum ReportBuilderError {
    /// The external template could not be read.
    #[error(transparent)]
    Templates(#[from] TemplateSourceError),
    /// The payload could not be encoded for template substitution.
    #[error("report payload encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
    /// Template substitution failed.
    #[error("report rendering failed: {0}")]
    Render(#[from] minijinja::Error),
    /// The rendered artifact could not be persisted.
    #[error(transparent)]
    Store(#[from] ReportStoreError),
}

/// Result type for report builder operations.
pub type ReportBuilderResult<T> = Result<T, ReportBuilderError>;

/// Report builder stage.
///
/// Derives the flat payload from an execution result (or a bare failure),
/// degrading gracefully to placeholders when the originating task record is
/// absent, renders it through one of two templates selected by outcome, and
/// persists the artifact before handing the rendered report onward.
#[derive(Clone)]
pub struct ReportBuilderService<T, S, C>
where
    T: TemplateSource,
    S: ReportStore,
    C: Clock + Send + Sync,
{
    templates: Arc<T>,
    store: Arc<S>,
    clock: Arc<C>,
}

impl<T, S, C> ReportBuilderService<T, S, C>
where
    T: TemplateSource,
    S: ReportStore,
    C: Clock + Send + Sync,
{
    /// Creates a new report builder.
    #[must_use]
    pub const fn new(templates: Arc<T>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            templates,
            store,
            clock,
        }
    }

    /// Builds, renders, and persists the report for one attempt.
    ///
    /// # Errors
    ///
    /// Returns [`ReportBuilderError`] when rendering fails or the artifact
    /// cannot be persisted. A missing external template is not an error;
    /// the built-in fallback is substituted.
    pub async fn build(
        &self,
        task: Option<&TaskRecord>,
        source: &ReportSource,
    ) -> ReportBuilderResult<RenderedReport> {
        let payload = self.derive_payload(task, source);
        let subject = build_subject(payload.success, &payload.description);

        let kind = if payload.success {
            TemplateKind::Success
        } else {
            TemplateKind::Failure
        };
        let template = match self.templates.load(kind).await? {
            Some(template) => template,
            None => {
                tracing::warn!(?kind, "external template unavailable, using built-in fallback");
                fallback_template(kind).to_owned()
            }
        };

        let context = build_template_context(&payload, &subject)?;
        let html = Environment::new().render_str(&template, context)?;

        self.store.save(&payload.task_id, &html).await?;
        tracing::info!(
            task_id = payload.task_id,
            success = payload.success,
            "report rendered and persisted"
        );
        Ok(RenderedReport::new(payload.task_id, subject, html))
    }

    fn derive_payload(&self, task: Option<&TaskRecord>, source: &ReportSource) -> ReportPayload {
        let now = self.clock.utc();
        let duration = task.map_or_else(
            || UNKNOWN_PLACEHOLDER.to_owned(),
            |record| {
                let elapsed_ms = now
                    .signed_duration_since(record.created_at())
                    .num_milliseconds()
                    .try_into()
                    .unwrap_or(0);
                format_duration(elapsed_ms)
            },
        );

        let (success, task_id, output, error) = match source {
            ReportSource::Execution(result) => (
                result.success(),
                result.task_id().as_str().to_owned(),
                truncate_output(result.stdout()),
                truncate_output(&execution_error(result)),
            ),
            ReportSource::Failure(detail) => (
                false,
                task.map_or(UNKNOWN_PLACEHOLDER, |record| record.id().as_str())
                    .to_owned(),
                String::new(),
                truncate_output(detail),
            ),
        };

        ReportPayload {
            success,
            task_id,
            description: task
                .map_or(UNKNOWN_PLACEHOLDER, TaskRecord::description)
                .to_owned(),
            formatted_time: format_timestamp(now),
            duration,
            output,
            error,
            requirements: task
                .map(|record| record.requirements().to_vec())
                .unwrap_or_default(),
            project_path: task
                .map_or(UNKNOWN_PLACEHOLDER, |record| record.project_path().as_str())
                .to_owned(),
            task_type: task
                .map_or(UNKNOWN_PLACEHOLDER, |record| record.task_type().as_str())
                .to_owned(),
        }
    }
}

fn execution_error(result: &ExecutionResult) -> String {
    if result.success() {
        String::new()
    } else if result.timed_out() {
        if result.stderr().is_empty() {
            TIMEOUT_ERROR.to_owned()
        } else {
            format!("{TIMEOUT_ERROR}\n{}", result.stderr())
        }
    } else {
        result.stderr().to_owned()
    }
}

const fn fallback_template(kind: TemplateKind) -> &'static str {
    match kind {
        TemplateKind::Success => FALLBACK_SUCCESS_TEMPLATE,
        TemplateKind::Failure => FALLBACK_FAILURE_TEMPLATE,
    }
}

fn build_template_context(
    payload: &ReportPayload,
    subject: &str,
) -> ReportBuilderResult<Map<String, Value>> {
    let mut context = match serde_json::to_value(payload)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    context.insert("subject".to_owned(), Value::String(subject.to_owned()));
    Ok(context)
}
