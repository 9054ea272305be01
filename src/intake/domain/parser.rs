//! Line-oriented grammar for turning an inbound message into a task record.
//!
//! The body is parsed line-at-a-time in a single stateful pass: blank lines
//! separate sections, labelled lines populate individual fields, and a
//! requirements label switches the parser into accumulation mode where
//! bullet lines are collected in authoring order. Field labels are accepted
//! in both of the localisations the task convention uses.

use super::{InboundMessage, ProjectPath, TaskId, TaskParseError, TaskRecord, TaskType};
use mockable::Clock;

/// Literal marker token that identifies a task message subject.
pub const TASK_MARKER: &str = "TASK:";

const PROJECT_PATH_LABELS: [&str; 2] = ["项目路径:", "Project Path:"];
const TASK_TYPE_LABELS: [&str; 2] = ["任务类型:", "Task Type:"];
const REQUIREMENTS_LABELS: [&str; 2] = ["具体要求:", "Requirements:"];

/// Parses an inbound message into an immutable task record.
///
/// The description is taken from the subject with the marker token removed;
/// the body populates project path, task type, and requirements. Unrecognised
/// task-type values are ignored and the default retained.
///
/// # Errors
///
/// Returns [`TaskParseError::MissingMarker`] when the subject does not
/// contain the task marker and [`TaskParseError::EmptyDescription`] when
/// nothing remains of the subject once the marker is stripped.
pub fn parse_task_message(
    message: &InboundMessage,
    id: TaskId,
    clock: &impl Clock,
) -> Result<TaskRecord, TaskParseError> {
    let subject = message.subject();
    if !subject.contains(TASK_MARKER) {
        return Err(TaskParseError::MissingMarker(subject.to_owned()));
    }

    let description = subject.replacen(TASK_MARKER, "", 1).trim().to_owned();
    if description.is_empty() {
        return Err(TaskParseError::EmptyDescription);
    }

    let mut record = TaskRecord::new(id, description, message.from(), clock);
    let mut requirements = Vec::new();
    let mut in_requirements = false;

    for line in message.body().lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }

        if let Some(value) = match_label(line, &PROJECT_PATH_LABELS) {
            if !value.is_empty() {
                record = record.with_project_path(ProjectPath::new(value));
            }
        } else if let Some(value) = match_label(line, &TASK_TYPE_LABELS) {
            if let Some(task_type) = TaskType::parse(value) {
                record = record.with_task_type(task_type);
            }
        } else if match_label(line, &REQUIREMENTS_LABELS).is_some() {
            in_requirements = true;
        } else if in_requirements {
            if let Some(item) = line.strip_prefix('-') {
                requirements.push(item.trim().to_owned());
            }
        }
    }

    Ok(record.with_requirements(requirements))
}

/// Returns the trimmed value following the first matching label prefix.
fn match_label<'line>(line: &'line str, labels: &[&str]) -> Option<&'line str> {
    labels
        .iter()
        .find_map(|label| line.strip_prefix(label))
        .map(str::trim)
}
