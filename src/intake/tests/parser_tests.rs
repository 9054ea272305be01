//! Tests for the line-oriented task body grammar.

use crate::intake::domain::{
    InboundMessage, TaskId, TaskParseError, TaskType, parse_task_message,
};
use chrono::Utc;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn message(subject: &str, body: &str) -> InboundMessage {
    InboundMessage::new(
        "<id-1@example.com>",
        subject,
        "alice@example.com",
        body,
        Utc::now(),
    )
}

fn task_id() -> TaskId {
    TaskId::from_value("task-under-test")
}

#[rstest]
fn description_comes_from_subject_with_marker_stripped(clock: DefaultClock) {
    let parsed = parse_task_message(
        &message("TASK: Fix the flaky login test", ""),
        task_id(),
        &clock,
    )
    .expect("subject with marker should parse");

    assert_eq!(parsed.description(), "Fix the flaky login test");
    assert_eq!(parsed.user_email(), "alice@example.com");
    assert_eq!(parsed.task_type(), TaskType::Code);
    assert_eq!(parsed.project_path().as_str(), ".");
    assert!(parsed.requirements().is_empty());
}

#[rstest]
fn subject_without_marker_is_rejected(clock: DefaultClock) {
    let result = parse_task_message(&message("Weekly newsletter", ""), task_id(), &clock);
    assert_eq!(
        result,
        Err(TaskParseError::MissingMarker("Weekly newsletter".to_owned()))
    );
}

#[rstest]
fn subject_with_only_marker_is_rejected(clock: DefaultClock) {
    let result = parse_task_message(&message("TASK:   ", ""), task_id(), &clock);
    assert_eq!(result, Err(TaskParseError::EmptyDescription));
}

#[rstest]
fn requirements_preserve_authoring_order(clock: DefaultClock) {
    let body = "Requirements:\n- a\n- b\n- c\n";
    let parsed = parse_task_message(&message("TASK: ordered", body), task_id(), &clock)
        .expect("requirements block should parse");

    assert_eq!(parsed.requirements(), ["a", "b", "c"]);
}

#[rstest]
fn bullets_before_requirements_label_are_ignored(clock: DefaultClock) {
    let body = "- stray bullet\nRequirements:\n- kept\n";
    let parsed = parse_task_message(&message("TASK: bullets", body), task_id(), &clock)
        .expect("body should parse");

    assert_eq!(parsed.requirements(), ["kept"]);
}

#[rstest]
#[case("Project Path:")]
#[case("项目路径:")]
fn project_path_label_is_localised(clock: DefaultClock, #[case] label: &str) {
    let body = format!("{label} https://github.com/acme/widget.git\n");
    let parsed = parse_task_message(&message("TASK: clone", &body), task_id(), &clock)
        .expect("body should parse");

    assert_eq!(
        parsed.project_path().as_str(),
        "https://github.com/acme/widget.git"
    );
    assert!(parsed.project_path().is_remote());
}

#[rstest]
#[case("Task Type: test", TaskType::Test)]
#[case("Task Type: DEPLOY", TaskType::Deploy)]
#[case("任务类型: debug", TaskType::Debug)]
fn task_type_label_accepts_known_values(
    clock: DefaultClock,
    #[case] line: &str,
    #[case] expected: TaskType,
) {
    let parsed = parse_task_message(&message("TASK: typed", line), task_id(), &clock)
        .expect("body should parse");
    assert_eq!(parsed.task_type(), expected);
}

#[rstest]
fn unrecognised_task_type_keeps_the_default(clock: DefaultClock) {
    let parsed = parse_task_message(
        &message("TASK: guarded", "Task Type: refactor-everything\n"),
        task_id(),
        &clock,
    )
    .expect("body should parse");

    assert_eq!(parsed.task_type(), TaskType::Code);
}

#[rstest]
fn full_body_parses_every_field(clock: DefaultClock) {
    let body = "\
Project Path: /srv/projects/widget

Task Type: test

Requirements:
- run the unit suite
- report coverage
";
    let parsed = parse_task_message(&message("TASK: run unit tests", body), task_id(), &clock)
        .expect("body should parse");

    assert_eq!(parsed.description(), "run unit tests");
    assert_eq!(parsed.project_path().as_str(), "/srv/projects/widget");
    assert!(!parsed.project_path().is_remote());
    assert_eq!(parsed.task_type(), TaskType::Test);
    assert_eq!(
        parsed.requirements(),
        ["run the unit suite", "report coverage"]
    );
}
