//! Invocation resolution and latch tests.

use crate::execution::domain::{ExecutionLatch, ExecutionOutcome, ToolInvocation, shell_escape};
use crate::intake::domain::{TaskId, TaskRecord, TaskType};
use camino::Utf8Path;
use mockable::DefaultClock;
use rstest::rstest;

fn sample_task(task_type: TaskType) -> TaskRecord {
    TaskRecord::new(
        TaskId::generate(),
        "tighten the parser",
        "carol@example.com",
        &DefaultClock,
    )
    .with_task_type(task_type)
}

#[rstest]
#[case(TaskType::Code, "code")]
#[case(TaskType::Debug, "debug")]
#[case(TaskType::Test, "test")]
#[case(TaskType::Deploy, "deploy")]
fn task_type_maps_to_fixed_mode_flag(#[case] task_type: TaskType, #[case] expected: &str) {
    let task = sample_task(task_type);
    let invocation = ToolInvocation::for_task("tool", &task, Utf8Path::new("/work/t1"));

    assert_eq!(
        invocation.args(),
        [
            "--mode",
            expected,
            "--project-dir",
            "/work/t1",
            "--task",
            "tighten the parser",
            "--output",
            "json",
        ]
    );
}

#[rstest]
fn default_task_type_resolves_to_code_mode() {
    let task = TaskRecord::new(
        TaskId::generate(),
        "anything",
        "carol@example.com",
        &DefaultClock,
    );
    let invocation = ToolInvocation::for_task("tool", &task, Utf8Path::new("/work/t2"));

    assert_eq!(invocation.args().get(1).map(String::as_str), Some("code"));
}

#[rstest]
fn command_line_quotes_arguments_with_spaces() {
    let task = sample_task(TaskType::Code);
    let invocation = ToolInvocation::for_task("tool", &task, Utf8Path::new("/work/t3"));

    assert_eq!(
        invocation.command_line(),
        "tool --mode code --project-dir /work/t3 --task 'tighten the parser' --output json"
    );
}

#[rstest]
#[case("plain", "plain")]
#[case("with space", "'with space'")]
#[case("it's", r"'it'\''s'")]
#[case("", "''")]
fn shell_escape_wraps_unsafe_values(#[case] value: &str, #[case] expected: &str) {
    assert_eq!(shell_escape(value), expected);
}

#[rstest]
fn latch_accepts_only_the_first_outcome() {
    let mut latch = ExecutionLatch::new();

    assert!(latch.settle(ExecutionOutcome::TimedOut));
    assert!(!latch.settle(ExecutionOutcome::Completed { exit_code: 0 }));
    assert_eq!(latch.outcome(), Some(ExecutionOutcome::TimedOut));
}
