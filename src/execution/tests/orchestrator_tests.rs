//! Orchestrator tests over scripted fakes.

use std::sync::Arc;
use std::time::Duration;

use crate::execution::{
    adapters::memory::{InMemoryExecutionLogStore, ScriptedToolRunner, StaticWorkspace},
    domain::ExecutionOutcome,
    ports::{ProcessCapture, ToolRunnerError},
    services::{OrchestratorError, OrchestratorService, ToolSettings},
};
use crate::intake::domain::{TaskId, TaskRecord, TaskType};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService =
    OrchestratorService<StaticWorkspace, ScriptedToolRunner, InMemoryExecutionLogStore, DefaultClock>;

struct Harness {
    runner: Arc<ScriptedToolRunner>,
    logs: Arc<InMemoryExecutionLogStore>,
}

impl Harness {
    fn service(&self) -> TestService {
        OrchestratorService::new(
            Arc::new(StaticWorkspace::new("/work/fixed")),
            Arc::clone(&self.runner),
            Arc::clone(&self.logs),
            Arc::new(DefaultClock),
            ToolSettings::new("tool", "TOOL_TOKEN", "secret")
                .with_timeout(Duration::from_secs(90)),
        )
    }
}

#[fixture]
fn harness() -> Harness {
    Harness {
        runner: Arc::new(ScriptedToolRunner::new()),
        logs: Arc::new(InMemoryExecutionLogStore::new()),
    }
}

fn sample_task() -> TaskRecord {
    TaskRecord::new(
        TaskId::generate(),
        "split the config module",
        "carol@example.com",
        &DefaultClock,
    )
    .with_task_type(TaskType::Debug)
}

fn capture(outcome: ExecutionOutcome, stdout: &str, stderr: &str) -> ProcessCapture {
    ProcessCapture {
        outcome,
        stdout: stdout.to_owned(),
        stderr: stderr.to_owned(),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn successful_run_persists_result_without_error_artifact(harness: Harness) {
    let task = sample_task();
    harness.runner.enqueue(Ok(capture(
        ExecutionOutcome::Completed { exit_code: 0 },
        "done",
        "",
    )));

    let result = harness
        .service()
        .execute(&task)
        .await
        .expect("execution should succeed");

    assert!(result.success());
    assert_eq!(result.stdout(), "done");
    assert_eq!(result.work_dir(), "/work/fixed");
    assert_eq!(
        harness.logs.saved_result(task.id()).as_ref(),
        Some(&result)
    );
    assert!(harness.logs.saved_error(task.id()).is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn runner_receives_credential_env_and_timeout(harness: Harness) {
    let task = sample_task();
    harness.runner.enqueue(Ok(capture(
        ExecutionOutcome::Completed { exit_code: 0 },
        "",
        "",
    )));

    harness
        .service()
        .execute(&task)
        .await
        .expect("execution should succeed");

    let recorded = harness.runner.invocations();
    let run = recorded.first().expect("one invocation expected");
    assert_eq!(run.env, [("TOOL_TOKEN".to_owned(), "secret".to_owned())]);
    assert_eq!(run.timeout, Duration::from_secs(90));
    assert_eq!(
        run.invocation.args().get(1).map(String::as_str),
        Some("debug")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_zero_exit_is_data_and_persists_error_artifact(harness: Harness) {
    let task = sample_task();
    harness.runner.enqueue(Ok(capture(
        ExecutionOutcome::Completed { exit_code: 3 },
        "",
        "compilation failed",
    )));

    let result = harness
        .service()
        .execute(&task)
        .await
        .expect("infrastructure should not fail");

    assert!(!result.success());
    assert_eq!(result.exit_code(), Some(3));
    assert_eq!(
        harness.logs.saved_error(task.id()).as_deref(),
        Some("compilation failed")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn timed_out_run_is_data_not_an_error(harness: Harness) {
    let task = sample_task();
    harness
        .runner
        .enqueue(Ok(capture(ExecutionOutcome::TimedOut, "partial", "")));

    let result = harness
        .service()
        .execute(&task)
        .await
        .expect("infrastructure should not fail");

    assert!(result.timed_out());
    assert_eq!(result.exit_code(), None);
    assert_eq!(result.stdout(), "partial");
    assert!(harness.logs.saved_result(task.id()).is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn spawn_failure_raises_and_persists_nothing(harness: Harness) {
    let task = sample_task();
    harness
        .runner
        .enqueue(Err(ToolRunnerError::spawn(std::io::Error::other(
            "tool binary missing",
        ))));

    let result = harness.service().execute(&task).await;

    assert!(matches!(result, Err(OrchestratorError::Runner(_))));
    assert!(harness.logs.saved_result(task.id()).is_none());
    assert!(harness.logs.saved_error(task.id()).is_none());
}
