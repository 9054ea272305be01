//! Real-subprocess runner tests (Unix only: scripted via `sh`).

use std::time::Duration;

use crate::execution::{
    adapters::process::TokioToolRunner,
    domain::{ExecutionOutcome, ToolInvocation},
    ports::ToolRunner,
};
use rstest::rstest;

fn shell_invocation(script: &str, work_dir: &str) -> ToolInvocation {
    ToolInvocation::new("sh", ["-c".to_owned(), script.to_owned()], work_dir)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clean_exit_captures_both_streams() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let work_dir = dir.path().to_str().expect("temp path should be UTF-8");
    let invocation = shell_invocation("printf out; printf err >&2", work_dir);

    let capture = TokioToolRunner::new()
        .run(&invocation, &[], Duration::from_secs(10))
        .await
        .expect("run should succeed");

    assert_eq!(capture.outcome, ExecutionOutcome::Completed { exit_code: 0 });
    assert_eq!(capture.stdout, "out");
    assert_eq!(capture.stderr, "err");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn multi_byte_character_split_across_chunks_survives_capture() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let work_dir = dir.path().to_str().expect("temp path should be UTF-8");
    // 8191 ASCII bytes push the following three-byte character across the
    // 8 KiB read boundary.
    let invocation = shell_invocation(
        "head -c 8191 /dev/zero | tr '\\0' a; printf '中'",
        work_dir,
    );

    let capture = TokioToolRunner::new()
        .run(&invocation, &[], Duration::from_secs(10))
        .await
        .expect("run should succeed");

    assert_eq!(capture.stdout.len(), 8194);
    assert!(capture.stdout.ends_with('中'));
    assert!(!capture.stdout.contains('\u{FFFD}'));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_zero_exit_is_reported_as_data() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let work_dir = dir.path().to_str().expect("temp path should be UTF-8");
    let invocation = shell_invocation("exit 7", work_dir);

    let capture = TokioToolRunner::new()
        .run(&invocation, &[], Duration::from_secs(10))
        .await
        .expect("run should succeed");

    assert_eq!(capture.outcome, ExecutionOutcome::Completed { exit_code: 7 });
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn environment_pairs_reach_the_child() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let work_dir = dir.path().to_str().expect("temp path should be UTF-8");
    let invocation = shell_invocation("printf '%s' \"$TOOL_TOKEN\"", work_dir);
    let env = [("TOOL_TOKEN".to_owned(), "sekrit".to_owned())];

    let capture = TokioToolRunner::new()
        .run(&invocation, &env, Duration::from_secs(10))
        .await
        .expect("run should succeed");

    assert_eq!(capture.stdout, "sekrit");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deadline_terminates_the_process_and_keeps_partial_output() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let work_dir = dir.path().to_str().expect("temp path should be UTF-8");
    let invocation = shell_invocation("printf early; sleep 30", work_dir);

    let started = std::time::Instant::now();
    let capture = TokioToolRunner::new()
        .run(&invocation, &[], Duration::from_millis(300))
        .await
        .expect("run should succeed");

    assert_eq!(capture.outcome, ExecutionOutcome::TimedOut);
    assert_eq!(capture.stdout, "early");
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_program_is_a_spawn_error() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let work_dir = dir.path().to_str().expect("temp path should be UTF-8");
    let invocation = ToolInvocation::new("definitely-not-a-real-binary", Vec::new(), work_dir);

    let result = TokioToolRunner::new()
        .run(&invocation, &[], Duration::from_secs(10))
        .await;

    assert!(result.is_err());
}
