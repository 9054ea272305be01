//! Tokio-based subprocess runner for the external tool.
//!
//! Spawns the tool rooted at the task workspace, streams stdout and stderr
//! into two independent append-only buffers while surfacing each chunk for
//! live logging, and resolves the race between natural exit and the
//! wall-clock deadline through the domain's one-shot latch.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use crate::execution::{
    domain::{ExecutionLatch, ExecutionOutcome, ToolInvocation},
    ports::{ProcessCapture, ToolRunner, ToolRunnerError, ToolRunnerResult},
};

/// Maximum bytes captured per output stream (10 MiB).
///
/// Output beyond this limit is discarded to bound memory against extremely
/// verbose tool runs; the truncation for reporting happens later and is much
/// tighter.
const MAX_CAPTURE_BYTES: u64 = 10 * 1024 * 1024;

const CHUNK_BYTES: usize = 8 * 1024;

/// Tool runner backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioToolRunner;

impl TokioToolRunner {
    /// Creates a runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ToolRunner for TokioToolRunner {
    async fn run(
        &self,
        invocation: &ToolInvocation,
        env: &[(String, String)],
        timeout: Duration,
    ) -> ToolRunnerResult<ProcessCapture> {
        let mut command = Command::new(invocation.program());
        command
            .args(invocation.args())
            .current_dir(invocation.work_dir())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        for (key, value) in env {
            command.env(key, value);
        }

        let mut child = command.spawn().map_err(ToolRunnerError::spawn)?;

        let stdout_sink = tokio::spawn(drain_stream(child.stdout.take(), StreamKind::Stdout));
        let stderr_sink = tokio::spawn(drain_stream(child.stderr.take(), StreamKind::Stderr));

        let mut latch = ExecutionLatch::new();
        tokio::select! {
            status = child.wait() => {
                let exit_status = status.map_err(ToolRunnerError::supervision)?;
                let exit_code = exit_status.code().unwrap_or(-1);
                latch.settle(ExecutionOutcome::Completed { exit_code });
            }
            () = tokio::time::sleep(timeout) => {
                // Deadline wins even if the process exits moments later.
                if let Err(err) = child.start_kill() {
                    tracing::warn!(error = %err, "failed to signal timed-out tool process");
                }
                if let Err(err) = child.wait().await {
                    tracing::warn!(error = %err, "failed to reap timed-out tool process");
                }
                latch.settle(ExecutionOutcome::TimedOut);
            }
        }

        let stdout = stdout_sink.await.unwrap_or_default();
        let stderr = stderr_sink.await.unwrap_or_default();
        let outcome = latch.outcome().ok_or_else(|| {
            ToolRunnerError::supervision(std::io::Error::other(
                "tool process finished without a terminal outcome",
            ))
        })?;

        Ok(ProcessCapture {
            outcome,
            stdout,
            stderr,
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

/// Accumulates one output stream chunk-by-chunk, surfacing each chunk for
/// live logging as it arrives.
///
/// Raw bytes are accumulated and decoded once at the end, so a multi-byte
/// character split across a read boundary survives intact; the per-chunk
/// lossy decode feeds only the live log surface.
async fn drain_stream<R>(handle: Option<R>, kind: StreamKind) -> String
where
    R: AsyncRead + Unpin + Send,
{
    let mut accumulated = Vec::new();
    let Some(handle) = handle else {
        return String::new();
    };

    let mut reader = handle.take(MAX_CAPTURE_BYTES);
    let mut chunk = [0_u8; CHUNK_BYTES];
    loop {
        match reader.read(&mut chunk).await {
            Ok(0) => break,
            Ok(read) => {
                let bytes = chunk.get(..read).unwrap_or_default();
                let text = String::from_utf8_lossy(bytes);
                tracing::info!(stream = kind.as_str(), "{}", text.trim_end_matches('\n'));
                accumulated.extend_from_slice(bytes);
            }
            Err(err) => {
                tracing::warn!(
                    stream = kind.as_str(),
                    error = %err,
                    "tool output stream ended mid-read, capture may be truncated"
                );
                break;
            }
        }
    }
    String::from_utf8_lossy(&accumulated).into_owned()
}
