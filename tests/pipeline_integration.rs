//! End-to-end pipeline tests: intake through delivery.
//!
//! These tests drive the full stage chain with a real subprocess standing in
//! for the external tool and durable state on a temporary filesystem root,
//! verifying the contract each stage hands the next.

#![cfg(unix)]
#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::os::unix::fs::PermissionsExt;
use std::sync::Arc;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use courier::execution::{
    adapters::{
        fs::{FsExecutionLogStore, FsWorkspace},
        process::TokioToolRunner,
    },
    services::{OrchestratorService, ToolSettings},
};
use courier::intake::{
    adapters::memory::{InMemoryMailbox, InMemorySeenSetStore, InMemoryTaskRecordStore},
    domain::{InboundMessage, TaskRecord, TaskType},
    services::IntakeService,
};
use courier::notify::{
    adapters::{
        fs::FsAttachmentSource,
        memory::{InMemoryDeliveryAuditLog, InMemoryMailer},
    },
    services::NotifierService,
};
use courier::report::{
    adapters::{fs::FsReportStore, memory::InMemoryTemplateSource},
    services::{ReportBuilderService, ReportSource},
};
use mockable::DefaultClock;

fn state_root(dir: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8Path::from_path(dir.path())
        .expect("temp path should be UTF-8")
        .to_owned()
}

/// Writes an executable shell script standing in for the external tool.
fn write_tool_script(root: &Utf8Path, body: &str) -> Utf8PathBuf {
    let path = root.join("tool.sh");
    std::fs::write(path.as_std_path(), format!("#!/bin/sh\n{body}\n"))
        .expect("tool script should be written");
    let mut permissions = std::fs::metadata(path.as_std_path())
        .expect("tool script metadata should be readable")
        .permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(path.as_std_path(), permissions)
        .expect("tool script should be executable");
    path
}

async fn intake_one_task(body: &str) -> TaskRecord {
    let mailbox = Arc::new(InMemoryMailbox::new());
    mailbox.deliver(InboundMessage::new(
        "<e2e@example.com>",
        "TASK: run unit tests",
        "carol@example.com",
        body,
        Utc::now(),
    ));
    let service = IntakeService::new(
        mailbox,
        Arc::new(InMemorySeenSetStore::new()),
        Arc::new(InMemoryTaskRecordStore::new()),
        Arc::new(DefaultClock),
    );
    let mut tasks = service.poll().await.expect("intake should succeed");
    tasks.pop().expect("one task expected")
}

#[tokio::test(flavor = "multi_thread")]
async fn successful_run_flows_from_mail_to_delivered_report() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let root = state_root(&dir);
    let tool = write_tool_script(&root, "printf '12 passed'");

    let task = intake_one_task("项目路径: .\n任务类型: test\n").await;
    assert_eq!(task.description(), "run unit tests");
    assert_eq!(task.task_type(), TaskType::Test);

    let orchestrator = OrchestratorService::new(
        Arc::new(FsWorkspace::new(root.join("workspace"))),
        Arc::new(TokioToolRunner::new()),
        Arc::new(FsExecutionLogStore::open(&root).expect("log store should open")),
        Arc::new(DefaultClock),
        ToolSettings::new(tool.as_str(), "TOOL_API_KEY", "integration-secret")
            .with_timeout(Duration::from_secs(60)),
    );
    let result = orchestrator
        .execute(&task)
        .await
        .expect("execution should succeed");
    assert!(result.success());
    assert_eq!(result.stdout(), "12 passed");
    assert!(root.join("logs").join(format!("{}.json", task.id())).exists());

    let builder = ReportBuilderService::new(
        Arc::new(InMemoryTemplateSource::new()),
        Arc::new(FsReportStore::open(&root).expect("report store should open")),
        Arc::new(DefaultClock),
    );
    let report = builder
        .build(Some(&task), &ReportSource::Execution(result))
        .await
        .expect("report build should succeed");
    assert!(report.subject().starts_with("✅"));
    assert!(report.html().contains("12 passed"));
    assert!(root
        .join("reports")
        .join(format!("{}_report.html", task.id()))
        .exists());

    let mailer = Arc::new(InMemoryMailer::new());
    let audit = Arc::new(InMemoryDeliveryAuditLog::new());
    let notifier = NotifierService::new(
        Arc::clone(&mailer),
        Arc::new(FsAttachmentSource::new(root.clone())),
        Arc::clone(&audit),
        Arc::new(DefaultClock),
    );
    let receipt = notifier
        .deliver(&report, "carol@example.com")
        .await
        .expect("delivery should succeed");

    let sent = mailer.sent();
    let mail = sent.first().expect("one mail expected");
    assert!(mail.subject().starts_with("✅"));
    // One execution log plus the rendered report.
    assert_eq!(mail.attachments().len(), 2);
    let entries = audit.sent_entries();
    let entry = entries.first().expect("one audit entry expected");
    assert_eq!(entry.message_id(), receipt.message_id());
}

#[tokio::test(flavor = "multi_thread")]
async fn failing_run_delivers_a_failure_report_with_error_artifact() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let root = state_root(&dir);
    let tool = write_tool_script(&root, "printf 'boom: missing dependency' >&2; exit 2");

    let task = intake_one_task("具体要求:\n- keep the build green\n").await;

    let orchestrator = OrchestratorService::new(
        Arc::new(FsWorkspace::new(root.join("workspace"))),
        Arc::new(TokioToolRunner::new()),
        Arc::new(FsExecutionLogStore::open(&root).expect("log store should open")),
        Arc::new(DefaultClock),
        ToolSettings::new(tool.as_str(), "TOOL_API_KEY", "integration-secret")
            .with_timeout(Duration::from_secs(60)),
    );
    let result = orchestrator
        .execute(&task)
        .await
        .expect("infrastructure should not fail");
    assert_eq!(result.exit_code(), Some(2));
    let error_artifact = root.join("logs").join(format!("{}_error.log", task.id()));
    let stderr = std::fs::read_to_string(error_artifact.as_std_path())
        .expect("error artifact should exist");
    assert_eq!(stderr, "boom: missing dependency");

    let builder = ReportBuilderService::new(
        Arc::new(InMemoryTemplateSource::new()),
        Arc::new(FsReportStore::open(&root).expect("report store should open")),
        Arc::new(DefaultClock),
    );
    let report = builder
        .build(Some(&task), &ReportSource::Execution(result))
        .await
        .expect("report build should succeed");
    assert!(report.subject().starts_with("❌"));
    assert!(report.html().contains("boom: missing dependency"));
    assert!(report.html().contains("keep the build green"));
}
