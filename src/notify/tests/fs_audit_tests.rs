//! Filesystem audit log and attachment discovery tests.

use std::time::{Duration, SystemTime};

use crate::notify::{
    adapters::fs::{FAILED_AUDIT_FILE, FsAttachmentSource, FsDeliveryAuditLog, SENT_AUDIT_FILE},
    domain::{FailedAuditEntry, SentAuditEntry},
    ports::{AttachmentSource, DeliveryAuditLog},
};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use rstest::rstest;

fn state_root(dir: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8Path::from_path(dir.path())
        .expect("temp path should be UTF-8")
        .to_owned()
}

fn write_with_mtime(path: &Utf8Path, age: Duration) {
    std::fs::write(path.as_std_path(), b"{}").expect("artifact should be written");
    let file = std::fs::File::options()
        .write(true)
        .open(path.as_std_path())
        .expect("artifact should reopen");
    file.set_modified(SystemTime::now() - age)
        .expect("mtime should be set");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn audit_entries_append_as_one_json_line_each() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let root = state_root(&dir);
    let log = FsDeliveryAuditLog::open(&root).expect("log should open");

    let sent = SentAuditEntry::new(Utc::now(), "carol@example.com", "✅ 成功 done", "<id-1>");
    log.record_sent(&sent).await.expect("append should succeed");
    log.record_sent(&sent).await.expect("append should succeed");
    let failed = FailedAuditEntry::new(Utc::now(), "relay unreachable");
    log.record_failed(&failed).await.expect("append should succeed");

    let sent_raw = std::fs::read_to_string(root.join("logs").join(SENT_AUDIT_FILE).as_std_path())
        .expect("sent log should exist");
    assert_eq!(sent_raw.lines().count(), 2);
    let replayed: SentAuditEntry =
        serde_json::from_str(sent_raw.lines().next().expect("a line expected"))
            .expect("entry should decode");
    assert_eq!(replayed.message_id(), "<id-1>");

    let failed_raw =
        std::fs::read_to_string(root.join("logs").join(FAILED_AUDIT_FILE).as_std_path())
            .expect("failed log should exist");
    assert_eq!(failed_raw.lines().count(), 1);
    assert!(failed_raw.contains("relay unreachable"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recent_logs_returns_newest_json_artifacts_first() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let root = state_root(&dir);
    let logs_dir = root.join("logs");
    std::fs::create_dir_all(logs_dir.as_std_path()).expect("logs dir should be created");
    for (name, age_secs) in [
        ("task-a.json", 40),
        ("task-b.json", 30),
        ("task-c.json", 20),
        ("task-d.json", 10),
        ("task-d_error.log", 5),
        ("notify-sent.ndjson", 1),
    ] {
        write_with_mtime(&logs_dir.join(name), Duration::from_secs(age_secs));
    }

    let source = FsAttachmentSource::new(root);
    let logs = source.recent_logs(3).await.expect("scan should succeed");

    let names: Vec<&str> = logs.iter().map(|a| a.filename()).collect();
    assert_eq!(names, ["task-d.json", "task-c.json", "task-b.json"]);
    assert!(logs.iter().all(|a| a.content_type() == "application/json"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn latest_report_returns_the_single_newest_artifact() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let root = state_root(&dir);
    let reports_dir = root.join("reports");
    std::fs::create_dir_all(reports_dir.as_std_path()).expect("reports dir should be created");
    write_with_mtime(
        &reports_dir.join("task-a_report.html"),
        Duration::from_secs(60),
    );
    write_with_mtime(
        &reports_dir.join("task-b_report.html"),
        Duration::from_secs(10),
    );

    let source = FsAttachmentSource::new(root);
    let report = source
        .latest_report()
        .await
        .expect("scan should succeed")
        .expect("a report expected");

    assert_eq!(report.filename(), "task-b_report.html");
    assert_eq!(report.content_type(), "text/html");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_artifact_directories_yield_no_attachments() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let source = FsAttachmentSource::new(state_root(&dir));

    assert!(source
        .recent_logs(3)
        .await
        .expect("scan should succeed")
        .is_empty());
    assert!(source
        .latest_report()
        .await
        .expect("scan should succeed")
        .is_none());
}
