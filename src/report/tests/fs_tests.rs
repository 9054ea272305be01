//! Filesystem adapter tests for the template source and report store.

use crate::report::{
    adapters::fs::{FsReportStore, FsTemplateSource},
    ports::{ReportStore, TemplateKind, TemplateSource},
};
use camino::Utf8Path;
use rstest::rstest;

fn utf8_root(dir: &tempfile::TempDir) -> &Utf8Path {
    Utf8Path::from_path(dir.path()).expect("temp dir path should be UTF-8")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn absent_templates_directory_yields_no_template() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let source = FsTemplateSource::open(utf8_root(&dir));

    let loaded = source
        .load(TemplateKind::Success)
        .await
        .expect("load should succeed");
    assert!(loaded.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn template_created_after_open_is_picked_up() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let root = utf8_root(&dir);
    let source = FsTemplateSource::open(root);

    assert!(
        source
            .load(TemplateKind::Failure)
            .await
            .expect("load should succeed")
            .is_none()
    );

    let templates_root = root.join("templates");
    std::fs::create_dir_all(templates_root.as_std_path())
        .expect("templates directory should be created");
    std::fs::write(
        templates_root.join("error_report.html").as_std_path(),
        "<p>{{ error }}</p>",
    )
    .expect("template file should be written");

    let loaded = source
        .load(TemplateKind::Failure)
        .await
        .expect("load should succeed");
    assert_eq!(loaded.as_deref(), Some("<p>{{ error }}</p>"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn report_store_writes_one_artifact_per_task() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let root = utf8_root(&dir);
    let store = FsReportStore::open(root).expect("store should open");

    store
        .save("task-abc", "<html>done</html>")
        .await
        .expect("save should succeed");

    let written = std::fs::read_to_string(
        root.join("reports")
            .join("task-abc_report.html")
            .as_std_path(),
    )
    .expect("report artifact should exist");
    assert_eq!(written, "<html>done</html>");
}
