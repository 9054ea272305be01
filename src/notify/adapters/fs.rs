//! Filesystem-backed attachment discovery and audit logging.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::OpenOptions;
use cap_std::fs_utf8::Dir;
use cap_std::time::SystemTime;
use std::io::Write;

use crate::notify::{
    domain::{
        FailedAuditEntry, LOG_CONTENT_TYPE, MailAttachment, REPORT_CONTENT_TYPE, SentAuditEntry,
    },
    ports::{
        AttachmentSource, AttachmentSourceError, AttachmentSourceResult, DeliveryAuditLog,
        DeliveryAuditLogError, DeliveryAuditLogResult,
    },
};

/// File name of the append-only success audit log within `logs/`.
pub const SENT_AUDIT_FILE: &str = "notify-sent.ndjson";

/// File name of the append-only failure audit log within `logs/`.
pub const FAILED_AUDIT_FILE: &str = "notify-failed.ndjson";

/// Attachment source scanning the state directory for recent artifacts.
///
/// Execution logs are the `.json` files under `logs/`; rendered reports are
/// the `.html` files under `reports/`. A missing directory yields no
/// attachments rather than an error.
#[derive(Debug, Clone)]
pub struct FsAttachmentSource {
    root: Utf8PathBuf,
}

impl FsAttachmentSource {
    /// Creates a source rooted at the given state directory.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn newest_entries(
        &self,
        subdir: &str,
        suffix: &str,
    ) -> AttachmentSourceResult<Vec<(SystemTime, String)>> {
        let path = self.root.join(subdir);
        let Ok(dir) = Dir::open_ambient_dir(&path, ambient_authority()) else {
            return Ok(Vec::new());
        };

        let mut found = Vec::new();
        for candidate in dir.entries().map_err(AttachmentSourceError::persistence)? {
            let item = candidate.map_err(AttachmentSourceError::persistence)?;
            let name = item
                .file_name()
                .map_err(AttachmentSourceError::persistence)?;
            if !name.ends_with(suffix) {
                continue;
            }
            let modified = item
                .metadata()
                .and_then(|metadata| metadata.modified())
                .map_err(AttachmentSourceError::persistence)?;
            found.push((modified, name));
        }
        found.sort_by(|a, b| b.cmp(a));
        Ok(found)
    }
}

#[async_trait]
impl AttachmentSource for FsAttachmentSource {
    async fn recent_logs(&self, limit: usize) -> AttachmentSourceResult<Vec<MailAttachment>> {
        let newest = self.newest_entries("logs", ".json")?;
        Ok(newest
            .into_iter()
            .take(limit)
            .map(|(_, name)| {
                let path = self.root.join("logs").join(&name);
                MailAttachment::new(name, path, LOG_CONTENT_TYPE)
            })
            .collect())
    }

    async fn latest_report(&self) -> AttachmentSourceResult<Option<MailAttachment>> {
        let newest = self.newest_entries("reports", ".html")?;
        Ok(newest.into_iter().next().map(|(_, name)| {
            let path = self.root.join("reports").join(&name);
            MailAttachment::new(name, path, REPORT_CONTENT_TYPE)
        }))
    }
}

/// Audit log appending newline-delimited JSON records under `logs/`.
#[derive(Debug)]
pub struct FsDeliveryAuditLog {
    dir: Dir,
}

impl FsDeliveryAuditLog {
    /// Opens the log, creating the `logs/` directory beneath the root.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryAuditLogError::Persistence`] when the directory
    /// cannot be created or opened.
    pub fn open(root: &Utf8Path) -> DeliveryAuditLogResult<Self> {
        let logs_root = root.join("logs");
        std::fs::create_dir_all(logs_root.as_std_path())
            .map_err(DeliveryAuditLogError::persistence)?;
        let dir = Dir::open_ambient_dir(&logs_root, ambient_authority())
            .map_err(DeliveryAuditLogError::persistence)?;
        Ok(Self { dir })
    }

    fn append_line(&self, file: &str, line: &str) -> DeliveryAuditLogResult<()> {
        let mut handle = self
            .dir
            .open_with(file, OpenOptions::new().create(true).append(true))
            .map_err(DeliveryAuditLogError::persistence)?;
        writeln!(handle, "{line}").map_err(DeliveryAuditLogError::persistence)?;
        Ok(())
    }
}

#[async_trait]
impl DeliveryAuditLog for FsDeliveryAuditLog {
    async fn record_sent(&self, entry: &SentAuditEntry) -> DeliveryAuditLogResult<()> {
        let line = serde_json::to_string(entry).map_err(DeliveryAuditLogError::persistence)?;
        self.append_line(SENT_AUDIT_FILE, &line)
    }

    async fn record_failed(&self, entry: &FailedAuditEntry) -> DeliveryAuditLogResult<()> {
        let line = serde_json::to_string(entry).map_err(DeliveryAuditLogError::persistence)?;
        self.append_line(FAILED_AUDIT_FILE, &line)
    }
}
