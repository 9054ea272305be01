//! Filesystem-backed template source and report store.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::report::ports::{
    ReportStore, ReportStoreError, ReportStoreResult, TemplateKind, TemplateSource,
    TemplateSourceError, TemplateSourceResult,
};

const SUCCESS_TEMPLATE_FILE: &str = "success_report.html";
const FAILURE_TEMPLATE_FILE: &str = "error_report.html";

/// Template source reading externally maintained files under `templates/`.
///
/// The directory is resolved on every lookup, so templates dropped in after
/// the pipeline has started are picked up without a restart.
#[derive(Debug, Clone)]
pub struct FsTemplateSource {
    templates_root: Utf8PathBuf,
}

impl FsTemplateSource {
    /// Opens the source rooted at the given state directory.
    ///
    /// A missing `templates/` directory is tolerated; every lookup then
    /// reports the template as unavailable.
    #[must_use]
    pub fn open(root: &Utf8Path) -> Self {
        Self {
            templates_root: root.join("templates"),
        }
    }

    const fn file_name(kind: TemplateKind) -> &'static str {
        match kind {
            TemplateKind::Success => SUCCESS_TEMPLATE_FILE,
            TemplateKind::Failure => FAILURE_TEMPLATE_FILE,
        }
    }
}

#[async_trait]
impl TemplateSource for FsTemplateSource {
    async fn load(&self, kind: TemplateKind) -> TemplateSourceResult<Option<String>> {
        let Ok(dir) = Dir::open_ambient_dir(&self.templates_root, ambient_authority()) else {
            return Ok(None);
        };
        let name = Self::file_name(kind);
        if !dir.exists(name) {
            return Ok(None);
        }
        let template = dir
            .read_to_string(name)
            .map_err(TemplateSourceError::persistence)?;
        Ok(Some(template))
    }
}

/// Report store writing one HTML artifact per task under `reports/`.
#[derive(Debug)]
pub struct FsReportStore {
    dir: Dir,
}

impl FsReportStore {
    /// Opens the store, creating the `reports/` directory beneath the root.
    ///
    /// # Errors
    ///
    /// Returns [`ReportStoreError::Persistence`] when the directory cannot
    /// be created or opened.
    pub fn open(root: &Utf8Path) -> ReportStoreResult<Self> {
        let reports_root = root.join("reports");
        std::fs::create_dir_all(reports_root.as_std_path())
            .map_err(ReportStoreError::persistence)?;
        let dir = Dir::open_ambient_dir(&reports_root, ambient_authority())
            .map_err(ReportStoreError::persistence)?;
        Ok(Self { dir })
    }
}

#[async_trait]
impl ReportStore for FsReportStore {
    async fn save(&self, task_id: &str, html: &str) -> ReportStoreResult<()> {
        self.dir
            .write(format!("{task_id}_report.html"), html.as_bytes())
            .map_err(ReportStoreError::persistence)?;
        Ok(())
    }
}
