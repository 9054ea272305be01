//! Filesystem-backed intake adapters.
//!
//! State lives under a capability directory handle: the seen-set as a single
//! JSON array and each task record as `tasks/<id>.json`. The seen-set write
//! is write-new-then-replace so a concurrent poll can never observe a torn
//! file.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::intake::{
    domain::{SeenSet, TaskId, TaskRecord},
    ports::{
        SeenSetStore, SeenSetStoreError, SeenSetStoreResult, TaskRecordStore,
        TaskRecordStoreError, TaskRecordStoreResult,
    },
};

/// File name of the persisted seen-set within the state directory.
pub const SEEN_SET_FILE: &str = "processed-messages.json";

/// Seen-set store persisting a JSON array of fingerprint strings.
#[derive(Debug)]
pub struct FsSeenSetStore {
    dir: Dir,
}

impl FsSeenSetStore {
    /// Opens the store rooted at the given state directory.
    ///
    /// # Errors
    ///
    /// Returns [`SeenSetStoreError::Persistence`] when the directory cannot
    /// be created or opened.
    pub fn open(root: &Utf8Path) -> SeenSetStoreResult<Self> {
        std::fs::create_dir_all(root.as_std_path()).map_err(SeenSetStoreError::persistence)?;
        let dir =
            Dir::open_ambient_dir(root, ambient_authority()).map_err(SeenSetStoreError::persistence)?;
        Ok(Self { dir })
    }
}

#[async_trait]
impl SeenSetStore for FsSeenSetStore {
    async fn load(&self) -> SeenSetStoreResult<SeenSet> {
        if !self.dir.exists(SEEN_SET_FILE) {
            return Ok(SeenSet::new());
        }
        let raw = self
            .dir
            .read_to_string(SEEN_SET_FILE)
            .map_err(SeenSetStoreError::persistence)?;
        serde_json::from_str(&raw).map_err(SeenSetStoreError::persistence)
    }

    async fn save(&self, seen: &SeenSet) -> SeenSetStoreResult<()> {
        let encoded = serde_json::to_string(seen).map_err(SeenSetStoreError::persistence)?;
        let staging = format!("{SEEN_SET_FILE}.tmp");
        self.dir
            .write(&staging, encoded.as_bytes())
            .map_err(SeenSetStoreError::persistence)?;
        self.dir
            .rename(&staging, &self.dir, SEEN_SET_FILE)
            .map_err(SeenSetStoreError::persistence)?;
        Ok(())
    }
}

/// Task record store writing one JSON document per task under `tasks/`.
#[derive(Debug)]
pub struct FsTaskRecordStore {
    dir: Dir,
}

impl FsTaskRecordStore {
    /// Opens the store, creating the `tasks/` directory beneath the root.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRecordStoreError::Persistence`] when the directory
    /// cannot be created or opened.
    pub fn open(root: &Utf8Path) -> TaskRecordStoreResult<Self> {
        let tasks_root = root.join("tasks");
        std::fs::create_dir_all(tasks_root.as_std_path())
            .map_err(TaskRecordStoreError::persistence)?;
        let dir = Dir::open_ambient_dir(&tasks_root, ambient_authority())
            .map_err(TaskRecordStoreError::persistence)?;
        Ok(Self { dir })
    }

    fn file_name(id: &TaskId) -> String {
        format!("{id}.json")
    }
}

#[async_trait]
impl TaskRecordStore for FsTaskRecordStore {
    async fn save(&self, task: &TaskRecord) -> TaskRecordStoreResult<()> {
        let encoded =
            serde_json::to_string_pretty(task).map_err(TaskRecordStoreError::persistence)?;
        self.dir
            .write(Self::file_name(task.id()), encoded.as_bytes())
            .map_err(TaskRecordStoreError::persistence)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &TaskId) -> TaskRecordStoreResult<Option<TaskRecord>> {
        let name = Self::file_name(id);
        if !self.dir.exists(&name) {
            return Ok(None);
        }
        let raw = self
            .dir
            .read_to_string(&name)
            .map_err(TaskRecordStoreError::persistence)?;
        let task = serde_json::from_str(&raw).map_err(TaskRecordStoreError::persistence)?;
        Ok(Some(task))
    }
}
