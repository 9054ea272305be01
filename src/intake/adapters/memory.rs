//! In-memory intake adapters for tests and wiring without a live transport.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::intake::{
    domain::{InboundMessage, MessageRef, SeenSet, TaskId, TaskRecord},
    ports::{
        MailboxError, MailboxResult, SeenSetStore, SeenSetStoreError, SeenSetStoreResult,
        TaskMailbox, TaskRecordStore, TaskRecordStoreError, TaskRecordStoreResult,
    },
};

/// Thread-safe scripted mailbox fake.
///
/// Messages are seeded with [`InMemoryMailbox::deliver`]; read flags mirror
/// the upstream "mark as read" side effect so tests can assert consumption.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMailbox {
    state: Arc<RwLock<MailboxState>>,
}

#[derive(Debug, Default)]
struct MailboxState {
    messages: Vec<StoredMessage>,
    fail_connection: bool,
}

#[derive(Debug)]
struct StoredMessage {
    reference: MessageRef,
    message: InboundMessage,
    read: bool,
}

impl InMemoryMailbox {
    /// Creates an empty mailbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a message and returns its transport reference.
    ///
    /// # Panics
    ///
    /// Panics when the mailbox lock is poisoned; the fake is test-only.
    pub fn deliver(&self, message: InboundMessage) -> MessageRef {
        let mut state = self.state.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        let reference = MessageRef::new(format!("msg-{}", state.messages.len() + 1));
        state.messages.push(StoredMessage {
            reference: reference.clone(),
            message,
            read: false,
        });
        reference
    }

    /// Makes every subsequent transport call fail with a connection error.
    ///
    /// # Panics
    ///
    /// Panics when the mailbox lock is poisoned; the fake is test-only.
    pub fn fail_connections(&self) {
        let mut state = self.state.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        state.fail_connection = true;
    }

    /// Returns `true` when the referenced message has been marked read.
    ///
    /// # Panics
    ///
    /// Panics when the mailbox lock is poisoned; the fake is test-only.
    #[must_use]
    pub fn is_read(&self, reference: &MessageRef) -> bool {
        let state = self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        state
            .messages
            .iter()
            .any(|stored| &stored.reference == reference && stored.read)
    }
}

fn connection_failure() -> MailboxError {
    MailboxError::connection(std::io::Error::other("simulated connection failure"))
}

#[async_trait]
impl TaskMailbox for InMemoryMailbox {
    async fn list_unread(&self, subject_marker: &str) -> MailboxResult<Vec<MessageRef>> {
        let state = self
            .state
            .read()
            .map_err(|err| MailboxError::connection(std::io::Error::other(err.to_string())))?;
        if state.fail_connection {
            return Err(connection_failure());
        }
        Ok(state
            .messages
            .iter()
            .filter(|stored| !stored.read && stored.message.subject().contains(subject_marker))
            .map(|stored| stored.reference.clone())
            .collect())
    }

    async fn fetch(&self, message: &MessageRef) -> MailboxResult<InboundMessage> {
        let state = self
            .state
            .read()
            .map_err(|err| MailboxError::connection(std::io::Error::other(err.to_string())))?;
        if state.fail_connection {
            return Err(connection_failure());
        }
        state
            .messages
            .iter()
            .find(|stored| &stored.reference == message)
            .map(|stored| stored.message.clone())
            .ok_or_else(|| MailboxError::NotFound(message.clone()))
    }

    async fn mark_read(&self, message: &MessageRef) -> MailboxResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| MailboxError::connection(std::io::Error::other(err.to_string())))?;
        if state.fail_connection {
            return Err(connection_failure());
        }
        let stored = state
            .messages
            .iter_mut()
            .find(|stored| &stored.reference == message)
            .ok_or_else(|| MailboxError::NotFound(message.clone()))?;
        stored.read = true;
        Ok(())
    }
}

/// Thread-safe in-memory seen-set store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySeenSetStore {
    state: Arc<RwLock<SeenSet>>,
}

impl InMemorySeenSetStore {
    /// Creates a store with an empty seen-set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SeenSetStore for InMemorySeenSetStore {
    async fn load(&self) -> SeenSetStoreResult<SeenSet> {
        let state = self.state.read().map_err(|err| {
            SeenSetStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.clone())
    }

    async fn save(&self, seen: &SeenSet) -> SeenSetStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            SeenSetStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        *state = seen.clone();
        Ok(())
    }
}

/// Thread-safe in-memory task record store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRecordStore {
    state: Arc<RwLock<HashMap<TaskId, TaskRecord>>>,
}

impl InMemoryTaskRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRecordStore for InMemoryTaskRecordStore {
    async fn save(&self, task: &TaskRecord) -> TaskRecordStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRecordStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.insert(task.id().clone(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TaskId) -> TaskRecordStoreResult<Option<TaskRecord>> {
        let state = self.state.read().map_err(|err| {
            TaskRecordStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(id).cloned())
    }
}
