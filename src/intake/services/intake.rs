//! Polling cycle that turns unread mailbox messages into task records.

use crate::intake::{
    domain::{TASK_MARKER, TaskId, TaskRecord, parse_task_message},
    ports::{
        MailboxError, SeenSetStore, SeenSetStoreError, TaskMailbox, TaskRecordStore,
        TaskRecordStoreError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for the intake cycle.
///
/// Every variant is an infrastructure failure: the cycle aborts, the error
/// surfaces to the external scheduler, and the next scheduled invocation
/// retries. Per-message parse failures are handled inside the cycle and do
/// not appear here.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// The inbound transport failed.
    #[error(transparent)]
    Mailbox(#[from] MailboxError),
    /// The seen-set could not be loaded or persisted.
    #[error(transparent)]
    SeenSet(#[from] SeenSetStoreError),
    /// A task record could not be persisted.
    #[error(transparent)]
    TaskStore(#[from] TaskRecordStoreError),
}

/// Result type for intake service operations.
pub type IntakeResult<T> = Result<T, IntakeError>;

/// Intake deduplicator stage.
///
/// Consumes raw inbound messages, extracts task records, suppresses
/// previously seen messages, and persists the seen-set atomically at the end
/// of each polling cycle. The intake guarantee is at-least-once: a crash
/// after a message is marked read upstream but before the local seen-set
/// write lands may reprocess that message once.
#[derive(Clone)]
pub struct IntakeService<M, S, T, C>
where
    M: TaskMailbox,
    S: SeenSetStore,
    T: TaskRecordStore,
    C: Clock + Send + Sync,
{
    mailbox: Arc<M>,
    seen_store: Arc<S>,
    task_store: Arc<T>,
    clock: Arc<C>,
}

impl<M, S, T, C> IntakeService<M, S, T, C>
where
    M: TaskMailbox,
    S: SeenSetStore,
    T: TaskRecordStore,
    C: Clock + Send + Sync,
{
    /// Creates a new intake service over the given transport and stores.
    #[must_use]
    pub const fn new(mailbox: Arc<M>, seen_store: Arc<S>, task_store: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            mailbox,
            seen_store,
            task_store,
            clock,
        }
    }

    /// Runs one polling cycle and returns the newly discovered task records.
    ///
    /// Each returned task's underlying message has been marked read and its
    /// fingerprint recorded before this method returns. Messages that fail
    /// to parse are logged and left unread so a later poll may retry them.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError`] when the transport or a store fails; the
    /// whole cycle is then abandoned for the scheduler to retry.
    pub async fn poll(&self) -> IntakeResult<Vec<TaskRecord>> {
        let references = self.mailbox.list_unread(TASK_MARKER).await?;
        if references.is_empty() {
            tracing::info!("no new task messages");
            return Ok(Vec::new());
        }
        tracing::info!(count = references.len(), "found unread task messages");

        let mut seen = self.seen_store.load().await?;
        let mut new_tasks = Vec::new();

        for reference in &references {
            let message = self.mailbox.fetch(reference).await?;
            let fingerprint = message.fingerprint();

            if seen.contains(&fingerprint) {
                tracing::debug!(%fingerprint, "message already processed, suppressing");
                self.mailbox.mark_read(reference).await?;
                continue;
            }

            match parse_task_message(&message, TaskId::generate(), &*self.clock) {
                Ok(task) => {
                    self.task_store.save(&task).await?;
                    seen.record(fingerprint);
                    self.mailbox.mark_read(reference).await?;
                    tracing::info!(task_id = %task.id(), description = task.description(), "parsed new task");
                    new_tasks.push(task);
                }
                Err(err) => {
                    // Left unread and unfingerprinted so a later poll retries it.
                    tracing::warn!(%reference, error = %err, "skipping unparseable message");
                }
            }
        }

        self.seen_store.save(&seen).await?;
        Ok(new_tasks)
    }
}
