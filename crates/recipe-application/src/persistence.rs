//! Write-through persistence for the store.
//!
//! Each collection gets one background writer task fed by a channel, so
//! snapshots reach the repository in the order the mutations happened.
//! Callers get a [`PendingWrite`] per mutation and may await it or drop it.

use async_trait::async_trait;
use recipe_core::folder::{Folder, FolderRepository};
use recipe_core::session::{SessionRepository, SessionSnapshot};
use recipe_core::{RecipeError, Result};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// Destination for full-collection snapshots.
#[async_trait]
pub(crate) trait SnapshotSink<S>: Send + Sync + 'static {
    async fn write(&self, snapshot: &S) -> Result<()>;
}

#[async_trait]
impl SnapshotSink<SessionSnapshot> for Arc<dyn SessionRepository> {
    async fn write(&self, snapshot: &SessionSnapshot) -> Result<()> {
        self.save(snapshot).await
    }
}

#[async_trait]
impl SnapshotSink<Vec<Folder>> for Arc<dyn FolderRepository> {
    async fn write(&self, snapshot: &Vec<Folder>) -> Result<()> {
        self.save(snapshot).await
    }
}

type WriteRequest<S> = (S, oneshot::Sender<Result<()>>);

/// Ordered queue of snapshot writes for one collection.
pub(crate) struct WriteQueue<S> {
    label: &'static str,
    tx: mpsc::UnboundedSender<WriteRequest<S>>,
}

impl<S> WriteQueue<S>
where
    S: Send + Sync + 'static,
{
    /// Spawns the writer task. Must be called inside a Tokio runtime.
    pub(crate) fn spawn(label: &'static str, sink: impl SnapshotSink<S>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<WriteRequest<S>>();

        tokio::spawn(async move {
            while let Some((snapshot, done)) = rx.recv().await {
                let result = sink.write(&snapshot).await;
                match &result {
                    Ok(()) => tracing::debug!("[Store] Persisted {}", label),
                    Err(e) => tracing::warn!("[Store] Failed to persist {}: {}", label, e),
                }
                // The caller may have dropped its PendingWrite
                let _ = done.send(result);
            }
            tracing::debug!("[Store] Writer for {} stopped", label);
        });

        Self { label, tx }
    }

    pub(crate) fn enqueue(&self, snapshot: S) -> PendingWrite {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send((snapshot, done_tx)).is_err() {
            tracing::warn!("[Store] Writer for {} is gone; change kept in memory only", self.label);
        }
        PendingWrite {
            receivers: vec![(self.label, done_rx)],
        }
    }
}

/// Outcome of the writes triggered by one mutation.
///
/// Dropping it does not cancel anything; the write still happens.
#[must_use = "await `persisted()` to observe write failures, or drop it to ignore them"]
#[derive(Debug, Default)]
pub struct PendingWrite {
    receivers: Vec<(&'static str, oneshot::Receiver<Result<()>>)>,
}

impl PendingWrite {
    /// A mutation that changed nothing and wrote nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// True when no write was scheduled.
    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }

    /// Combines the writes of two collections into one handle.
    pub fn join(mut self, other: PendingWrite) -> Self {
        self.receivers.extend(other.receivers);
        self
    }

    /// Waits for every scheduled write and returns the first failure.
    pub async fn persisted(self) -> Result<()> {
        let mut outcome = Ok(());
        for (label, rx) in self.receivers {
            let result = rx.await.unwrap_or_else(|_| {
                Err(RecipeError::internal(format!(
                    "Writer for {} stopped before persisting",
                    label
                )))
            });
            if outcome.is_ok() {
                outcome = result;
            }
        }
        outcome
    }
}

/// The value produced by a mutation plus its pending persistence.
#[must_use]
#[derive(Debug)]
pub struct Committed<T> {
    pub value: T,
    pub write: PendingWrite,
}

impl<T> Committed<T> {
    pub(crate) fn new(value: T, write: PendingWrite) -> Self {
        Self { value, write }
    }

    /// A result that did not touch durable state.
    pub(crate) fn unchanged(value: T) -> Self {
        Self::new(value, PendingWrite::none())
    }

    /// Discards the write handle and returns the in-memory result.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Waits for persistence, returning the value only if it was written.
    pub async fn persisted(self) -> Result<T> {
        self.write.persisted().await?;
        Ok(self.value)
    }
}
