//! Sync adapter: the client's view of the record store.
//!
//! The adapter never patches its own state after a write. The displayed list is
//! always the latest snapshot delivered by the store, so a write becomes
//! visible one round trip later, when the store publishes it.

use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::error::{Error, Result};
use crate::models::{GiftStatus, PersonId};
use crate::store::{PersonStore, Snapshot};

/// Client-side bridge between the board and a [`PersonStore`].
pub struct SyncAdapter<S> {
    store: Arc<S>,
    latest: Arc<RwLock<Snapshot>>,
}

impl<S> Clone for SyncAdapter<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            latest: Arc::clone(&self.latest),
        }
    }
}

impl<S: PersonStore> SyncAdapter<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            latest: Arc::new(RwLock::new(Snapshot::empty())),
        }
    }

    /// The underlying store.
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The most recent snapshot received from the store.
    pub fn latest(&self) -> Snapshot {
        self.latest
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Invoke `callback` with every snapshot, starting with the current state.
    ///
    /// The adapter's held snapshot is replaced before each invocation.
    pub async fn subscribe<F>(&self, callback: F) -> Result<Subscription>
    where
        F: Fn(Snapshot) + Send + Sync + 'static,
    {
        let mut feed = self.store.subscribe().await?;
        let gate = Arc::new(Mutex::new(true));
        let latest = Arc::clone(&self.latest);

        let task_gate = Arc::clone(&gate);
        let task = tokio::spawn(async move {
            while let Some(snapshot) = feed.next().await {
                let active = task_gate.lock().await;
                if !*active {
                    break;
                }
                replace_snapshot(&latest, snapshot.clone());
                callback(snapshot);
            }
            tracing::debug!("Snapshot feed closed");
        });

        tracing::info!("Subscribed to snapshot feed");
        Ok(Subscription {
            gate,
            task: Mutex::new(Some(task)),
        })
    }

    /// Fetch the current snapshot once, updating the held snapshot.
    pub async fn refresh_latest(&self) -> Result<Snapshot> {
        let mut feed = self.store.subscribe().await?;
        let snapshot = feed
            .next()
            .await
            .ok_or_else(|| Error::Transport("snapshot feed closed".into()))?;
        replace_snapshot(&self.latest, snapshot.clone());
        Ok(snapshot)
    }

    /// Add a person with status `not-sent`.
    ///
    /// Returns once the store acknowledges the write; the person shows up in
    /// [`Self::latest`] only after the next snapshot arrives.
    pub async fn add_person(&self, name: &str) -> Result<PersonId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("name must not be empty".into()));
        }

        tracing::debug!(%name, "Adding person");
        self.store.create(name, GiftStatus::NotSent).await
    }

    /// Replace a person's status.
    pub async fn set_status(&self, id: &PersonId, status: GiftStatus) -> Result<()> {
        tracing::debug!(%id, %status, "Setting status");
        self.store.update_status(id, status).await
    }

    /// Permanently remove a person.
    pub async fn delete_person(&self, id: &PersonId) -> Result<()> {
        tracing::debug!(%id, "Deleting person");
        self.store.delete(id).await
    }
}

fn replace_snapshot(latest: &RwLock<Snapshot>, snapshot: Snapshot) {
    *latest
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner) = snapshot;
}

/// Handle for an active snapshot subscription.
///
/// Dropping the handle aborts the delivery task; call
/// [`Subscription::unsubscribe`] to also wait for it to finish.
pub struct Subscription {
    gate: Arc<Mutex<bool>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Subscription {
    /// Stop delivery. Idempotent.
    ///
    /// Once this returns the callback will not run again and the store feed
    /// has been released.
    pub async fn unsubscribe(&self) {
        *self.gate.lock().await = false;

        let task = self.task.lock().await.take();
        if let Some(task) = task {
            task.abort();
            let _ = task.await;
            tracing::info!("Unsubscribed from snapshot feed");
        }
    }

    /// Whether snapshots are still being delivered.
    pub async fn is_active(&self) -> bool {
        *self.gate.lock().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}
