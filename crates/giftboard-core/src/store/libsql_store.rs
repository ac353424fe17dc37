//! libSQL-backed person store with an in-process change feed.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use super::{PersonStore, Snapshot, SnapshotFeed};
use crate::db::{Database, LibSqlPersonRepository, SyncConfig};
use crate::error::Result;
use crate::models::{GiftStatus, Person, PersonId};
use crate::util::unix_millis_now;

/// Person store over a local libSQL file or an embedded replica.
///
/// Every write reloads the collection and publishes it while still holding the
/// connection lock, so subscribers observe snapshots in write order.
pub struct LibSqlPersonStore {
    db: Mutex<Database>,
    snapshots: watch::Sender<Snapshot>,
}

impl LibSqlPersonStore {
    /// Wrap an opened database and load the initial collection.
    pub async fn new(db: Database) -> Result<Self> {
        let people = LibSqlPersonRepository::new(db.connection())
            .list_all()
            .await?;
        let (snapshots, _) = watch::channel(Snapshot::from(people));
        Ok(Self {
            db: Mutex::new(db),
            snapshots,
        })
    }

    /// Open a store at the given filesystem path.
    ///
    /// With a sync config the file becomes an embedded replica of the remote
    /// database; otherwise it is local-only.
    pub async fn open_path(
        db_path: impl Into<PathBuf>,
        sync_config: Option<SyncConfig>,
    ) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = if let Some(config) = sync_config {
            tracing::info!(
                "Sync enabled with remote: {}",
                config.url.as_deref().unwrap_or("unknown")
            );
            Database::open_with_sync(&db_path, config).await?
        } else {
            tracing::info!("Running in local-only mode (no sync config)");
            Database::open(&db_path).await?
        };
        Self::new(db).await
    }

    /// Open an in-memory store (primarily for tests).
    pub async fn open_in_memory() -> Result<Self> {
        Self::new(Database::open_in_memory().await?).await
    }

    /// Returns whether this store syncs with a remote database.
    pub async fn is_sync_enabled(&self) -> bool {
        self.db.lock().await.is_sync_enabled()
    }

    /// Pull remote changes and publish a snapshot if the collection changed.
    ///
    /// Returns whether a new snapshot was published.
    pub async fn refresh(&self) -> Result<bool> {
        let db = self.db.lock().await;
        db.sync().await?;
        let people = LibSqlPersonRepository::new(db.connection())
            .list_all()
            .await?;

        let changed = self.snapshots.send_if_modified(|current| {
            if current.iter().eq(people.iter()) {
                false
            } else {
                *current = Snapshot::from(people);
                true
            }
        });
        if changed {
            tracing::debug!("Published refreshed snapshot");
        }
        Ok(changed)
    }

    /// Periodically call [`Self::refresh`] until the store is dropped or the
    /// returned task is aborted.
    pub fn spawn_refresh(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let store = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(store) = store.upgrade() else {
                    break;
                };
                if let Err(error) = store.refresh().await {
                    tracing::warn!("Background refresh failed: {error}");
                }
            }
        })
    }

    /// Number of live snapshot feeds.
    pub fn subscriber_count(&self) -> usize {
        self.snapshots.receiver_count()
    }

    /// Fetch a single person by id.
    pub async fn get(&self, id: &PersonId) -> Result<Option<Person>> {
        let db = self.db.lock().await;
        LibSqlPersonRepository::new(db.connection()).get(id).await
    }

    /// List ids that start with `prefix`.
    pub async fn list_ids_by_prefix(&self, prefix: &str, limit: usize) -> Result<Vec<String>> {
        let db = self.db.lock().await;
        LibSqlPersonRepository::new(db.connection())
            .list_ids_by_prefix(prefix, limit)
            .await
    }

    /// Reload and publish after a committed write.
    ///
    /// A failed reload does not undo the write, so it is logged rather than
    /// returned. The next successful write or [`Self::refresh`] publishes the
    /// missed state.
    async fn publish(&self, db: &Database) {
        match LibSqlPersonRepository::new(db.connection())
            .list_all()
            .await
        {
            Ok(people) => {
                tracing::debug!(count = people.len(), "Publishing snapshot");
                self.snapshots.send_replace(Snapshot::from(people));
            }
            Err(error) => {
                tracing::warn!("Write committed but snapshot reload failed: {error}");
            }
        }
    }
}

impl PersonStore for LibSqlPersonStore {
    async fn create(&self, name: &str, status: GiftStatus) -> Result<PersonId> {
        let now = unix_millis_now();
        let person = Person {
            id: PersonId::new(),
            name: name.trim().to_string(),
            status,
            created_at: now,
            updated_at: now,
        };

        let db = self.db.lock().await;
        LibSqlPersonRepository::new(db.connection())
            .insert(&person)
            .await?;
        self.publish(&db).await;
        Ok(person.id)
    }

    async fn update_status(&self, id: &PersonId, status: GiftStatus) -> Result<()> {
        let db = self.db.lock().await;
        LibSqlPersonRepository::new(db.connection())
            .update_status(id, status, unix_millis_now())
            .await?;
        self.publish(&db).await;
        Ok(())
    }

    async fn delete(&self, id: &PersonId) -> Result<()> {
        let db = self.db.lock().await;
        LibSqlPersonRepository::new(db.connection())
            .delete(id)
            .await?;
        self.publish(&db).await;
        Ok(())
    }

    async fn subscribe(&self) -> Result<SnapshotFeed> {
        Ok(SnapshotFeed::new(self.snapshots.subscribe()))
    }
}
