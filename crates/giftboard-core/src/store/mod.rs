//! Record store contract and snapshot feed.
//!
//! A store persists [`Person`] records and pushes the full collection to every
//! subscriber whenever it changes. Subscribers only ever see whole snapshots;
//! there is no incremental patch protocol.

mod libsql_store;

use std::future::Future;
use std::ops::Deref;
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::Result;
use crate::models::{GiftStatus, Person, PersonId};

pub use libsql_store::LibSqlPersonStore;

/// The full, ordered collection of people at one point in time.
///
/// Immutable once built; cloning shares the underlying slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(Arc<[Person]>);

impl Snapshot {
    /// An empty collection
    pub fn empty() -> Self {
        Self(Arc::from(Vec::new()))
    }

    /// Find a person by id
    pub fn find(&self, id: &PersonId) -> Option<&Person> {
        self.0.iter().find(|person| &person.id == id)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Person>> for Snapshot {
    fn from(people: Vec<Person>) -> Self {
        Self(Arc::from(people))
    }
}

impl Deref for Snapshot {
    type Target = [Person];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A live subscription to a store's collection.
///
/// Yields the current collection first, then one snapshot per change. If the
/// consumer falls behind, intermediate snapshots are skipped and only the
/// newest one is delivered. Dropping the feed releases the subscription.
#[derive(Debug)]
pub struct SnapshotFeed {
    rx: watch::Receiver<Snapshot>,
    primed: bool,
}

impl SnapshotFeed {
    pub(crate) const fn new(rx: watch::Receiver<Snapshot>) -> Self {
        Self { rx, primed: false }
    }

    /// Wait for the next snapshot. Returns `None` once the store is gone.
    pub async fn next(&mut self) -> Option<Snapshot> {
        if !self.primed {
            self.primed = true;
            return Some(self.rx.borrow_and_update().clone());
        }

        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

/// Persistence collaborator for person records.
///
/// Implementations stamp timestamps and assign ids themselves, and must
/// deliver snapshots to subscribers in the same order their writes were
/// applied.
pub trait PersonStore: Send + Sync + 'static {
    /// Create a record and return its store-assigned id.
    fn create(&self, name: &str, status: GiftStatus)
        -> impl Future<Output = Result<PersonId>> + Send;

    /// Replace a record's status. Fails with `NotFound` if the id is absent.
    fn update_status(
        &self,
        id: &PersonId,
        status: GiftStatus,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Permanently remove a record. Fails with `NotFound` if the id is absent.
    fn delete(&self, id: &PersonId) -> impl Future<Output = Result<()>> + Send;

    /// Open a feed of full-collection snapshots.
    fn subscribe(&self) -> impl Future<Output = Result<SnapshotFeed>> + Send;
}
