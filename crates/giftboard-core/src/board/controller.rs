//! Board controller: turns finished drag gestures and form input into store
//! commands.
//!
//! Nothing here moves cards locally. A drop either issues a status command or
//! does nothing; in both cases the board keeps rendering the latest snapshot,
//! so a failed or ignored drop simply snaps back on the next render.

use std::sync::Mutex;

use serde::Serialize;

use super::categorize::{categorize, Columns};
use crate::error::{Error, ErrorKind, Result};
use crate::input::parse_names;
use crate::models::{GiftStatus, PersonId};
use crate::store::PersonStore;
use crate::sync::SyncAdapter;

/// A position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DragLocation {
    pub column: GiftStatus,
    pub index: usize,
}

/// Terminal event of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropEvent {
    pub dragged_item_id: PersonId,
    pub source: DragLocation,
    /// `None` when the card was released outside every column.
    pub destination: Option<DragLocation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    OutsideColumns,
    SamePosition,
}

/// What a drop did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// No command was issued.
    Ignored(IgnoreReason),
    /// Same column, different slot. The status was rewritten unchanged; the
    /// new position is not persisted and reverts to snapshot order.
    Reordered { id: PersonId, column: GiftStatus },
    /// The person changed column.
    Moved {
        id: PersonId,
        from: GiftStatus,
        to: GiftStatus,
    },
}

/// User-visible banner for a failed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    #[serde(skip)]
    pub kind: ErrorKind,
    pub message: String,
}

/// Result of a bulk add.
#[derive(Debug, Default)]
pub struct AddReport {
    pub added: Vec<PersonId>,
    pub failed: Vec<(String, Error)>,
}

impl AddReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Routes board interactions to the sync adapter.
pub struct BoardController<S> {
    adapter: SyncAdapter<S>,
    notice: Mutex<Option<Notice>>,
}

impl<S: PersonStore> BoardController<S> {
    pub const fn new(adapter: SyncAdapter<S>) -> Self {
        Self {
            adapter,
            notice: Mutex::new(None),
        }
    }

    pub const fn adapter(&self) -> &SyncAdapter<S> {
        &self.adapter
    }

    /// Current board, derived from the latest snapshot.
    pub fn columns(&self) -> Columns {
        categorize(&self.adapter.latest())
    }

    /// Interpret a finished drag gesture.
    pub async fn handle_drop(&self, event: DropEvent) -> Result<DropOutcome> {
        let Some(destination) = event.destination else {
            return Ok(DropOutcome::Ignored(IgnoreReason::OutsideColumns));
        };
        if destination == event.source {
            return Ok(DropOutcome::Ignored(IgnoreReason::SamePosition));
        }

        let id = event.dragged_item_id;
        if let Err(error) = self.adapter.set_status(&id, destination.column).await {
            self.report("update the status", &error);
            return Err(error);
        }

        let from = event.source.column;
        let to = destination.column;
        Ok(if from == to {
            DropOutcome::Reordered { id, column: to }
        } else {
            tracing::debug!(%id, %from, %to, "Moved person");
            DropOutcome::Moved { id, from, to }
        })
    }

    /// Add every name found in `raw`.
    ///
    /// Unparseable input is returned as a `Validation` error and nothing is
    /// written. Individual write failures are collected in the report.
    pub async fn add_people(&self, raw: &str) -> Result<AddReport> {
        let names = parse_names(raw)?;

        let mut report = AddReport::default();
        for name in names {
            match self.adapter.add_person(&name).await {
                Ok(id) => report.added.push(id),
                Err(error) => {
                    self.report("add a person", &error);
                    report.failed.push((name, error));
                }
            }
        }
        Ok(report)
    }

    /// Permanently remove a person.
    pub async fn delete_person(&self, id: &PersonId) -> Result<()> {
        self.adapter.delete_person(id).await.inspect_err(|error| {
            self.report("delete the person", error);
        })
    }

    /// The banner currently shown, if any.
    pub fn notice(&self) -> Option<Notice> {
        self.notice
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn dismiss_notice(&self) {
        *self
            .notice
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
    }

    fn report(&self, action: &str, error: &Error) {
        tracing::warn!("Failed to {action}: {error}");
        let kind = error.kind();
        let message = match kind {
            ErrorKind::NotFound => {
                "That person no longer exists; someone may have removed them.".to_string()
            }
            ErrorKind::Validation => error.to_string(),
            ErrorKind::Transport => format!("Failed to {action}, please try again later."),
        };
        *self
            .notice
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(Notice { kind, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Person;
    use crate::store::{LibSqlPersonStore, Snapshot, SnapshotFeed};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::watch;

    /// Store double that records every status command.
    struct RecordingStore {
        status_calls: Mutex<Vec<(PersonId, GiftStatus)>>,
        fail_writes: AtomicBool,
        snapshots: watch::Sender<Snapshot>,
    }

    impl RecordingStore {
        fn new() -> Self {
            Self {
                status_calls: Mutex::new(Vec::new()),
                fail_writes: AtomicBool::new(false),
                snapshots: watch::channel(Snapshot::empty()).0,
            }
        }

        fn status_calls(&self) -> Vec<(PersonId, GiftStatus)> {
            self.status_calls.lock().unwrap().clone()
        }

        fn check(&self) -> Result<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                Err(Error::Transport("store offline".into()))
            } else {
                Ok(())
            }
        }
    }

    impl PersonStore for RecordingStore {
        async fn create(&self, _name: &str, _status: GiftStatus) -> Result<PersonId> {
            self.check()?;
            Ok(PersonId::new())
        }

        async fn update_status(&self, id: &PersonId, status: GiftStatus) -> Result<()> {
            self.status_calls.lock().unwrap().push((*id, status));
            self.check()
        }

        async fn delete(&self, _id: &PersonId) -> Result<()> {
            self.check()
        }

        async fn subscribe(&self) -> Result<SnapshotFeed> {
            Ok(SnapshotFeed::new(self.snapshots.subscribe()))
        }
    }

    fn recording() -> (Arc<RecordingStore>, BoardController<RecordingStore>) {
        let store = Arc::new(RecordingStore::new());
        let controller = BoardController::new(SyncAdapter::new(Arc::clone(&store)));
        (store, controller)
    }

    const fn at(column: GiftStatus, index: usize) -> DragLocation {
        DragLocation { column, index }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn drop_outside_columns_issues_no_command() {
        let (store, controller) = recording();
        let outcome = controller
            .handle_drop(DropEvent {
                dragged_item_id: PersonId::new(),
                source: at(GiftStatus::NotSent, 0),
                destination: None,
            })
            .await
            .unwrap();

        assert_eq!(outcome, DropOutcome::Ignored(IgnoreReason::OutsideColumns));
        assert!(store.status_calls().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn drop_on_same_slot_issues_no_command() {
        let (store, controller) = recording();
        let outcome = controller
            .handle_drop(DropEvent {
                dragged_item_id: PersonId::new(),
                source: at(GiftStatus::Preparing, 2),
                destination: Some(at(GiftStatus::Preparing, 2)),
            })
            .await
            .unwrap();

        assert_eq!(outcome, DropOutcome::Ignored(IgnoreReason::SamePosition));
        assert!(store.status_calls().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn drop_on_other_column_issues_exactly_one_command() {
        let (store, controller) = recording();
        let id = PersonId::new();
        let outcome = controller
            .handle_drop(DropEvent {
                dragged_item_id: id,
                source: at(GiftStatus::NotSent, 0),
                destination: Some(at(GiftStatus::Sent, 3)),
            })
            .await
            .unwrap();

        assert_eq!(
            outcome,
            DropOutcome::Moved {
                id,
                from: GiftStatus::NotSent,
                to: GiftStatus::Sent,
            }
        );
        assert_eq!(store.status_calls(), vec![(id, GiftStatus::Sent)]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn reorder_within_column_rewrites_same_status() {
        let (store, controller) = recording();
        let id = PersonId::new();
        let outcome = controller
            .handle_drop(DropEvent {
                dragged_item_id: id,
                source: at(GiftStatus::Preparing, 0),
                destination: Some(at(GiftStatus::Preparing, 1)),
            })
            .await
            .unwrap();

        assert_eq!(
            outcome,
            DropOutcome::Reordered {
                id,
                column: GiftStatus::Preparing,
            }
        );
        assert_eq!(store.status_calls(), vec![(id, GiftStatus::Preparing)]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_drop_raises_notice() {
        let (store, controller) = recording();
        store.fail_writes.store(true, Ordering::SeqCst);

        let result = controller
            .handle_drop(DropEvent {
                dragged_item_id: PersonId::new(),
                source: at(GiftStatus::NotSent, 0),
                destination: Some(at(GiftStatus::Preparing, 0)),
            })
            .await;

        assert!(matches!(result, Err(Error::Transport(_))));
        let notice = controller.notice().unwrap();
        assert_eq!(notice.kind, ErrorKind::Transport);
        assert!(notice.message.contains("update the status"));

        controller.dismiss_notice();
        assert!(controller.notice().is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn add_people_rejects_blank_input_without_writing() {
        let (_store, controller) = recording();
        let result = controller.add_people(" ,;\n ").await;

        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(controller.notice().is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn add_people_collects_failures() {
        let (store, controller) = recording();
        store.fail_writes.store(true, Ordering::SeqCst);

        let report = controller.add_people("A, B").await.unwrap();
        assert!(report.added.is_empty());
        let failed = report
            .failed
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(failed, vec!["A", "B"]);
        assert!(!report.is_complete());
        assert!(controller.notice().is_some());
    }

    async fn wait_until<F>(controller: &BoardController<LibSqlPersonStore>, done: F)
    where
        F: Fn(&Columns) -> bool,
    {
        for _ in 0..200 {
            if done(&controller.columns()) {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        panic!("board never reached the expected state");
    }

    fn column_names(columns: &Columns, status: GiftStatus) -> Vec<String> {
        columns
            .get(status)
            .iter()
            .map(|p: &Person| p.name.clone())
            .collect()
    }

    fn layout(columns: &Columns) -> Vec<Vec<PersonId>> {
        columns
            .by_status()
            .map(|(_, people)| people.iter().map(|p| p.id).collect())
            .collect()
    }

    async fn live_controller() -> BoardController<LibSqlPersonStore> {
        let store = Arc::new(LibSqlPersonStore::open_in_memory().await.unwrap());
        BoardController::new(SyncAdapter::new(store))
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn end_to_end_moves_reach_board_through_snapshots() {
        let controller = live_controller().await;
        let subscription = controller.adapter().subscribe(|_| {}).await.unwrap();

        let report = controller.add_people("A\nB").await.unwrap();
        let (a, b) = (report.added[0], report.added[1]);
        controller
            .adapter()
            .set_status(&b, GiftStatus::Sent)
            .await
            .unwrap();
        wait_until(&controller, |c| c.get(GiftStatus::Sent).len() == 1).await;

        let columns = controller.columns();
        assert_eq!(column_names(&columns, GiftStatus::NotSent), vec!["A"]);
        assert!(columns.get(GiftStatus::Preparing).is_empty());
        assert_eq!(column_names(&columns, GiftStatus::Sent), vec!["B"]);

        let (column, index) = columns.locate(&a).unwrap();
        let outcome = controller
            .handle_drop(DropEvent {
                dragged_item_id: a,
                source: at(column, index),
                destination: Some(at(GiftStatus::Preparing, 0)),
            })
            .await
            .unwrap();
        assert!(matches!(outcome, DropOutcome::Moved { .. }));
        wait_until(&controller, |c| c.get(GiftStatus::Preparing).len() == 1).await;

        let columns = controller.columns();
        assert!(columns.get(GiftStatus::NotSent).is_empty());
        assert_eq!(column_names(&columns, GiftStatus::Preparing), vec!["A"]);
        assert_eq!(column_names(&columns, GiftStatus::Sent), vec!["B"]);

        subscription.unsubscribe().await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn repeated_set_status_keeps_categorization() {
        let controller = live_controller().await;
        let adapter = controller.adapter();
        let a = adapter.add_person("A").await.unwrap();
        adapter.add_person("B").await.unwrap();

        adapter.set_status(&a, GiftStatus::Preparing).await.unwrap();
        let once = categorize(&adapter.refresh_latest().await.unwrap());
        adapter.set_status(&a, GiftStatus::Preparing).await.unwrap();
        let twice = categorize(&adapter.refresh_latest().await.unwrap());

        assert_eq!(layout(&once), layout(&twice));
        assert_eq!(column_names(&twice, GiftStatus::Preparing), vec!["A"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn deleting_vanished_person_raises_not_found_notice() {
        let store = Arc::new(LibSqlPersonStore::open_in_memory().await.unwrap());
        let controller = BoardController::new(SyncAdapter::new(store));

        let result = controller.delete_person(&PersonId::new()).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(controller.notice().unwrap().kind, ErrorKind::NotFound);
    }
}
