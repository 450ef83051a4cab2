//! Integration tests for snapshot publication
//!
//! Observers only ever see whole, version-stamped states, in version order,
//! and only when something actually changed.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use statekit_core::state::{Version, Versioned};
use statekit_core::reducer::Reducer;
use statekit_runtime::{Store, StoreError};
use statekit_testing::SnapshotRecorder;
use tokio_test::{assert_err, assert_ok};

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, Default)]
struct TallyState {
    entries: Vec<u32>,
    version: Version,
}

impl Versioned for TallyState {
    fn version(&self) -> Version {
        self.version
    }
}

#[derive(Debug, Clone, PartialEq)]
enum TallyAction {
    /// Append a value
    Record(u32),
    /// Append values only while below a cap
    RecordBelow {
        /// Value to append
        value: u32,
        /// Rejected once this many entries exist
        cap: usize,
    },
    /// Touches nothing
    Noop,
}

struct TallyReducer;

impl Reducer for TallyReducer {
    type State = TallyState;
    type Action = TallyAction;
    type Environment = ();

    fn reduce(&self, state: &mut TallyState, action: TallyAction, _env: &()) {
        let value = match action {
            TallyAction::Record(value) => value,
            TallyAction::RecordBelow { value, cap } if state.entries.len() < cap => value,
            TallyAction::RecordBelow { .. } | TallyAction::Noop => return,
        };
        state.entries.push(value);
        state.version = state.version.next();
    }
}

fn tally_store() -> Store<TallyState, TallyAction, (), TallyReducer> {
    Store::new(TallyState::default(), TallyReducer, ())
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn subscriber_sees_each_sequential_change() {
    let store = tally_store();
    let recorder = SnapshotRecorder::start(&store);

    for value in 1..=3 {
        assert_ok!(store.send(TallyAction::Record(value)).await);
        recorder.versions_until(Version::new(u64::from(value))).await;
    }

    assert_eq!(
        recorder.versions(),
        vec![
            Version::new(0),
            Version::new(1),
            Version::new(2),
            Version::new(3)
        ]
    );
    let last = recorder.snapshots().pop().unwrap();
    assert_eq!(last.entries, vec![1, 2, 3]);
}

#[tokio::test]
async fn noop_actions_publish_nothing() {
    let store = tally_store();
    let mut rx = store.subscribe();

    assert_ok!(store.send(TallyAction::Noop).await);
    assert!(!rx.has_changed().unwrap());

    assert_ok!(store.send(TallyAction::Record(7)).await);
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().version(), Version::new(1));
}

#[tokio::test]
async fn rejected_actions_between_changes_are_invisible() {
    let store = tally_store();
    let recorder = SnapshotRecorder::start(&store);

    for value in 0..6 {
        assert_ok!(store.send(TallyAction::RecordBelow { value, cap: 3 }).await);
        assert_ok!(store.send(TallyAction::Noop).await);
    }

    let versions = recorder.versions_until(Version::new(3)).await;
    assert_eq!(versions.last(), Some(&Version::new(3)));
    assert_eq!(store.snapshot().entries, vec![0, 1, 2]);
    assert_eq!(store.version(), Version::new(3));
}

#[tokio::test]
async fn concurrent_senders_get_distinct_versions() {
    let store = tally_store();
    let recorder = SnapshotRecorder::start(&store);

    let handles: Vec<_> = (0..20)
        .map(|value| {
            let store = store.clone();
            tokio::spawn(async move { store.send(TallyAction::Record(value)).await })
        })
        .collect();
    for handle in handles {
        assert_ok!(handle.await.unwrap());
    }

    assert_eq!(store.version(), Version::new(20));
    let versions = recorder.versions_until(Version::new(20)).await;
    assert!(versions.windows(2).all(|w| w[0] < w[1]));

    let snapshot = store.snapshot();
    assert_eq!(snapshot.entries.len(), 20);
    assert_eq!(snapshot.version(), snapshot.state().version());
}

#[tokio::test]
async fn snapshots_outlive_later_changes() {
    let store = tally_store();
    assert_ok!(store.send(TallyAction::Record(1)).await);

    let before = store.snapshot();
    assert_ok!(store.send(TallyAction::Record(2)).await);

    assert_eq!(before.entries, vec![1]);
    assert_eq!(before.version(), Version::new(1));
    assert_eq!(store.snapshot().entries, vec![1, 2]);
}

#[tokio::test]
async fn shutdown_closes_the_door() {
    let store = tally_store();
    assert_ok!(store.send(TallyAction::Record(1)).await);
    let mut rx = store.subscribe();

    store.shutdown().await;

    let result = store.send(TallyAction::Record(2)).await;
    assert_err!(result.clone());
    assert_eq!(result, Err(StoreError::ShutdownInProgress));
    assert_eq!(store.version(), Version::new(1));
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn shutdown_during_concurrent_sends_leaves_a_final_snapshot() {
    let store = tally_store();

    let handles: Vec<_> = (0..20)
        .map(|value| {
            let store = store.clone();
            tokio::spawn(async move { store.send(TallyAction::Record(value)).await })
        })
        .collect();
    store.shutdown().await;
    let frozen = store.snapshot();

    let mut applied = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            applied += 1;
        }
    }

    // Whatever landed, landed before shutdown returned
    assert_eq!(store.snapshot().version(), frozen.version());
    assert_eq!(frozen.entries.len(), applied);
    assert_eq!(frozen.version(), Version::new(u64::try_from(applied).unwrap()));
}
