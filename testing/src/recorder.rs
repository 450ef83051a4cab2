//! Records every snapshot a [`Store`] publishes.
//!
//! The recorder runs a background task that follows the store's snapshot
//! channel, so tests can check what an observer (a renderer, for instance)
//! would have seen.

use statekit_core::{reducer::Reducer, state::Version, state::Versioned};
use statekit_runtime::{Snapshot, Store};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Collects the versions of all snapshots observed on a store
///
/// A `watch` channel only keeps the latest value, so a slow observer may skip
/// intermediate versions; the recorded sequence is always strictly increasing.
pub struct SnapshotRecorder<S> {
    seen: Arc<Mutex<Vec<Snapshot<S>>>>,
    task: JoinHandle<()>,
}

impl<S> SnapshotRecorder<S>
where
    S: Send + Sync + 'static,
{
    /// Subscribe to `store` and start recording
    ///
    /// The snapshot current at subscription time is recorded first.
    #[must_use]
    pub fn start<A, E, R>(store: &Store<S, A, E, R>) -> Self
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + 'static,
        S: Versioned + Clone,
        E: Send + Sync + 'static,
    {
        Self::follow(store.subscribe())
    }

    /// Record from an existing receiver
    #[must_use]
    pub fn follow(mut rx: watch::Receiver<Snapshot<S>>) -> Self {
        let seen = Arc::new(Mutex::new(vec![rx.borrow_and_update().clone()]));
        let sink = Arc::clone(&seen);

        let task = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let snapshot = rx.borrow_and_update().clone();
                sink.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(snapshot);
            }
        });

        Self { seen, task }
    }

    /// Snapshots recorded so far
    #[must_use]
    pub fn snapshots(&self) -> Vec<Snapshot<S>> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Versions recorded so far
    #[must_use]
    pub fn versions(&self) -> Vec<Version> {
        self.snapshots().iter().map(Snapshot::version).collect()
    }

    /// Wait (up to one second) until `version` has been recorded
    ///
    /// Returns the versions recorded at that point.
    ///
    /// # Panics
    ///
    /// Panics if `version` is not observed within the deadline.
    #[allow(clippy::panic)] // Test helper
    pub async fn versions_until(&self, version: Version) -> Vec<Version> {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(1);

        loop {
            let versions = self.versions();
            if versions.last().is_some_and(|v| *v >= version) {
                return versions;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "version {version} never observed, saw {versions:?}"
            );
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }
}

impl<S> Drop for SnapshotRecorder<S> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
