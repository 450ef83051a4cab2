//! # Statekit Runtime
//!
//! Runtime implementation for the Statekit architecture.
//!
//! This crate provides the Store runtime that serializes reducer execution and
//! publishes version-stamped snapshots to observers.
//!
//! ## Core Components
//!
//! - **Store**: Owns the state, runs the reducer for each action, one at a time
//! - **Snapshot**: Immutable, version-stamped copy of the state handed to observers
//!
//! ## Example
//!
//! ```ignore
//! use statekit_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action; the state change is visible as soon as this returns
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//!
//! // Observe changes
//! let mut rx = store.subscribe();
//! rx.changed().await?;
//! ```

use statekit_core::{reducer::Reducer, state::Version};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

pub use error::StoreError;
pub use store::Store;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// Returned by `send()` once `shutdown()` has been called.
        #[error("Store is shutting down")]
        ShutdownInProgress,
    }
}

/// Immutable, version-stamped copy of a store's state
///
/// Snapshots share their payload through an `Arc`, so handing one to every
/// observer is cheap. A snapshot never changes after it was published; a later
/// mutation of the store produces a new snapshot with a higher version.
#[derive(Debug)]
pub struct Snapshot<S> {
    version: Version,
    state: Arc<S>,
}

impl<S> Snapshot<S> {
    /// Wrap a state value taken at `version`
    #[must_use]
    pub fn new(version: Version, state: S) -> Self {
        Self {
            version,
            state: Arc::new(state),
        }
    }

    /// Version of the state this snapshot was taken from
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// The captured state
    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }
}

impl<S> Clone for Snapshot<S> {
    fn clone(&self) -> Self {
        Self {
            version: self.version,
            state: Arc::clone(&self.state),
        }
    }
}

impl<S> std::ops::Deref for Snapshot<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.state
    }
}

/// Store runtime for coordinating reducer execution.
pub mod store {
    use super::{Arc, AtomicBool, Ordering, Reducer, RwLock, Snapshot, StoreError, Version};
    use statekit_core::state::Versioned;
    use tokio::sync::watch;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; one action is reduced at a time)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Snapshot publication to subscribers
    ///
    /// Cloning a store is cheap and yields a handle to the same state.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        shutdown: Arc<AtomicBool>,
        /// Latest published snapshot; receivers are woken on every version change
        snapshots: Arc<watch::Sender<Snapshot<S>>>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + 'static,
        S: Versioned + Clone + Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// The initial state is published as the first snapshot.
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            let first = Snapshot::new(initial_state.version(), initial_state.clone());
            let (snapshots, _) = watch::channel(first);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                shutdown: Arc::new(AtomicBool::new(false)),
                snapshots: Arc::new(snapshots),
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires write lock on state
        /// 2. Calls reducer with (state, action, environment)
        /// 3. Publishes a new snapshot if the state version moved
        ///
        /// The state change is fully applied, and visible to readers, when this
        /// returns.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            self.send_and_inspect(action, |_| ()).await
        }

        /// Send an action and read the resulting state before the lock is released
        ///
        /// `inspect` runs under the same write lock as the reducer, so it sees
        /// exactly the state this action produced, never a later one.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip_all, name = "store_send")]
        pub async fn send_and_inspect<F, T>(&self, action: A, inspect: F) -> Result<T, StoreError>
        where
            F: FnOnce(&S) -> T,
        {
            let mut state = self.state.write().await;

            // Checked under the lock so nothing lands after shutdown returns
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!("Processing action");
            metrics::counter!("store.commands.total").increment(1);

            let before = state.version();

            let start = std::time::Instant::now();
            self.reducer.reduce(&mut *state, action, &*self.environment);
            metrics::histogram!("store.reducer.duration_seconds")
                .record(start.elapsed().as_secs_f64());

            let after = state.version();
            if after == before {
                tracing::trace!(version = %after, "State unchanged, nothing to publish");
            } else {
                tracing::trace!(%before, %after, "State changed, publishing snapshot");
                self.snapshots
                    .send_replace(Snapshot::new(after, (*state).clone()));
                // Note: Precision loss acceptable for a gauge (versions < 2^52)
                #[allow(clippy::cast_precision_loss)]
                metrics::gauge!("store.state.version").set(after.value() as f64);
            }

            Ok(inspect(&*state))
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let open = store.state(|s| s.items.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Latest published snapshot
        ///
        /// Does not touch the state lock; the snapshot is the one published by the
        /// most recent state-changing action.
        #[must_use]
        pub fn snapshot(&self) -> Snapshot<S> {
            self.snapshots.borrow().clone()
        }

        /// Current state version
        #[must_use]
        pub fn version(&self) -> Version {
            self.snapshots.borrow().version()
        }

        /// Subscribe to state changes
        ///
        /// The receiver starts at the current snapshot and is notified every time
        /// an action moves the state version. Actions that leave the state
        /// untouched (rejected commands, for instance) do not wake receivers.
        #[must_use]
        pub fn subscribe(&self) -> watch::Receiver<Snapshot<S>> {
            self.snapshots.subscribe()
        }

        /// Whether [`Store::shutdown`] has been called
        #[must_use]
        pub fn is_shut_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }

        /// Stop accepting actions
        ///
        /// Sets the shutdown flag, then waits for the action currently being
        /// reduced, if any. When this returns the published snapshot is final.
        pub async fn shutdown(&self) {
            tracing::info!("Initiating shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);

            self.shutdown.store(true, Ordering::Release);
            let state = self.state.write().await;

            tracing::info!(version = %state.version(), "Store shut down");
            metrics::counter!("store.shutdown.completed").increment(1);
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                shutdown: Arc::clone(&self.shutdown),
                snapshots: Arc::clone(&self.snapshots),
            }
        }
    }
}
