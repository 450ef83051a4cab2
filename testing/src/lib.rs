//! # Statekit Testing
//!
//! Testing utilities and helpers for the Statekit architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then builder for reducers ([`ReducerTest`]) with version checks
//! - A recorder for the snapshots a store publishes
//!
//! ## Example
//!
//! ```ignore
//! use statekit_testing::{test_clock, SnapshotRecorder};
//! use statekit_runtime::Store;
//!
//! #[tokio::test]
//! async fn records_every_change() {
//!     let store = Store::new(TodoState::default(), TodoReducer::new(), test_env());
//!     let recorder = SnapshotRecorder::start(&store);
//!
//!     store.send(TodoAction::AddTodo { text: "Buy milk".into() }).await?;
//!
//!     let versions = recorder.versions_until(Version::new(1)).await;
//!     assert_eq!(versions.last(), Some(&Version::new(1)));
//! }
//! ```

use chrono::{DateTime, Utc};
use statekit_core::environment::Clock;


/// Recording of published snapshots
pub mod recorder;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use statekit_testing::mocks::FixedClock;
    /// use statekit_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use recorder::SnapshotRecorder;
pub use reducer_test::ReducerTest;
