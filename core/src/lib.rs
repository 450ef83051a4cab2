//! # Statekit Core
//!
//! Core traits and types for the Statekit architecture.
//!
//! This crate provides the fundamental abstractions for building small,
//! observable state containers using the Reducer pattern.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature, stamped with a [`state::Version`]
//! - **Action**: All possible inputs to a reducer
//! - **Reducer**: Synchronous function `(State, Action, Environment) → State`
//! - **Environment**: Injected dependencies via traits
//!
//! A reducer that changes anything bumps the state's version; a reducer that
//! rejects an action leaves the version where it was. The runtime relies on
//! that to decide when observers must be told.
//!
//! ## Example
//!
//! ```
//! use statekit_core::Reducer;
//! use statekit_core::state::{Version, Versioned};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//!     version: Version,
//! }
//!
//! impl Versioned for CounterState {
//!     fn version(&self) -> Version {
//!         self.version
//!     }
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut CounterState, action: CounterAction, _env: &()) {
//!         match action {
//!             CounterAction::Increment => {
//!                 state.count += 1;
//!                 state.version = state.version.next();
//!             },
//!         }
//!     }
//! }
//!
//! let mut state = CounterState::default();
//! CounterReducer.reduce(&mut state, CounterAction::Increment, &());
//! assert_eq!(state.count, 1);
//! assert_eq!(state.version(), Version::new(1));
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};

pub use reducer::Reducer;

/// Reducer composition (`combine_reducers`, `scope_reducer`)
pub mod composition;

/// Reducer module - The core trait for business logic
pub mod reducer {
    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for TodoReducer {
    ///     type State = TodoState;
    ///     type Action = TodoAction;
    ///     type Environment = TodoEnvironment;
    ///
    ///     fn reduce(&self, state: &mut TodoState, action: TodoAction, env: &TodoEnvironment) {
    ///         match action {
    ///             TodoAction::AddTodo { text } => { /* validate, then append */ },
    ///             _ => {},
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Apply an action to the state in place
        ///
        /// 1. Validates the action against the current state
        /// 2. Either applies it and bumps the version, or records the
        ///    rejection and leaves the version alone
        ///
        /// Runs to completion before returning; there is no deferred work.
        fn reduce(&self, state: &mut Self::State, action: Self::Action, env: &Self::Environment);
    }
}

/// State module - version stamping for observable state
///
/// Every applied change bumps the state's [`Version`](state::Version). The
/// runtime compares versions before and after a reducer run to decide whether
/// a new snapshot must be published to subscribers.
pub mod state {
    use serde::{Deserialize, Serialize};

    /// Monotonic version stamp of a state value
    #[derive(
        Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    )]
    pub struct Version(u64);

    impl Version {
        /// Creates a version from a raw counter value
        #[must_use]
        pub const fn new(value: u64) -> Self {
            Self(value)
        }

        /// Returns the raw counter value
        #[must_use]
        pub const fn value(self) -> u64 {
            self.0
        }

        /// Returns the version that follows this one
        #[must_use]
        pub const fn next(self) -> Self {
            Self(self.0.saturating_add(1))
        }
    }

    impl std::fmt::Display for Version {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "v{}", self.0)
        }
    }

    /// State that carries a version stamp
    ///
    /// Usually implemented with `#[derive(State)]` and a `#[version]` field,
    /// which also generates an inherent `bump_version()`. Composite states
    /// can derive their version from their parts, as long as it never
    /// decreases.
    pub trait Versioned {
        /// Current version
        fn version(&self) -> Version;
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Id generator trait - hands out identifiers for new entities
    pub trait IdGenerator: Send + Sync {
        /// Returns the next identifier; never repeats within one generator
        fn next_id(&self) -> u64;
    }

    /// Monotonic counter starting at a configurable value
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Creates a generator whose first id is `1`
        #[must_use]
        pub const fn new() -> Self {
            Self::starting_at(1)
        }

        /// Creates a generator whose first id is `first`
        #[must_use]
        pub const fn starting_at(first: u64) -> Self {
            Self {
                next: AtomicU64::new(first),
            }
        }
    }

    impl Default for SequentialIdGenerator {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> u64 {
            self.next.fetch_add(1, Ordering::Relaxed)
        }
    }
}
