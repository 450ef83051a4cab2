//! Reducer composition utilities
//!
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Embed a feature reducer into a larger application
//!   state, action and environment
//!
//! # Examples
//!
//! ## Combining Reducers
//!
//! ```
//! use statekit_core::Reducer;
//! use statekit_core::composition::combine_reducers;
//!
//! #[derive(Clone, Default)]
//! struct AppState {
//!     counter: i32,
//!     logged: bool,
//! }
//!
//! #[derive(Clone)]
//! enum AppAction {
//!     Increment,
//!     Log,
//! }
//!
//! struct CounterReducer;
//! struct LoggingReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = AppState;
//!     type Action = AppAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut AppState, action: AppAction, _env: &()) {
//!         if matches!(action, AppAction::Increment) {
//!             state.counter += 1;
//!         }
//!     }
//! }
//!
//! impl Reducer for LoggingReducer {
//!     type State = AppState;
//!     type Action = AppAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut AppState, action: AppAction, _env: &()) {
//!         if matches!(action, AppAction::Log) {
//!             state.logged = true;
//!         }
//!     }
//! }
//!
//! let combined = combine_reducers(vec![Box::new(CounterReducer), Box::new(LoggingReducer)]);
//!
//! let mut state = AppState::default();
//! combined.reduce(&mut state, AppAction::Increment, &());
//! assert_eq!(state.counter, 1);
//! assert!(!state.logged);
//! ```

use crate::reducer::Reducer;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer sees every action, in the order given.
#[must_use]
pub fn combine_reducers<S, A, E>(
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(&self, state: &mut Self::State, action: Self::Action, env: &Self::Environment) {
        for reducer in &self.reducers {
            reducer.reduce(state, action.clone(), env);
        }
    }
}

/// Projections that connect a child feature to its parent.
///
/// Every projection is a plain function pointer, so scoped reducers stay
/// `Send + Sync` without boxing.
pub struct Scope<S, SubS, A, SubA, E, SubE> {
    /// Borrow the child state out of the parent state
    pub state: fn(&mut S) -> &mut SubS,
    /// Extract a child action; `None` means the action is not for this child
    pub extract: fn(A) -> Option<SubA>,
    /// Borrow the child environment out of the parent environment
    pub environment: fn(&E) -> &SubE,
}

/// Scopes a reducer to operate on a slice of a larger state.
///
/// Parent actions the child does not recognise are ignored.
///
/// # Examples
///
/// ```
/// use statekit_core::Reducer;
/// use statekit_core::composition::{scope_reducer, Scope};
///
/// #[derive(Clone, Default)]
/// struct CounterState {
///     count: i32,
/// }
///
/// #[derive(Clone, Debug)]
/// enum CounterAction {
///     Increment,
/// }
///
/// struct CounterReducer;
///
/// impl Reducer for CounterReducer {
///     type State = CounterState;
///     type Action = CounterAction;
///     type Environment = ();
///
///     fn reduce(&self, state: &mut CounterState, _action: CounterAction, _env: &()) {
///         state.count += 1;
///     }
/// }
///
/// #[derive(Default)]
/// struct AppState {
///     counter: CounterState,
/// }
///
/// #[derive(Clone, Debug)]
/// enum AppAction {
///     Counter(CounterAction),
///     Other,
/// }
///
/// let scoped = scope_reducer(
///     CounterReducer,
///     Scope {
///         state: |s: &mut AppState| &mut s.counter,
///         extract: |a| match a {
///             AppAction::Counter(a) => Some(a),
///             AppAction::Other => None,
///         },
///         environment: |e: &()| e,
///     },
/// );
///
/// let mut state = AppState::default();
/// scoped.reduce(&mut state, AppAction::Counter(CounterAction::Increment), &());
/// scoped.reduce(&mut state, AppAction::Other, &());
/// assert_eq!(state.counter.count, 1);
/// ```
pub const fn scope_reducer<S, SubS, A, SubA, E, SubE, R>(
    reducer: R,
    scope: Scope<S, SubS, A, SubA, E, SubE>,
) -> ScopedReducer<S, SubS, A, SubA, E, SubE, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = SubE>,
{
    ScopedReducer { reducer, scope }
}

/// A scoped reducer that operates on a slice of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, SubA, E, SubE, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = SubE>,
{
    reducer: R,
    scope: Scope<S, SubS, A, SubA, E, SubE>,
}

impl<S, SubS, A, SubA, E, SubE, R> Reducer for ScopedReducer<S, SubS, A, SubA, E, SubE, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = SubE>,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(&self, state: &mut Self::State, action: Self::Action, env: &Self::Environment) {
        if let Some(child_action) = (self.scope.extract)(action) {
            let child_state = (self.scope.state)(state);
            let child_env = (self.scope.environment)(env);
            self.reducer.reduce(child_state, child_action, child_env);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default)]
    struct NameState {
        name: String,
    }

    #[derive(Clone, Debug, Default)]
    struct ParentState {
        hits: u32,
        child: NameState,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum NameAction {
        Rename(String),
    }

    #[derive(Clone, Debug, PartialEq)]
    enum ParentAction {
        Hit,
        Name(NameAction),
    }

    struct NameReducer;

    impl Reducer for NameReducer {
        type State = NameState;
        type Action = NameAction;
        type Environment = String;

        fn reduce(&self, state: &mut NameState, action: NameAction, suffix: &String) {
            match action {
                NameAction::Rename(name) => state.name = format!("{name}{suffix}"),
            }
        }
    }

    struct HitReducer;

    impl Reducer for HitReducer {
        type State = ParentState;
        type Action = ParentAction;
        type Environment = (String,);

        fn reduce(&self, state: &mut ParentState, action: ParentAction, _env: &(String,)) {
            if action == ParentAction::Hit {
                state.hits += 1;
            }
        }
    }

    fn name_scope() -> Scope<ParentState, NameState, ParentAction, NameAction, (String,), String> {
        Scope {
            state: |s| &mut s.child,
            extract: |a| match a {
                ParentAction::Name(a) => Some(a),
                ParentAction::Hit => None,
            },
            environment: |e| &e.0,
        }
    }

    fn env() -> (String,) {
        ("!".to_string(),)
    }

    #[test]
    fn scoped_reducer_ignores_foreign_actions() {
        let scoped = scope_reducer(NameReducer, name_scope());
        let mut state = ParentState::default();

        scoped.reduce(&mut state, ParentAction::Hit, &env());

        assert!(state.child.name.is_empty());
        assert_eq!(state.hits, 0);
    }

    #[test]
    fn scoped_reducer_sees_child_environment() {
        let scoped = scope_reducer(NameReducer, name_scope());
        let mut state = ParentState::default();

        scoped.reduce(
            &mut state,
            ParentAction::Name(NameAction::Rename("ada".into())),
            &env(),
        );

        assert_eq!(state.child.name, "ada!");
    }

    #[test]
    fn combined_reducers_all_see_the_action() {
        let combined = combine_reducers(vec![
            Box::new(HitReducer),
            Box::new(scope_reducer(NameReducer, name_scope())),
        ]);
        let mut state = ParentState::default();

        combined.reduce(&mut state, ParentAction::Hit, &env());
        combined.reduce(
            &mut state,
            ParentAction::Name(NameAction::Rename("grace".into())),
            &env(),
        );

        assert_eq!(state.hits, 1);
        assert_eq!(state.child.name, "grace!");
    }
}
