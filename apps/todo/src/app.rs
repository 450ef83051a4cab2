//! Composition root: the todo list and the profile panel behind one store.

use crate::profile::{ProfileAction, ProfileEnvironment, ProfileReducer, ProfileState};
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{TodoAction, TodoState};
use serde::{Deserialize, Serialize};
use statekit_core::{
    composition::{CombinedReducer, Scope, combine_reducers, scope_reducer},
    environment::{Clock, IdGenerator},
    reducer::Reducer,
    state::{Version, Versioned},
};
use statekit_runtime::Store;

/// Everything the application shows
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppState {
    /// The todo list
    pub todos: TodoState,
    /// The profile panel
    pub profile: ProfileState,
}

impl Versioned for AppState {
    /// Sum of the parts' versions; any applied change to either part raises it
    fn version(&self) -> Version {
        Version::new(
            self.todos
                .version
                .value()
                .saturating_add(self.profile.version.value()),
        )
    }
}

/// Actions for the whole application
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppAction {
    /// Todo list action
    Todo(TodoAction),
    /// Profile panel action
    Profile(ProfileAction),
}

/// Dependencies for the whole application
#[derive(Clone)]
pub struct AppEnvironment {
    /// Todo list dependencies
    pub todo: TodoEnvironment,
    /// Profile panel dependencies
    pub profile: ProfileEnvironment,
}

/// Reducer for [`AppState`]
pub type AppReducer = CombinedReducer<AppState, AppAction, AppEnvironment>;

/// Store holding the whole application
pub type AppStore = Store<AppState, AppAction, AppEnvironment, AppReducer>;

/// Builds the application reducer from the feature reducers
#[must_use]
pub fn app_reducer() -> AppReducer {
    let todos = scope_reducer(
        TodoReducer::new(),
        Scope {
            state: |s: &mut AppState| &mut s.todos,
            extract: |a| match a {
                AppAction::Todo(a) => Some(a),
                AppAction::Profile(_) => None,
            },
            environment: |e: &AppEnvironment| &e.todo,
        },
    );

    let profile = scope_reducer(
        ProfileReducer::new(),
        Scope {
            state: |s: &mut AppState| &mut s.profile,
            extract: |a| match a {
                AppAction::Profile(a) => Some(a),
                AppAction::Todo(_) => None,
            },
            environment: |e: &AppEnvironment| &e.profile,
        },
    );

    let reducers: Vec<
        Box<dyn Reducer<State = AppState, Action = AppAction, Environment = AppEnvironment> + Send + Sync>,
    > = vec![Box::new(todos), Box::new(profile)];

    combine_reducers(reducers)
}

/// Initial application state
///
/// With `seed` the list starts with the three sample items; their ids are
/// taken from `ids`, so later items continue the same sequence.
#[must_use]
pub fn initial_state(seed: bool, ids: &dyn IdGenerator, clock: &dyn Clock) -> AppState {
    let todos = if seed {
        TodoState::seeded(ids, clock)
    } else {
        TodoState::new()
    };

    AppState {
        todos,
        profile: ProfileState::default(),
    }
}
