//! Caller-facing handles over the application store.
//!
//! [`App`] owns the single store. [`TodoListStore`] and [`ProfilePanel`] are
//! cheap clones that talk to it; every call returns after its change has been
//! applied, so the next `snapshot()` already reflects it.

use crate::app::{AppAction, AppEnvironment, AppState, AppStore, app_reducer, initial_state};
use crate::config::AppConfig;
use crate::error::{TodoError, ValidationError};
use crate::profile::{ProfileAction, ProfileEnvironment, UserProfile};
use crate::reducer::TodoEnvironment;
use crate::types::{TodoAction, TodoId, TodoItem, TodoRef};
use serde::{Deserialize, Serialize};
use statekit_core::environment::{SequentialIdGenerator, SystemClock};
use statekit_core::state::Version;
use statekit_runtime::{Snapshot, Store, StoreError};
use std::sync::Arc;
use tokio::sync::watch;

/// Read-only copy of the todo list at one version
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoSnapshot {
    /// Version of the list this copy was taken at
    pub version: Version,
    /// Items in display order
    pub items: Vec<TodoItem>,
}

impl TodoSnapshot {
    /// Copies the list out of an application snapshot
    #[must_use]
    pub fn of(state: &AppState) -> Self {
        Self {
            version: state.todos.version,
            items: state.todos.items.clone(),
        }
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item texts in display order
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(|t| t.text.as_str()).collect()
    }
}

/// The running application
#[derive(Clone)]
pub struct App {
    store: AppStore,
}

impl App {
    /// Builds the application from configuration, with the system clock
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        let clock = Arc::new(SystemClock);
        let ids = Arc::new(SequentialIdGenerator::new());
        let state = initial_state(config.seed, ids.as_ref(), clock.as_ref());

        let environment = AppEnvironment {
            todo: TodoEnvironment::new(clock, ids),
            profile: ProfileEnvironment::default(),
        };

        Self::with_environment(state, environment)
    }

    /// Builds the application from explicit state and dependencies
    #[must_use]
    pub fn with_environment(state: AppState, environment: AppEnvironment) -> Self {
        tracing::info!(
            items = state.todos.count(),
            profile = %state.profile.profile.full_name,
            "Starting todo application"
        );

        Self {
            store: Store::new(state, app_reducer(), environment),
        }
    }

    /// Handle for the todo list
    #[must_use]
    pub fn todos(&self) -> TodoListStore {
        TodoListStore {
            store: self.store.clone(),
        }
    }

    /// Handle for the profile panel
    #[must_use]
    pub fn profile(&self) -> ProfilePanel {
        ProfilePanel {
            store: self.store.clone(),
        }
    }

    /// Latest published application snapshot
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<AppState> {
        self.store.snapshot()
    }

    /// Receives every snapshot published after this call
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<AppState>> {
        self.store.subscribe()
    }

    /// Stops accepting commands
    ///
    /// Returns once a command already being applied has finished; every
    /// later call on any handle fails with [`StoreError::ShutdownInProgress`].
    pub async fn shutdown(&self) {
        self.store.shutdown().await;
    }
}

/// Ordered todo list with add/complete/remove
#[derive(Clone)]
pub struct TodoListStore {
    store: AppStore,
}

impl TodoListStore {
    /// Appends an open item with `text`
    ///
    /// # Errors
    ///
    /// [`TodoError::Validation`] if `text` is empty or whitespace; the list is
    /// left unchanged.
    pub async fn add(&self, text: impl Into<String>) -> Result<TodoId, TodoError> {
        let added = self
            .dispatch(TodoAction::AddTodo { text: text.into() })
            .await?;

        // An accepted add always records the new id
        added.ok_or(TodoError::Validation(ValidationError::EmptyText))
    }

    /// Marks the item with `id` completed; repeating is a no-op success
    ///
    /// # Errors
    ///
    /// [`TodoError::UnknownId`] if no item has this id.
    pub async fn complete(&self, id: TodoId) -> Result<(), TodoError> {
        self.dispatch(TodoAction::CompleteTodo {
            target: TodoRef::Id(id),
        })
        .await
        .map(drop)
    }

    /// Removes the item with `id`
    ///
    /// # Errors
    ///
    /// [`TodoError::UnknownId`] if no item has this id.
    pub async fn remove(&self, id: TodoId) -> Result<(), TodoError> {
        self.dispatch(TodoAction::RemoveTodo {
            target: TodoRef::Id(id),
        })
        .await
        .map(drop)
    }

    /// Marks the item currently at `index` completed
    ///
    /// # Errors
    ///
    /// [`TodoError::Index`] if `index` is not below the current length.
    pub async fn complete_at(&self, index: usize) -> Result<(), TodoError> {
        self.dispatch(TodoAction::CompleteTodo {
            target: TodoRef::Position(index),
        })
        .await
        .map(drop)
    }

    /// Removes the item currently at `index`; later items shift down by one
    ///
    /// # Errors
    ///
    /// [`TodoError::Index`] if `index` is not below the current length.
    pub async fn remove_at(&self, index: usize) -> Result<(), TodoError> {
        self.dispatch(TodoAction::RemoveTodo {
            target: TodoRef::Position(index),
        })
        .await
        .map(drop)
    }

    /// Copy of the list as of the last applied change
    #[must_use]
    pub fn snapshot(&self) -> TodoSnapshot {
        TodoSnapshot::of(&self.store.snapshot())
    }

    /// Receives every snapshot published after this call
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<AppState>> {
        self.store.subscribe()
    }

    /// Sends a command and reads its outcome under the same lock
    async fn dispatch(&self, action: TodoAction) -> Result<Option<TodoId>, TodoError> {
        self.store
            .send_and_inspect(AppAction::Todo(action), |state| {
                match &state.todos.last_error {
                    Some(error) => Err(error.clone()),
                    None => Ok(state.todos.last_added),
                }
            })
            .await?
    }
}

/// The user profile panel
#[derive(Clone)]
pub struct ProfilePanel {
    store: AppStore,
}

impl ProfilePanel {
    /// Swaps in the replacement profile and returns it
    ///
    /// # Errors
    ///
    /// [`StoreError::ShutdownInProgress`] once the application is stopping.
    pub async fn change(&self) -> Result<UserProfile, StoreError> {
        self.dispatch(ProfileAction::ChangeProfile).await
    }

    /// Restores the initial profile and returns it
    ///
    /// # Errors
    ///
    /// [`StoreError::ShutdownInProgress`] once the application is stopping.
    pub async fn reset(&self) -> Result<UserProfile, StoreError> {
        self.dispatch(ProfileAction::ResetProfile).await
    }

    /// Profile currently shown
    #[must_use]
    pub fn current(&self) -> UserProfile {
        self.store.snapshot().profile.profile.clone()
    }

    async fn dispatch(&self, action: ProfileAction) -> Result<UserProfile, StoreError> {
        self.store
            .send_and_inspect(AppAction::Profile(action), |state| {
                state.profile.profile.clone()
            })
            .await
    }
}
