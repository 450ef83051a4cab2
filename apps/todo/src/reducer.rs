//! Reducer logic for the todo list.
//!
//! Commands are validated against the current list and turned into a
//! [`TodoEvent`], which is then applied. A rejected command leaves the list
//! untouched and records the error in `last_error`; it does not advance the
//! version.

use crate::error::{TodoError, ValidationError};
use crate::types::{TodoAction, TodoEvent, TodoId, TodoItem, TodoRef, TodoState};
use statekit_core::{
    environment::{Clock, IdGenerator},
    reducer::Reducer,
};
use std::sync::Arc;

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for generating timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of ids for new items
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn validate_add(text: &str) -> Result<(), TodoError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText.into());
        }
        Ok(())
    }

    /// Returns `None` when the item is already completed
    fn validate_complete(state: &TodoState, target: TodoRef) -> Result<Option<TodoId>, TodoError> {
        let id = state.resolve(target)?;
        Ok(state.get(id).filter(|t| !t.is_completed).map(|t| t.id))
    }

    fn validate_remove(state: &TodoState, target: TodoRef) -> Result<TodoId, TodoError> {
        state.resolve(target)
    }

    /// Turns a command into the event it stands for, or the reason it cannot
    /// be applied. `Ok(None)` means the command is accepted but changes nothing.
    fn decide(
        state: &TodoState,
        action: TodoAction,
        env: &TodoEnvironment,
    ) -> Result<Option<TodoEvent>, TodoError> {
        match action {
            TodoAction::AddTodo { text } => {
                Self::validate_add(&text)?;
                Ok(Some(TodoEvent::TodoAdded {
                    id: TodoId::generate(env.ids.as_ref()),
                    text,
                    created_at: env.clock.now(),
                }))
            },
            TodoAction::CompleteTodo { target } => {
                let Some(id) = Self::validate_complete(state, target)? else {
                    tracing::debug!(%target, "Todo already completed");
                    return Ok(None);
                };
                Ok(Some(TodoEvent::TodoCompleted {
                    id,
                    completed_at: env.clock.now(),
                }))
            },
            TodoAction::RemoveTodo { target } => {
                let id = Self::validate_remove(state, target)?;
                Ok(Some(TodoEvent::TodoRemoved { id }))
            },
        }
    }

    /// Applies a validated event to state
    fn apply_event(state: &mut TodoState, event: TodoEvent) {
        tracing::debug!(event = event.event_type(), "Applying event");

        match event {
            TodoEvent::TodoAdded {
                id,
                text,
                created_at,
            } => {
                state.items.push(TodoItem::new(id, text, created_at));
                state.last_added = Some(id);
            },
            TodoEvent::TodoCompleted { id, completed_at } => {
                if let Some(item) = state.items.iter_mut().find(|t| t.id == id) {
                    item.complete(completed_at);
                }
            },
            TodoEvent::TodoRemoved { id } => {
                if let Some(index) = state.position(id) {
                    state.items.remove(index);
                }
            },
        }

        state.bump_version();
    }
}

impl Default for TodoReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(&self, state: &mut Self::State, action: Self::Action, env: &Self::Environment) {
        let command = action.name();
        state.last_error = None;
        state.last_added = None;

        match Self::decide(state, action, env) {
            Ok(Some(event)) => Self::apply_event(state, event),
            Ok(None) => {},
            Err(error) => {
                tracing::warn!(command, %error, "Todo command rejected");
                state.last_error = Some(error);
            },
        }
    }
}
