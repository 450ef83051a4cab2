//! Domain types for the todo list.
//!
//! A todo list is an ordered sequence of items; insertion order is display
//! order. Every item carries a stable [`TodoId`] handed out when it is created,
//! so commands can address an item independently of its current position.

use crate::error::TodoError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statekit_core::environment::{Clock, IdGenerator};
use statekit_core::state::Version;
use statekit_macros::{Action, State};

/// Texts of the sample items a fresh list starts with
pub const SEED_TEXTS: [&str; 3] = [
    "Learn about react",
    "Meet friend for lunch",
    "Build really cool todo app",
];

/// Stable identifier for a todo item
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TodoId(u64);

impl TodoId {
    /// Creates a `TodoId` from a raw value
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Takes the next id from a generator
    #[must_use]
    pub fn generate(ids: &dyn IdGenerator) -> Self {
        Self(ids.next_id())
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Stable identifier
    pub id: TodoId,
    /// Display text, fixed at creation
    pub text: String,
    /// Whether the item was marked complete
    pub is_completed: bool,
    /// When the item was added
    pub created_at: DateTime<Utc>,
    /// When the item was first completed
    pub completed_at: Option<DateTime<Utc>>,
}

impl TodoItem {
    /// Creates an open todo item
    #[must_use]
    pub const fn new(id: TodoId, text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            is_completed: false,
            created_at,
            completed_at: None,
        }
    }

    /// Marks the item completed; completing twice keeps the first timestamp
    pub fn complete(&mut self, completed_at: DateTime<Utc>) {
        if !self.is_completed {
            self.is_completed = true;
            self.completed_at = Some(completed_at);
        }
    }
}

/// How a command addresses an item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoRef {
    /// By stable id
    Id(TodoId),
    /// By current position in the list
    ///
    /// Positions shift when earlier items are removed; a position captured
    /// before such a removal may address a different item afterwards.
    Position(usize),
}

impl std::fmt::Display for TodoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Position(index) => write!(f, "position {index}"),
        }
    }
}

/// State of the todo list
#[derive(State, Clone, Debug, Default, Serialize, Deserialize)]
pub struct TodoState {
    /// Items in display order
    pub items: Vec<TodoItem>,
    /// Bumped on every applied change
    #[version]
    pub version: Version,
    /// Outcome of the most recent rejected command, cleared by the next command
    #[serde(skip)]
    pub last_error: Option<TodoError>,
    /// Id of the item appended by the most recent command, if it appended one
    #[serde(skip)]
    pub last_added: Option<TodoId>,
}

impl TodoState {
    /// Creates an empty list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the list with the three sample items, all open
    #[must_use]
    pub fn seeded(ids: &dyn IdGenerator, clock: &dyn Clock) -> Self {
        let now = clock.now();
        let items = SEED_TEXTS
            .iter()
            .map(|text| TodoItem::new(TodoId::generate(ids), (*text).to_string(), now))
            .collect();

        Self {
            items,
            ..Self::default()
        }
    }

    /// Returns the number of items
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of completed items
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|t| t.is_completed).count()
    }

    /// Returns an item by id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|t| t.id == id)
    }

    /// Current position of an item
    #[must_use]
    pub fn position(&self, id: TodoId) -> Option<usize> {
        self.items.iter().position(|t| t.id == id)
    }

    /// Resolves a reference to the id of the item it addresses right now
    ///
    /// # Errors
    ///
    /// [`TodoError::Index`] for an out-of-range position,
    /// [`TodoError::UnknownId`] for an id that is not in the list.
    pub fn resolve(&self, target: TodoRef) -> Result<TodoId, TodoError> {
        match target {
            TodoRef::Id(id) => self
                .get(id)
                .map(|t| t.id)
                .ok_or(TodoError::UnknownId(id)),
            TodoRef::Position(index) => self.items.get(index).map(|t| t.id).ok_or(
                TodoError::Index(crate::error::IndexError {
                    index,
                    len: self.items.len(),
                }),
            ),
        }
    }
}

/// Commands a caller can send to the todo list
///
/// Each command is validated against the current list. An accepted command
/// becomes a [`TodoEvent`] that the reducer applies; a rejected one leaves the
/// list and its version untouched.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    /// Command: Append a new item
    #[command]
    AddTodo {
        /// Text of the item
        text: String,
    },

    /// Command: Mark an item completed
    #[command]
    CompleteTodo {
        /// Item to complete
        target: TodoRef,
    },

    /// Command: Remove an item
    #[command]
    RemoveTodo {
        /// Item to remove
        target: TodoRef,
    },
}

/// Change the reducer applies for an accepted command
///
/// Only the reducer builds these, from a command it has already validated, so
/// every event refers to an id that exists (or, for `TodoAdded`, one that was
/// just generated) and carries non-blank text.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum TodoEvent {
    /// Event: Item was appended
    #[event]
    TodoAdded {
        /// New item's id
        id: TodoId,
        /// Text of the item
        text: String,
        /// When the item was added
        created_at: DateTime<Utc>,
    },

    /// Event: Item was completed
    #[event]
    TodoCompleted {
        /// Item id
        id: TodoId,
        /// When the item was completed
        completed_at: DateTime<Utc>,
    },

    /// Event: Item was removed
    #[event]
    TodoRemoved {
        /// Item id
        id: TodoId,
    },
}
