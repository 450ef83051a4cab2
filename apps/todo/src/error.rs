//! Error types for the todo application.

use crate::types::TodoId;
use serde::{Deserialize, Serialize};
use statekit_runtime::StoreError;
use thiserror::Error;

/// Input to `add` was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    /// The text was empty or only whitespace
    #[error("todo text cannot be empty")]
    EmptyText,
}

/// A position did not address an item of the list
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[error("position {index} is out of range for a list of {len} items")]
pub struct IndexError {
    /// The requested position
    pub index: usize,
    /// List length at the time of the request
    pub len: usize,
}

/// Errors reported by the todo list
///
/// Every variant is local and recoverable: the list is never partially
/// modified when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// `add` received empty input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// `complete_at`/`remove_at` received an out-of-range position
    #[error(transparent)]
    Index(#[from] IndexError),

    /// `complete`/`remove` received an id that is not (or no longer) in the list
    #[error("no todo with id {0}")]
    UnknownId(TodoId),

    /// The store refused the command
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised while reading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Theme key other than `light` or `dark`
    #[error("unknown theme '{0}' (expected 'light' or 'dark')")]
    UnknownTheme(String),
}
