//! A todo list and a user profile panel on top of the Statekit store.
//!
//! The list is an ordered sequence of items addressed either by their current
//! position or by a stable [`TodoId`] handed out at creation. Every change is
//! applied before the call returns and publishes a new version-stamped
//! snapshot to subscribers, which is what the renderer redraws from.
//!
//! - Domain types, commands and the events they turn into (`#[derive(Action)]`,
//!   `#[derive(State)]`)
//! - Reducers for the list and the profile, composed with `scope_reducer`
//! - [`TodoListStore`] / [`ProfilePanel`] handles with synchronous visibility
//! - Theme presets, a pure renderer and a line-command session
//!
//! # Quick Start
//!
//! ```no_run
//! use todo_app::{App, AppConfig};
//!
//! # async fn example() -> Result<(), todo_app::TodoError> {
//! let app = App::new(&AppConfig::default());
//! let todos = app.todos();
//!
//! let id = todos.add("Buy milk").await?;
//! todos.complete(id).await?;
//! todos.remove_at(0).await?;
//!
//! let snapshot = todos.snapshot();
//! println!("{} items at {}", snapshot.len(), snapshot.version);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod profile;
pub mod reducer;
pub mod render;
pub mod store;
pub mod theme;
pub mod types;

// Re-export commonly used types
pub use app::{AppAction, AppEnvironment, AppState, AppStore, app_reducer, initial_state};
pub use config::AppConfig;
pub use error::{ConfigError, IndexError, TodoError, ValidationError};
pub use profile::{ProfileAction, ProfileEnvironment, ProfileReducer, ProfileState, UserProfile};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use render::Renderer;
pub use store::{App, ProfilePanel, TodoListStore, TodoSnapshot};
pub use theme::{Theme, ThemeKey};
pub use types::{TodoAction, TodoEvent, TodoId, TodoItem, TodoRef, TodoState};
