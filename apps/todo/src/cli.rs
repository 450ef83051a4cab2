//! Line commands for the interactive binary.

use crate::error::TodoError;
use crate::form::TodoForm;
use crate::render::Renderer;
use crate::store::{App, ProfilePanel, TodoListStore, TodoSnapshot};
use crate::types::{TodoId, TodoRef};
use statekit_runtime::StoreError;
use std::str::FromStr;
use thiserror::Error;

/// Help text listing every command
pub const HELP: &str = "\
commands:
  add <text>          append an item
  complete <pos>|#id  mark an item completed
  remove <pos>|#id    delete an item
  list                show the list and the profile
  json                dump the list snapshot as JSON
  profile             swap in the other profile
  reset-profile       restore the initial profile
  help                show this text
  quit                exit";

/// A parsed input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `add <text>`
    Add(String),
    /// `complete <pos>` or `complete #<id>`
    Complete(TodoRef),
    /// `remove <pos>` or `remove #<id>`
    Remove(TodoRef),
    /// `list`
    List,
    /// `json`
    Json,
    /// `profile`
    ChangeProfile,
    /// `reset-profile`
    ResetProfile,
    /// `help`
    Help,
    /// `quit` or `exit`
    Quit,
}

/// Input line that is not a command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Blank line
    #[error("empty command")]
    Empty,
    /// First word is not a known command
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    /// Command needs an item position or id
    #[error("'{0}' needs a position or #id")]
    MissingTarget(&'static str),
    /// Position or id is not a non-negative integer
    #[error("'{0}' is not a position or #id")]
    InvalidTarget(String),
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match word.to_ascii_lowercase().as_str() {
            "" => Err(ParseError::Empty),
            // Text is kept as typed; the store decides whether it is blank
            "add" => Ok(Self::Add(rest.to_string())),
            "complete" | "done" => parse_target("complete", rest).map(Self::Complete),
            "remove" | "rm" => parse_target("remove", rest).map(Self::Remove),
            "list" | "ls" => Ok(Self::List),
            "json" => Ok(Self::Json),
            "profile" => Ok(Self::ChangeProfile),
            "reset-profile" => Ok(Self::ResetProfile),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

fn parse_target(command: &'static str, raw: &str) -> Result<TodoRef, ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ParseError::MissingTarget(command));
    }

    let invalid = || ParseError::InvalidTarget(raw.to_string());
    match raw.strip_prefix('#') {
        Some(id) => id
            .parse::<u64>()
            .map(|id| TodoRef::Id(TodoId::new(id)))
            .map_err(|_| invalid()),
        None => raw.parse::<usize>().map(TodoRef::Position).map_err(|_| invalid()),
    }
}

/// Failure while executing a command
#[derive(Error, Debug)]
pub enum CliError {
    /// The list rejected the command
    #[error(transparent)]
    Todo(#[from] TodoError),
    /// The store is not accepting commands
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Snapshot could not be serialized
    #[error("failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// What the loop should do next
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Print the reply and read the next line
    Reply(String),
    /// Stop reading input
    Quit,
}

/// Per-terminal command state
pub struct Session {
    app: App,
    todos: TodoListStore,
    profile: ProfilePanel,
    form: TodoForm,
    renderer: Renderer,
}

impl Session {
    /// Session over `app`, drawing with `renderer`
    #[must_use]
    pub fn new(app: App, renderer: Renderer) -> Self {
        let mut form = TodoForm::new();
        form.focus();

        Self {
            todos: app.todos(),
            profile: app.profile(),
            app,
            form,
            renderer,
        }
    }

    /// Current drawing of the whole application
    #[must_use]
    pub fn render(&self) -> String {
        self.renderer.render(&self.app.snapshot())
    }

    /// Runs one command
    ///
    /// # Errors
    ///
    /// Returns the rejection reported by the list, or [`CliError::Store`] once
    /// the application is stopping. Neither is fatal to the session.
    pub async fn execute(&mut self, command: Command) -> Result<Outcome, CliError> {
        let reply = match command {
            Command::Add(text) => {
                self.form.input(text);
                // Blank drafts stay in the form; send them anyway so the
                // rejection is reported and logged like any other.
                let text = self.form.submit().unwrap_or_else(|| self.form.take_draft());
                let id = self.todos.add(text).await?;
                format!("added {id}")
            },
            Command::Complete(target) => {
                match target {
                    TodoRef::Id(id) => self.todos.complete(id).await?,
                    TodoRef::Position(index) => self.todos.complete_at(index).await?,
                }
                format!("completed {target}")
            },
            Command::Remove(target) => {
                match target {
                    TodoRef::Id(id) => self.todos.remove(id).await?,
                    TodoRef::Position(index) => self.todos.remove_at(index).await?,
                }
                format!("removed {target}")
            },
            Command::List => self.render(),
            Command::Json => serde_json::to_string_pretty(&self.todos.snapshot())?,
            Command::ChangeProfile => format!("profile: {}", self.profile.change().await?),
            Command::ResetProfile => format!("profile: {}", self.profile.reset().await?),
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };

        Ok(Outcome::Reply(reply))
    }

    /// The list as of the last applied change
    #[must_use]
    pub fn snapshot(&self) -> TodoSnapshot {
        self.todos.snapshot()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)] // Test code can use unwrap and panic
mod tests {
    use super::*;
    use crate::app::{AppEnvironment, initial_state};
    use crate::error::{IndexError, ValidationError};
    use crate::profile::{ProfileEnvironment, UserProfile};
    use crate::reducer::TodoEnvironment;
    use crate::theme::{Theme, ThemeKey};
    use statekit_core::environment::SequentialIdGenerator;
    use statekit_testing::test_clock;
    use std::sync::Arc;

    fn session() -> Session {
        let ids = Arc::new(SequentialIdGenerator::new());
        let clock = Arc::new(test_clock());
        let state = initial_state(true, ids.as_ref(), clock.as_ref());
        let app = App::with_environment(
            state,
            AppEnvironment {
                todo: TodoEnvironment::new(clock, ids),
                profile: ProfileEnvironment::default(),
            },
        );
        Session::new(app, Renderer::new(Theme::preset(ThemeKey::Light), false))
    }

    #[test]
    fn parses_commands() {
        assert_eq!(
            "add  Buy milk".parse(),
            Ok(Command::Add(" Buy milk".to_string()))
        );
        assert_eq!(
            "complete 0".parse(),
            Ok(Command::Complete(TodoRef::Position(0)))
        );
        assert_eq!(
            "remove #12".parse(),
            Ok(Command::Remove(TodoRef::Id(TodoId::new(12))))
        );
        assert_eq!("LIST".parse(), Ok(Command::List));
        assert_eq!("reset-profile".parse(), Ok(Command::ResetProfile));
        assert_eq!("exit".parse(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!("   ".parse::<Command>(), Err(ParseError::Empty));
        assert_eq!(
            "fly".parse::<Command>(),
            Err(ParseError::Unknown("fly".to_string()))
        );
        assert_eq!(
            "remove".parse::<Command>(),
            Err(ParseError::MissingTarget("remove"))
        );
        assert_eq!(
            "complete -1".parse::<Command>(),
            Err(ParseError::InvalidTarget("-1".to_string()))
        );
        assert_eq!(
            "complete #x".parse::<Command>(),
            Err(ParseError::InvalidTarget("#x".to_string()))
        );
    }

    #[tokio::test]
    async fn add_then_complete_by_id() {
        let mut session = session();

        let reply = session.execute(Command::Add("Buy milk".into())).await.unwrap();
        assert_eq!(reply, Outcome::Reply("added #4".to_string()));

        session
            .execute(Command::Complete(TodoRef::Id(TodoId::new(4))))
            .await
            .unwrap();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.len(), 4);
        assert!(snapshot.items[3].is_completed);
    }

    #[tokio::test]
    async fn blank_add_reports_validation_error() {
        let mut session = session();

        let err = session.execute(Command::Add("  ".into())).await.unwrap_err();

        assert!(matches!(
            err,
            CliError::Todo(TodoError::Validation(ValidationError::EmptyText))
        ));
        assert_eq!(session.snapshot().len(), 3);
    }

    #[tokio::test]
    async fn out_of_range_remove_is_not_fatal() {
        let mut session = session();

        let err = session
            .execute(Command::Remove(TodoRef::Position(5)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Todo(TodoError::Index(IndexError { index: 5, len: 3 }))
        ));

        let reply = session.execute(Command::List).await.unwrap();
        assert!(matches!(reply, Outcome::Reply(text) if text.contains("Learn about react")));
    }

    #[tokio::test]
    async fn json_dumps_snapshot() {
        let mut session = session();

        let Outcome::Reply(json) = session.execute(Command::Json).await.unwrap() else {
            panic!("expected a reply");
        };
        let decoded: TodoSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, session.snapshot());
    }

    #[tokio::test]
    async fn profile_commands_swap_record() {
        let mut session = session();

        let reply = session.execute(Command::ChangeProfile).await.unwrap();
        assert_eq!(
            reply,
            Outcome::Reply(format!("profile: {}", UserProfile::replacement()))
        );

        session.execute(Command::ResetProfile).await.unwrap();
        assert!(session.render().contains("Avery Example"));
    }

    #[tokio::test]
    async fn quit_stops_the_loop() {
        let mut session = session();
        assert_eq!(session.execute(Command::Quit).await.unwrap(), Outcome::Quit);
    }
}
