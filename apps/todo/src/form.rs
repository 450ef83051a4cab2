//! Draft buffer for the "add todo" input.

/// Text input that collects a new item's text
///
/// The form never touches the list; the caller passes what `submit` returns
/// to [`TodoListStore::add`](crate::store::TodoListStore::add).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoForm {
    draft: String,
    focused: bool,
}

impl TodoForm {
    /// Empty, unfocused form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives the input keyboard focus
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Whether the input has focus
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Replaces the draft with what the user typed
    pub fn input(&mut self, value: impl Into<String>) {
        self.draft = value.into();
    }

    /// Current draft
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Takes the draft for submission
    ///
    /// A blank draft submits nothing and is kept as typed. Otherwise the
    /// draft is returned unchanged and the input is cleared.
    pub fn submit(&mut self) -> Option<String> {
        if self.draft.trim().is_empty() {
            return None;
        }
        Some(self.take_draft())
    }

    /// Clears the input, returning whatever was in it
    pub fn take_draft(&mut self) -> String {
        std::mem::take(&mut self.draft)
    }
}
