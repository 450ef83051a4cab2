//! Text rendering of the application state.

use crate::app::AppState;
use crate::profile::UserProfile;
use crate::theme::Theme;
use crate::types::TodoItem;
use crossterm::style::Stylize;
use statekit_core::state::Versioned;

const STRIKE: char = '\u{0336}';

/// Draws a snapshot as text
///
/// Rendering is a pure function of the snapshot; the renderer holds only
/// presentation settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Renderer {
    theme: Theme,
    color: bool,
}

impl Renderer {
    /// Renderer using `theme`, with terminal colours when `color` is set
    #[must_use]
    pub const fn new(theme: Theme, color: bool) -> Self {
        Self { theme, color }
    }

    /// Renders the todo list followed by the profile block
    #[must_use]
    pub fn render(&self, state: &AppState) -> String {
        let mut lines = Vec::with_capacity(state.todos.count() + 8);

        lines.push(format!(
            "Todos ({} of {} done, {})",
            state.todos.completed_count(),
            state.todos.count(),
            state.version()
        ));
        if state.todos.items.is_empty() {
            lines.push("  (nothing to do)".to_string());
        }
        for (position, item) in state.todos.items.iter().enumerate() {
            lines.push(row(position, item));
        }

        lines.push(String::new());
        lines.extend(profile_block(&state.profile.profile));

        lines.into_iter().map(|line| self.paint(line) + "\n").collect()
    }

    /// Applies the theme colours to one line
    ///
    /// crossterm leaves the escapes out on its own when `NO_COLOR` is set.
    fn paint(&self, line: String) -> String {
        if self.color {
            line.with(self.theme.foreground.into())
                .on(self.theme.background.into())
                .to_string()
        } else {
            line
        }
    }
}

fn row(position: usize, item: &TodoItem) -> String {
    if item.is_completed {
        format!("{position:>3}. [x] {} ({})", strike(&item.text), item.id)
    } else {
        format!("{position:>3}. [ ] {} ({})", item.text, item.id)
    }
}

fn profile_block(profile: &UserProfile) -> Vec<String> {
    vec![
        "Profile".to_string(),
        format!("  {}", profile.full_name),
        format!("  {}", profile.email),
        format!("  {}", profile.phone),
        format!("  {}", profile.claims.uid),
    ]
}

/// Strikes text through with combining overlay characters
fn strike(text: &str) -> String {
    text.chars().flat_map(|c| [c, STRIKE]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::initial_state;
    use crate::theme::ThemeKey;
    use statekit_core::environment::{Clock, SequentialIdGenerator};
    use statekit_testing::test_clock;

    fn plain() -> Renderer {
        Renderer::new(Theme::preset(ThemeKey::Light), false)
    }

    fn seeded() -> AppState {
        initial_state(true, &SequentialIdGenerator::new(), &test_clock())
    }

    #[test]
    fn renders_rows_in_order_with_ids() {
        let out = plain().render(&seeded());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Todos (0 of 3 done, v0)");
        assert_eq!(lines[1], "  0. [ ] Learn about react (#1)");
        assert_eq!(lines[2], "  1. [ ] Meet friend for lunch (#2)");
        assert_eq!(lines[3], "  2. [ ] Build really cool todo app (#3)");
        assert!(out.contains("Profile\n  Avery Example\n"));
    }

    #[test]
    fn completed_rows_are_struck_through() {
        let mut state = seeded();
        state.todos.items[0].complete(test_clock().now());

        let out = plain().render(&state);

        assert!(out.contains("  0. [x] L\u{336}e\u{336}a\u{336}r\u{336}n\u{336}"));
        assert!(out.contains("Todos (1 of 3 done"));
    }

    #[test]
    fn empty_list_says_so() {
        let state = initial_state(false, &SequentialIdGenerator::new(), &test_clock());
        assert!(plain().render(&state).contains("(nothing to do)"));
    }

    #[test]
    fn colored_lines_use_theme() {
        let state = seeded();
        let plain = plain().render(&state);
        let colored = Renderer::new(Theme::preset(ThemeKey::Dark), true).render(&state);

        assert_eq!(colored.lines().count(), plain.lines().count());
        for (painted, text) in colored.lines().zip(plain.lines()) {
            assert!(painted.contains(text));
            if std::env::var_os("NO_COLOR").is_none() {
                assert!(painted.contains("38;2;255;255;255"), "{painted:?}");
                assert!(painted.contains("48;2;34;34;34"), "{painted:?}");
            }
        }
    }

    #[test]
    fn plain_output_has_no_escapes() {
        let out = plain().render(&seeded());
        assert!(!out.contains('\x1b'));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn rendering_is_pure() {
        let state = seeded();
        assert_eq!(plain().render(&state), plain().render(&state));
    }
}
