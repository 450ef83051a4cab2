//! Configuration management for the todo application.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Values that fail to parse fall back to the default and are logged.

use crate::theme::ThemeKey;
use std::env;

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "todo_app=info,statekit_runtime=info";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Colour preset for the renderer (`TODO_THEME`, default `light`)
    pub theme: ThemeKey,
    /// Start with the three sample items (`TODO_SEED`, default `true`)
    pub seed: bool,
    /// Emit terminal colours (off when `NO_COLOR` is set)
    pub color: bool,
    /// Tracing filter directives (`RUST_LOG`)
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: ThemeKey::default(),
            seed: true,
            color: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let theme = lookup("TODO_THEME").map_or(defaults.theme, |raw| {
            raw.parse().unwrap_or_else(|error| {
                tracing::warn!(%error, fallback = %defaults.theme, "Invalid TODO_THEME");
                defaults.theme
            })
        });

        let seed = lookup("TODO_SEED").map_or(defaults.seed, |raw| {
            parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, fallback = defaults.seed, "Invalid TODO_SEED");
                defaults.seed
            })
        });

        let color = lookup("NO_COLOR").is_none_or(|raw| raw.is_empty());

        let log_filter = lookup("RUST_LOG")
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        Self {
            theme,
            seed,
            color,
            log_filter,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])), AppConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TODO_THEME", "dark"),
            ("TODO_SEED", "false"),
            ("NO_COLOR", "1"),
            ("RUST_LOG", "debug"),
        ]));

        assert_eq!(config.theme, ThemeKey::Dark);
        assert!(!config.seed);
        assert!(!config.color);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TODO_THEME", "neon"),
            ("TODO_SEED", "maybe"),
            ("NO_COLOR", ""),
            ("RUST_LOG", "  "),
        ]));

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn flags_accept_common_spellings() {
        assert_eq!(parse_flag("YES"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("2"), None);
    }
}
