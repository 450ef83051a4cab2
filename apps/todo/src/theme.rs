//! The two colour presets.

use crate::error::ConfigError;
use crossterm::style::Color;
use std::str::FromStr;

/// Selects a preset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemeKey {
    /// Dark text on a light background
    #[default]
    Light,
    /// Light text on a dark background
    Dark,
}

impl FromStr for ThemeKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ConfigError::UnknownTheme(other.to_string())),
        }
    }
}

impl std::fmt::Display for ThemeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Dark => f.write_str("dark"),
        }
    }
}

/// 24-bit colour
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Self::Rgb { r, g, b }
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// A foreground/background colour pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Text colour
    pub foreground: Rgb,
    /// Background colour
    pub background: Rgb,
}

impl Theme {
    /// Light preset
    pub const LIGHT: Self = Self {
        foreground: Rgb(0x00, 0x00, 0x00),
        background: Rgb(0xee, 0xee, 0xee),
    };

    /// Dark preset
    pub const DARK: Self = Self {
        foreground: Rgb(0xff, 0xff, 0xff),
        background: Rgb(0x22, 0x22, 0x22),
    };

    /// Preset for `key`
    #[must_use]
    pub const fn preset(key: ThemeKey) -> Self {
        match key {
            ThemeKey::Light => Self::LIGHT,
            ThemeKey::Dark => Self::DARK,
        }
    }
}
