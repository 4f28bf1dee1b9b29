//! Module for managing the application's command-line interface (CLI) theme.
//!
//! This module defines the structure for theme configuration, allowing users
//! to customize the colors of report elements. It supports 16-color ANSI
//! named colors for foreground styling and provides functionality to load
//! themes from YAML files and manage default theme settings.

use anyhow::{Context, Result};
use comfy_table::Color as TableColor;
use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Type alias for the theme map, providing a consistent type definition.
pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The different logical parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    /// Section titles above each table.
    Header,
    Success,
    Info,
    Warn,
    Error,
    /// Column headers inside tables.
    TableHeader,
    /// The `test_name` column.
    RuleName,
    /// MCC values at or above 0.5.
    MccHigh,
    /// MCC values at or below zero.
    MccLow,
    /// Rows in the best-threshold table.
    BestRow,
}

impl ThemeEntry {
    pub const ALL: [ThemeEntry; 10] = [
        ThemeEntry::Header,
        ThemeEntry::Success,
        ThemeEntry::Info,
        ThemeEntry::Warn,
        ThemeEntry::Error,
        ThemeEntry::TableHeader,
        ThemeEntry::RuleName,
        ThemeEntry::MccHigh,
        ThemeEntry::MccLow,
        ThemeEntry::BestRow,
    ];
}

/// Represents an ANSI color that can be used in the theme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ThemeColor {
    /// A named ANSI color (e.g., "red", "brightgreen").
    Named(String),
}

/// Error type for parsing an invalid `ThemeColor` string.
#[derive(Debug, Clone)]
pub struct ParseThemeColorError;

impl fmt::Display for ParseThemeColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid theme color; expected one of: black, red, green, yellow, blue, \
            magenta, cyan, white, brightblack, brightred, brightgreen, brightyellow, \
            brightblue, brightmagenta, brightcyan, brightwhite."
        )
    }
}

impl std::error::Error for ParseThemeColorError {}

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "black" | "red" | "green" | "yellow" | "blue" | "magenta" | "cyan" | "white"
            | "brightblack" | "brightred" | "brightgreen" | "brightyellow" | "brightblue"
            | "brightmagenta" | "brightcyan" | "brightwhite" => Ok(ThemeColor::Named(lower)),
            _ => Err(ParseThemeColorError),
        }
    }
}

impl ThemeColor {
    fn named(name: &str) -> Self {
        ThemeColor::Named(name.to_string())
    }

    /// Converts to the `owo_colors` color used for plain messages.
    pub fn to_ansi_color(&self) -> AnsiColors {
        let ThemeColor::Named(name) = self;
        match name.as_str() {
            "black" => AnsiColors::Black,
            "red" => AnsiColors::Red,
            "green" => AnsiColors::Green,
            "yellow" => AnsiColors::Yellow,
            "blue" => AnsiColors::Blue,
            "magenta" => AnsiColors::Magenta,
            "cyan" => AnsiColors::Cyan,
            "white" => AnsiColors::White,
            "brightblack" => AnsiColors::BrightBlack,
            "brightred" => AnsiColors::BrightRed,
            "brightgreen" => AnsiColors::BrightGreen,
            "brightyellow" => AnsiColors::BrightYellow,
            "brightblue" => AnsiColors::BrightBlue,
            "brightmagenta" => AnsiColors::BrightMagenta,
            "brightcyan" => AnsiColors::BrightCyan,
            "brightwhite" => AnsiColors::BrightWhite,
            _ => AnsiColors::White,
        }
    }

    /// Converts to the `comfy_table` color used for table cells.
    pub fn to_table_color(&self) -> TableColor {
        let ThemeColor::Named(name) = self;
        match name.as_str() {
            "black" => TableColor::Black,
            "red" => TableColor::DarkRed,
            "green" => TableColor::DarkGreen,
            "yellow" => TableColor::DarkYellow,
            "blue" => TableColor::DarkBlue,
            "magenta" => TableColor::DarkMagenta,
            "cyan" => TableColor::DarkCyan,
            "white" => TableColor::Grey,
            "brightblack" => TableColor::DarkGrey,
            "brightred" => TableColor::Red,
            "brightgreen" => TableColor::Green,
            "brightyellow" => TableColor::Yellow,
            "brightblue" => TableColor::Blue,
            "brightmagenta" => TableColor::Magenta,
            "brightcyan" => TableColor::Cyan,
            "brightwhite" => TableColor::White,
            _ => TableColor::Reset,
        }
    }
}

/// Represents the style configuration for a specific `ThemeEntry`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    /// An optional `ThemeColor` to apply as the foreground color.
    pub fg: Option<ThemeColor>,
}

impl ThemeStyle {
    fn fg(name: &str) -> Self {
        Self { fg: Some(ThemeColor::named(name)) }
    }

    /// Loads a theme from a YAML file on disk and fills in missing entries with defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ThemeMap> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        let mut custom: ThemeMap = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

        for (entry, style) in Self::default_theme_map() {
            custom.entry(entry).or_insert(style);
        }
        Ok(custom)
    }

    /// Returns a default theme map with predefined color mappings.
    pub fn default_theme_map() -> ThemeMap {
        let mut theme = HashMap::new();
        theme.insert(ThemeEntry::Header, ThemeStyle::fg("brightcyan"));
        theme.insert(ThemeEntry::Success, ThemeStyle::fg("green"));
        theme.insert(ThemeEntry::Info, ThemeStyle::fg("white"));
        theme.insert(ThemeEntry::Warn, ThemeStyle::fg("yellow"));
        theme.insert(ThemeEntry::Error, ThemeStyle::fg("red"));
        theme.insert(ThemeEntry::TableHeader, ThemeStyle::fg("brightwhite"));
        theme.insert(ThemeEntry::RuleName, ThemeStyle::fg("cyan"));
        theme.insert(ThemeEntry::MccHigh, ThemeStyle::fg("brightgreen"));
        theme.insert(ThemeEntry::MccLow, ThemeStyle::fg("brightblack"));
        theme.insert(ThemeEntry::BestRow, ThemeStyle::fg("brightyellow"));
        theme
    }
}

/// Loads a theme configuration from a YAML file or returns the default theme.
pub fn build_theme_map(theme_path: Option<&PathBuf>) -> Result<ThemeMap> {
    if let Some(path) = theme_path {
        ThemeStyle::load_from_file(path)
    } else {
        Ok(ThemeStyle::default_theme_map())
    }
}

/// Foreground color configured for `entry`, if any.
pub fn entry_color(theme: &ThemeMap, entry: ThemeEntry) -> Option<&ThemeColor> {
    theme.get(&entry).and_then(|style| style.fg.as_ref())
}
