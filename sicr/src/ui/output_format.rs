//! Themed status messages written to a terminal stream.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::theme::{entry_color, ThemeEntry, ThemeMap};

/// Applies the theme color for `entry` to `text` when color is supported.
pub fn paint(text: &str, entry: ThemeEntry, theme: &ThemeMap, supports_color: bool) -> String {
    match entry_color(theme, entry) {
        Some(color) if supports_color => text.color(color.to_ansi_color()).to_string(),
        _ => text.to_string(),
    }
}

fn print_prefixed<W: Write>(
    writer: &mut W,
    prefix: &str,
    msg: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    let line = format!("{}{}", prefix, msg);
    writeln!(writer, "{}", paint(&line, entry, theme, supports_color))
}

pub fn print_info_message<W: Write>(
    writer: &mut W,
    msg: &str,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    print_prefixed(writer, "", msg, ThemeEntry::Info, theme, supports_color)
}

pub fn print_success_message<W: Write>(
    writer: &mut W,
    msg: &str,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    print_prefixed(writer, "", msg, ThemeEntry::Success, theme, supports_color)
}

pub fn print_warn_message<W: Write>(
    writer: &mut W,
    msg: &str,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    print_prefixed(writer, "Warning: ", msg, ThemeEntry::Warn, theme, supports_color)
}

pub fn print_error_message<W: Write>(
    writer: &mut W,
    msg: &str,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    print_prefixed(writer, "Error: ", msg, ThemeEntry::Error, theme, supports_color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    #[test]
    fn plain_output_without_color() {
        let theme = ThemeStyle::default_theme_map();
        let mut buf = Vec::new();
        print_error_message(&mut buf, "boom", &theme, false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Error: boom\n");
    }

    #[test]
    fn colored_output_contains_escape_codes() {
        let theme = ThemeStyle::default_theme_map();
        let painted = paint("ok", ThemeEntry::Success, &theme, true);
        assert!(painted.contains("\u{1b}["));
        assert!(painted.contains("ok"));
    }
}
