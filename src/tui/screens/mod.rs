//! # Screens
//!
//! Reusable screens pushed onto the navigation stack.
//!
//! - `ErrorScreen`: read-only error message, pushed by the stack itself
//! - `TableScreen`: loads rows, filters and selects them
//! - `PaletteScreen`: picks one of a list of named commands
//! - `ResultScreen`: runs a mutation once and reports its outcome
//!
//! Each file keeps its state, key handling, rendering and tests together.
//! Screens receive data through constructor arguments and closures, never
//! by reaching into global state.

pub mod error;
pub mod palette;
pub mod result;
pub mod table;

pub use error::ErrorScreen;
pub use palette::{PaletteCommand, PaletteScreen};
pub use result::ResultScreen;
pub use table::{Column, TableScreen};

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate a string to fit within `max_width` display columns, adding
/// "..." if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}

/// One-line key hint, e.g. `Enter Select  / Filter`.
pub(crate) fn help_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(key.to_string(), Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(
            format!(" {label}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_str("api", 10), "api");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_str("background-worker", 10), "backgro...");
    }

    #[test]
    fn test_truncate_counts_display_width() {
        // Each CJK character is two columns wide.
        assert_eq!(truncate_str("日本語のサービス", 9), "日本語...");
    }

    #[test]
    fn test_truncate_tiny_width() {
        assert_eq!(truncate_str("abcdef", 2), "..");
    }
}
