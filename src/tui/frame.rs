//! # Session Frame
//!
//! Header and footer drawn around the active screen. Both are pure
//! functions of the stack entries and are rebuilt on every frame, since the
//! breadcrumb trail and the available bindings change with depth and with
//! the top entry's metadata.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │                              │  header: margin
//! │ Services > Deploy            │          breadcrumbs
//! │                              │          margin
//! ├──────────────────────────────┤
//! │ active screen                │  body
//! ├──────────────────────────────┤
//! │                              │  footer: margin
//! │ Navigation: [Ctrl+C] Quit …  │          bindings
//! └──────────────────────────────┘
//! ```

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use super::action::StackSize;
use super::keys::GlobalKey;
use super::stack::ScreenEntry;

pub const BREADCRUMB_SEPARATOR: &str = " > ";

fn breadcrumb_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

fn key_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Non-empty breadcrumbs from bottom to top.
fn crumbs(entries: &[ScreenEntry]) -> impl Iterator<Item = &str> {
    entries
        .iter()
        .filter_map(|e| e.breadcrumb.as_deref())
        .filter(|b| !b.is_empty())
}

/// Plain-text breadcrumb trail, e.g. `"Services > Deploy"`.
pub fn breadcrumb_trail(entries: &[ScreenEntry]) -> String {
    crumbs(entries).collect::<Vec<_>>().join(BREADCRUMB_SEPARATOR)
}

/// Bindings to advertise for the current stack.
pub fn bindings(entries: &[ScreenEntry]) -> Vec<GlobalKey> {
    let mut keys = vec![GlobalKey::Quit];

    if entries.len() > 1 {
        keys.push(GlobalKey::Previous);
    }

    if entries.last().is_some_and(ScreenEntry::has_command) {
        keys.push(GlobalKey::CopyCommand);
    }

    keys
}

pub fn header(entries: &[ScreenEntry]) -> Text<'static> {
    let mut spans = Vec::new();
    for (i, crumb) in crumbs(entries).enumerate() {
        if i > 0 {
            spans.push(Span::raw(BREADCRUMB_SEPARATOR));
        }
        spans.push(Span::styled(crumb.to_string(), breadcrumb_style()));
    }

    Text::from(vec![Line::default(), Line::from(spans), Line::default()])
}

pub fn footer(entries: &[ScreenEntry]) -> Text<'static> {
    let mut spans = vec![Span::styled(
        "Navigation: ",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for (i, key) in bindings(entries).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(key.label(), key_style()));
        spans.push(Span::raw(format!(" {}", key.description())));
    }

    Text::from(vec![Line::default(), Line::from(spans)])
}

/// Content area left for the active screen on a `width` x `height` terminal.
pub fn stack_size(width: u16, height: u16, entries: &[ScreenEntry]) -> StackSize {
    let header_height = header(entries).height() as u16;
    let footer_height = footer(entries).height() as u16;

    StackSize {
        width,
        height: height.saturating_sub(header_height + footer_height),
        top: header_height,
    }
}
