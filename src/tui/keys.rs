//! Session-wide key bindings.
//!
//! These are checked before a key reaches the top screen, so no screen can
//! shadow them. The set is fixed.

use super::action::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalKey {
    Quit,
    Previous,
    CopyCommand,
}

impl GlobalKey {
    pub fn key(&self) -> Key {
        match self {
            GlobalKey::Quit => Key::Ctrl('c'),
            GlobalKey::Previous => Key::Ctrl('d'),
            GlobalKey::CopyCommand => Key::Ctrl('s'),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GlobalKey::Quit => "[Ctrl+C]",
            GlobalKey::Previous => "[Ctrl+D]",
            GlobalKey::CopyCommand => "[Ctrl+S]",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GlobalKey::Quit => "Quit",
            GlobalKey::Previous => "Previous command",
            GlobalKey::CopyCommand => "Copy command to clipboard",
        }
    }
}

/// Returns the global binding for `key`, or `None` if the key belongs to
/// the active screen.
pub fn global_key(key: Key) -> Option<GlobalKey> {
    [GlobalKey::Quit, GlobalKey::Previous, GlobalKey::CopyCommand]
        .into_iter()
        .find(|g| g.key() == key)
}
