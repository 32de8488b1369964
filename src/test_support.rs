//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;

use crate::core::error::AppError;
use crate::tui::action::{Action, Effect};
use crate::tui::clipboard::Clipboard;
use crate::tui::screen::Screen;
use crate::tui::stack::ScreenEntry;

pub type Log = Arc<Mutex<Vec<String>>>;

/// A screen that writes down everything that happens to it.
pub struct RecordingScreen {
    name: String,
    log: Log,
}

impl Screen for RecordingScreen {
    fn init(&mut self) -> Effect {
        self.log.lock().unwrap().push(format!("{}:init", self.name));
        Effect::None
    }

    fn update(&mut self, action: Action) -> Effect {
        let line = match action {
            Action::Key(key) => format!("{}:key {key:?}", self.name),
            Action::StackSize(size) => {
                format!("{}:size {}x{}@{}", self.name, size.width, size.height, size.top)
            }
            other => format!("{}:{other:?}", self.name),
        };
        self.log.lock().unwrap().push(line);
        Effect::None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(self.name.clone()), area);
    }
}

/// An entry whose screen ignores everything.
pub fn entry(name: &str) -> ScreenEntry {
    recording_entry(name).0
}

pub fn recording_entry(name: &str) -> (ScreenEntry, Log) {
    let log: Log = Arc::default();
    let screen = RecordingScreen {
        name: name.to_string(),
        log: Arc::clone(&log),
    };
    (ScreenEntry::new(screen), log)
}

/// Drains and returns the log.
pub fn take_log(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.lock().unwrap())
}

/// In-memory clipboard.
#[derive(Default)]
pub struct FakeClipboard {
    pub copied: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl FakeClipboard {
    pub fn failing() -> Self {
        Self {
            copied: Arc::default(),
            fail: true,
        }
    }
}

impl Clipboard for FakeClipboard {
    fn copy(&mut self, text: &str) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::Clipboard("no clipboard in tests".to_string()));
        }
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
