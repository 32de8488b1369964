//! # Navigation Stack
//!
//! The single owner of every screen in a session, of the terminal size and
//! of the loading indicator.
//!
//! ```text
//! Stack
//! ├── entries: Vec<ScreenEntry>   // bottom → top, only the top is live
//! ├── spinner: Option<Spinner>    // loading indicator, hides the stack
//! ├── width, height               // last raw terminal size
//! └── clipboard                   // target of the copy-command key
//! ```
//!
//! All state changes go through `dispatch()`, which consumes one action and
//! returns the effect the runtime should carry out. Nothing here touches
//! the terminal or the network.

use log::{debug, info, warn};

use super::action::{Action, Effect, Key, StackSize};
use super::clipboard::Clipboard;
use super::frame;
use super::keys::{GlobalKey, global_key};
use super::screen::Screen;
use super::screens::ErrorScreen;
use super::spinner::{Spinner, TICK_INTERVAL};

/// A screen plus the metadata the stack shows around it.
pub struct ScreenEntry {
    pub screen: Box<dyn Screen>,
    /// Command line that reproduces this screen, for the copy key.
    pub command: Option<String>,
    pub breadcrumb: Option<String>,
}

impl ScreenEntry {
    pub fn new(screen: impl Screen + 'static) -> Self {
        Self {
            screen: Box::new(screen),
            command: None,
            breadcrumb: None,
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn with_breadcrumb(mut self, breadcrumb: impl Into<String>) -> Self {
        self.breadcrumb = Some(breadcrumb.into());
        self
    }

    pub fn has_command(&self) -> bool {
        self.command.as_deref().is_some_and(|c| !c.is_empty())
    }
}

pub struct Stack {
    entries: Vec<ScreenEntry>,
    spinner: Option<Spinner>,
    width: u16,
    height: u16,
    clipboard: Box<dyn Clipboard>,
}

impl Stack {
    pub fn new(clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            entries: Vec::new(),
            spinner: None,
            width: 0,
            height: 0,
            clipboard,
        }
    }

    pub fn entries(&self) -> &[ScreenEntry] {
        &self.entries
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self) -> Option<&ScreenEntry> {
        self.entries.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut ScreenEntry> {
        self.entries.last_mut()
    }

    pub fn spinner(&self) -> Option<&Spinner> {
        self.spinner.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.spinner.is_some()
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Content area for the current entries and terminal size.
    pub fn stack_size(&self) -> StackSize {
        frame::stack_size(self.width, self.height, &self.entries)
    }

    /// Appends `entry` and returns its init effect followed by the current
    /// content size, so the new screen is initialized and sized before it
    /// sees anything else.
    pub fn push(&mut self, entry: ScreenEntry) -> Effect {
        info!(
            "Push {:?} (depth {} → {})",
            entry.breadcrumb,
            self.entries.len(),
            self.entries.len() + 1
        );
        self.entries.push(entry);
        self.refresh_top()
    }

    /// Removes the top entry. Popping an empty stack does nothing.
    pub fn pop(&mut self) {
        if let Some(entry) = self.entries.pop() {
            info!(
                "Pop {:?} (depth {} → {})",
                entry.breadcrumb,
                self.entries.len() + 1,
                self.entries.len()
            );
        }
    }

    /// Re-runs init on the top screen, as if it had just been pushed.
    fn refresh_top(&mut self) -> Effect {
        let size = self.stack_size();
        match self.entries.last_mut() {
            Some(top) => Effect::batch([
                top.screen.init(),
                Effect::Emit(Action::StackSize(size)),
            ]),
            None => Effect::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Effect {
        debug!("Dispatch {action:?} at depth {}", self.entries.len());

        match action {
            Action::Key(key) => match global_key(key) {
                Some(global) => self.handle_global_key(global),
                None => self.forward(Action::Key(key)),
            },
            Action::ClearScreen(then) => {
                info!("Clearing {} entries", self.entries.len());
                self.entries.clear();
                *then
            }
            Action::LoadingStarted { id, task } => {
                if self.spinner.is_some() {
                    debug!("Load {id:?} replaces the active loading indicator");
                }
                self.spinner = Some(Spinner::new(id));
                Effect::Batch(vec![
                    Effect::Tick {
                        id,
                        after: TICK_INTERVAL,
                    },
                    Effect::Spawn(task),
                ])
            }
            Action::LoadingFinished { id } => {
                if self.spinner.as_ref().is_some_and(|s| s.id() == id) {
                    self.spinner = None;
                } else {
                    debug!("Load {id:?} finished after being superseded");
                }
                Effect::None
            }
            Action::Error(err) => {
                warn!("Showing error: {err}");
                self.push(ScreenEntry::new(ErrorScreen::new(err.to_string())))
            }
            Action::SpinnerTick { id } => match self.spinner.as_mut() {
                Some(spinner) if spinner.id() == id => {
                    spinner.advance();
                    Effect::Tick {
                        id,
                        after: TICK_INTERVAL,
                    }
                }
                _ => Effect::None,
            },
            Action::Done(message) => {
                self.pop();
                if self.entries.is_empty() {
                    info!("Stack unwound, finishing: {message}");
                    return Effect::Batch(vec![Effect::Print(message), Effect::Quit]);
                }
                self.refresh_top()
            }
            Action::Resize { width, height } => {
                self.width = width;
                self.height = height;
                let size = self.stack_size();
                self.forward(Action::StackSize(size))
            }
            other => self.forward(other),
        }
    }

    fn handle_global_key(&mut self, key: GlobalKey) -> Effect {
        match key {
            GlobalKey::Quit => {
                info!("Quit requested");
                Effect::Quit
            }
            GlobalKey::Previous => {
                self.pop();
                if self.entries.is_empty() {
                    return Effect::Quit;
                }
                self.refresh_top()
            }
            GlobalKey::CopyCommand => {
                let Some(command) = self
                    .entries
                    .last()
                    .filter(|e| e.has_command())
                    .and_then(|e| e.command.clone())
                else {
                    return Effect::None;
                };

                match self.clipboard.copy(&command) {
                    Ok(()) => {
                        info!("Copied command to clipboard: {command}");
                        Effect::None
                    }
                    Err(err) => {
                        warn!("Clipboard copy failed: {err}");
                        self.push(ScreenEntry::new(ErrorScreen::new(
                            "Failed to copy command to clipboard",
                        )))
                    }
                }
            }
        }
    }

    /// Hands `action` to the top screen. With no top this is a no-op.
    fn forward(&mut self, action: Action) -> Effect {
        match self.entries.last_mut() {
            Some(top) => top.screen.update(action),
            None => Effect::None,
        }
    }
}
