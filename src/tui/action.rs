//! # Actions and Effects
//!
//! Everything that can happen in a session becomes an `Action`.
//! User presses Ctrl+D? That's `Action::Key(Key::Ctrl('d'))`.
//! A load finishes? That's `Action::LoadingFinished` followed by
//! `Action::Loaded { .. }`.
//!
//! `Stack::dispatch()` and `Screen::update()` take an action and answer with
//! an `Effect`: plain data describing what should happen next. The runtime is
//! the only place effects are carried out.
//!
//! ```text
//! Stack + Action  →  dispatch()  →  Effect  →  Runtime  →  more Actions
//! ```

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::future::BoxFuture;

use crate::core::error::AppError;
use crate::tui::stack::ScreenEntry;

/// Keys the session understands, already stripped of terminal details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

/// Usable content area below the header and above the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StackSize {
    pub width: u16,
    pub height: u16,
    /// Row where the content area starts.
    pub top: u16,
}

/// Identifies one invocation of a loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadId(u64);

static NEXT_LOAD_ID: AtomicU64 = AtomicU64::new(1);

impl LoadId {
    pub fn next() -> Self {
        LoadId(NEXT_LOAD_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A typed load result, erased so it can travel through the stack.
/// Only the screen that started the load knows the concrete type.
pub type Payload = Box<dyn Any + Send>;

/// Work that runs off the event loop and reports back with an effect.
pub type Task = BoxFuture<'static, Effect>;

pub enum Action {
    Key(Key),
    /// Text delivered in one piece by bracketed paste.
    Paste(String),
    /// Raw terminal size. Screens never see this; they get `StackSize`.
    Resize { width: u16, height: u16 },
    StackSize(StackSize),
    /// Empty the stack, then carry out `then`.
    ClearScreen(Box<Effect>),
    LoadingStarted { id: LoadId, task: Task },
    LoadingFinished { id: LoadId },
    Loaded { id: LoadId, payload: Payload },
    Error(AppError),
    SpinnerTick { id: LoadId },
    /// Normal completion of the top screen, with a final message.
    Done(String),
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Action::Paste(text) => f.debug_tuple("Paste").field(text).finish(),
            Action::Resize { width, height } => f
                .debug_struct("Resize")
                .field("width", width)
                .field("height", height)
                .finish(),
            Action::StackSize(size) => f.debug_tuple("StackSize").field(size).finish(),
            Action::ClearScreen(then) => f.debug_tuple("ClearScreen").field(then).finish(),
            Action::LoadingStarted { id, .. } => {
                f.debug_struct("LoadingStarted").field("id", id).finish_non_exhaustive()
            }
            Action::LoadingFinished { id } => {
                f.debug_struct("LoadingFinished").field("id", id).finish()
            }
            Action::Loaded { id, .. } => {
                f.debug_struct("Loaded").field("id", id).finish_non_exhaustive()
            }
            Action::Error(err) => f.debug_tuple("Error").field(err).finish(),
            Action::SpinnerTick { id } => f.debug_struct("SpinnerTick").field("id", id).finish(),
            Action::Done(message) => f.debug_tuple("Done").field(message).finish(),
        }
    }
}

/// Side effects requested by the stack or a screen.
pub enum Effect {
    None,
    /// Apply each effect in order.
    Batch(Vec<Effect>),
    /// Feed an action back into the loop.
    Emit(Action),
    Push(ScreenEntry),
    /// Run a task on the async runtime; its resulting effect is applied
    /// when it completes.
    Spawn(Task),
    /// Emit `SpinnerTick { id }` after `after`.
    Tick { id: LoadId, after: Duration },
    /// Print a line once the terminal is restored.
    Print(String),
    Quit,
}

impl Effect {
    /// Builds a batch, dropping `Effect::None` entries and unwrapping
    /// single-element batches.
    pub fn batch(effects: impl IntoIterator<Item = Effect>) -> Effect {
        let mut effects: Vec<Effect> = effects
            .into_iter()
            .filter(|e| !matches!(e, Effect::None))
            .collect();
        match effects.len() {
            0 => Effect::None,
            1 => effects.remove(0),
            _ => Effect::Batch(effects),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }

    /// Expands nested batches into a flat, ordered list.
    pub fn flatten(self) -> Vec<Effect> {
        match self {
            Effect::None => Vec::new(),
            Effect::Batch(effects) => effects.into_iter().flat_map(Effect::flatten).collect(),
            other => vec![other],
        }
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::None => write!(f, "None"),
            Effect::Batch(effects) => f.debug_tuple("Batch").field(effects).finish(),
            Effect::Emit(action) => f.debug_tuple("Emit").field(action).finish(),
            Effect::Push(entry) => f
                .debug_struct("Push")
                .field("breadcrumb", &entry.breadcrumb)
                .field("command", &entry.command)
                .finish_non_exhaustive(),
            Effect::Spawn(_) => write!(f, "Spawn(..)"),
            Effect::Tick { id, after } => f
                .debug_struct("Tick")
                .field("id", id)
                .field("after", after)
                .finish(),
            Effect::Print(message) => f.debug_tuple("Print").field(message).finish(),
            Effect::Quit => write!(f, "Quit"),
        }
    }
}
