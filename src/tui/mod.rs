//! # TUI Adapter
//!
//! The ratatui-specific layer: a navigation stack of screens, the effect
//! runtime that drives it, and the terminal loop that feeds it input.
//!
//! ```text
//! crossterm event ─► event::translate ─► Action ─► Stack::dispatch ─► Effect
//!                                          ▲                            │
//!                                          └──────── Runtime ◄──────────┘
//! ```
//!
//! ## Redraw Strategy
//!
//! - **Loading**: polls every 50ms so spinner ticks show up promptly.
//! - **Idle**: polls up to 100ms and only redraws after an input event,
//!   a background result or a resize.

pub mod action;
pub mod clipboard;
pub mod event;
pub mod frame;
pub mod keys;
pub mod loader;
pub mod runtime;
pub mod screen;
pub mod screens;
pub mod spinner;
pub mod stack;
mod ui;

use log::info;
use std::io::stdout;
use std::time::Duration;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use self::action::{Action, Effect};
use self::clipboard::SystemClipboard;
use self::event::{poll_event_immediate, poll_event_timeout};
use self::runtime::Runtime;
use self::stack::{ScreenEntry, Stack};

const LOADING_POLL: Duration = Duration::from_millis(50);
const IDLE_POLL: Duration = Duration::from_millis(100);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

/// Runs a session with `root` as the first screen until the user quits or
/// the last screen finishes. Returns the messages to print once the
/// terminal is back to normal.
///
/// Must be called from within a tokio runtime.
pub fn run(root: ScreenEntry) -> std::io::Result<Vec<String>> {
    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut stack = Stack::new(Box::new(SystemClipboard));
    let mut runtime = Runtime::new();

    let result = (|| -> std::io::Result<()> {
        let size = terminal.size()?;
        runtime.dispatch(
            &mut stack,
            Action::Resize {
                width: size.width,
                height: size.height,
            },
        );
        runtime.apply(&mut stack, Effect::Push(root));

        let mut needs_redraw = true;
        while !runtime.should_quit() {
            if needs_redraw {
                terminal.draw(|f| ui::draw_ui(f, &mut stack))?;
                needs_redraw = false;
            }

            let timeout = if stack.is_loading() {
                LOADING_POLL
            } else {
                IDLE_POLL
            };

            // Drain all pending input before looking at background results.
            let mut next = poll_event_timeout(timeout)?;
            while let Some(action) = next {
                needs_redraw = true;
                runtime.dispatch(&mut stack, action);
                if runtime.should_quit() {
                    break;
                }
                next = poll_event_immediate()?;
            }

            if runtime.drain_background(&mut stack) {
                needs_redraw = true;
            }
        }
        Ok(())
    })();

    ratatui::restore();
    info!("Session ended at depth {}", stack.depth());
    result.map(|()| runtime.take_printed())
}
