//! # Effect Runtime
//!
//! Carries out the effects returned by `Stack::dispatch()`.
//!
//! Actions are processed one at a time from a FIFO queue: an action emitted
//! while handling another is appended and handled after everything already
//! queued. Background work (spawned tasks, spinner ticks) runs on tokio and
//! reports back through an mpsc channel of effects, which the event loop
//! drains between input polls.

use std::collections::VecDeque;
use std::sync::mpsc;

use log::{debug, warn};

use super::action::{Action, Effect};
use super::stack::Stack;

pub struct Runtime {
    tx: mpsc::Sender<Effect>,
    rx: mpsc::Receiver<Effect>,
    queue: VecDeque<Action>,
    printed: Vec<String>,
    quit: bool,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            queue: VecDeque::new(),
            printed: Vec::new(),
            quit: false,
        }
    }

    /// Dispatches `action` and everything it emits, in FIFO order.
    pub fn dispatch(&mut self, stack: &mut Stack, action: Action) {
        self.queue.push_back(action);
        self.run_queue(stack);
    }

    /// Applies `effect` and processes any actions it emitted.
    pub fn apply(&mut self, stack: &mut Stack, effect: Effect) {
        self.carry_out(stack, effect);
        self.run_queue(stack);
    }

    /// Applies effects sent back by background tasks. Returns whether any
    /// arrived, which means the screen needs a redraw.
    pub fn drain_background(&mut self, stack: &mut Stack) -> bool {
        let mut received = false;
        while let Ok(effect) = self.rx.try_recv() {
            received = true;
            self.apply(stack, effect);
            if self.quit {
                break;
            }
        }
        received
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Messages to print after the terminal is restored.
    pub fn take_printed(&mut self) -> Vec<String> {
        std::mem::take(&mut self.printed)
    }

    fn run_queue(&mut self, stack: &mut Stack) {
        while !self.quit {
            let Some(action) = self.queue.pop_front() else {
                break;
            };
            let effect = stack.dispatch(action);
            self.carry_out(stack, effect);
        }
    }

    fn carry_out(&mut self, stack: &mut Stack, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Batch(effects) => {
                for effect in effects {
                    self.carry_out(stack, effect);
                }
            }
            Effect::Emit(action) => self.queue.push_back(action),
            Effect::Push(entry) => {
                let effect = stack.push(entry);
                self.carry_out(stack, effect);
            }
            Effect::Spawn(task) => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let effect = task.await;
                    if tx.send(effect).is_err() {
                        warn!("Dropping task result: event loop has stopped");
                    }
                });
            }
            Effect::Tick { id, after } => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    // The loop may already be gone when the last tick fires.
                    let _ = tx.send(Effect::Emit(Action::SpinnerTick { id }));
                });
            }
            Effect::Print(message) => {
                if message.is_empty() {
                    debug!("Skipping empty print");
                } else {
                    self.printed.push(message);
                }
            }
            Effect::Quit => {
                debug!("Quit effect received");
                self.quit = true;
            }
        }
    }
}
