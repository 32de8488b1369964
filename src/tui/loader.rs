//! # Async Load Controller
//!
//! Wraps a zero-argument async operation so a screen can run it without
//! blocking the event loop. Each `start()` produces:
//!
//! ```text
//! LoadingStarted { id, task }      (immediately)
//! LoadingFinished { id }           (when the task completes)
//! Loaded { id, payload } | Error   (right after)
//! ```
//!
//! Loads are never cancelled. Starting again simply moves the pending id
//! forward, and `accept()` drops anything that does not match it.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use log::{debug, warn};

use super::action::{Action, Effect, LoadId, Payload};
use crate::core::error::AppError;

type LoadFn<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, AppError>> + Send + Sync>;

pub struct Loader<T> {
    load: LoadFn<T>,
    pending: Option<LoadId>,
}

impl<T: Send + 'static> Loader<T> {
    pub fn new<F, Fut>(load: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, AppError>> + Send + 'static,
    {
        Self {
            load: Arc::new(move || load().boxed()),
            pending: None,
        }
    }

    /// Starts a new load and returns the `LoadingStarted` action carrying it.
    pub fn start(&mut self) -> Effect {
        let id = LoadId::next();
        self.pending = Some(id);
        debug!("Starting load {id:?}");

        let load = Arc::clone(&self.load);
        let task = async move { finish(id, load().await) }.boxed();
        Effect::Emit(Action::LoadingStarted { id, task })
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the result of the most recent load. Results of older loads, or
    /// of loads owned by someone else, return `None`.
    pub fn accept(&mut self, id: LoadId, payload: Payload) -> Option<T> {
        if self.pending != Some(id) {
            debug!("Ignoring stale load result {id:?}");
            return None;
        }
        self.pending = None;

        match payload.downcast::<T>() {
            Ok(value) => Some(*value),
            Err(_) => {
                warn!("Load {id:?} produced an unexpected payload type");
                None
            }
        }
    }
}

fn finish<T: Send + 'static>(id: LoadId, result: Result<T, AppError>) -> Effect {
    let outcome = match result {
        Ok(value) => Action::Loaded {
            id,
            payload: Box::new(value),
        },
        Err(err) => {
            debug!("Load {id:?} failed: {err}");
            Action::Error(err)
        }
    };
    Effect::Batch(vec![
        Effect::Emit(Action::LoadingFinished { id }),
        Effect::Emit(outcome),
    ])
}
