//! Cancellable timed tasks
//!
//! Scan latency, the lockout countdown and the threat monitor all run as
//! tokio tasks owned through a [`TimedTask`]. Cancelling aborts the task;
//! cancelling an idle or finished task does nothing. Dropping a `TimedTask`
//! cancels it.

use std::ops::ControlFlow;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

/// Handle to at most one pending timed task
#[derive(Debug, Default)]
pub struct TimedTask {
    handle: Option<JoinHandle<()>>,
}

impl TimedTask {
    /// A handle with nothing pending
    pub fn idle() -> Self {
        Self { handle: None }
    }

    /// Run `f` once after `delay`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn after<F>(delay: Duration, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            time::sleep(delay).await;
            f();
        });
        Self {
            handle: Some(handle),
        }
    }

    /// Run `f` every `period`, first after one full period, until it breaks.
    ///
    /// Ticks follow a fixed schedule, so a delayed tick does not shift the
    /// ones after it.
    pub fn every<F>(period: Duration, mut f: F) -> Self
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                if f().is_break() {
                    break;
                }
            }
        });
        Self {
            handle: Some(handle),
        }
    }

    /// Abort the pending task, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Whether a task is scheduled and has not finished
    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for TimedTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
