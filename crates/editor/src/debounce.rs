//! Single-slot debouncing
//!
//! Collapses a burst of triggers into one callback that runs after a quiet
//! period. Only one timer is ever outstanding: arming again replaces it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// Owned, cancellable deferred callback
///
/// Timers run as Tokio tasks, so `arm` must be called from within a Tokio
/// runtime. Dropping the debouncer cancels its pending timer.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<Timer>,
}

#[derive(Debug)]
struct Timer {
    handle: JoinHandle<()>,
    /// Set once the deadline passed and the callback started
    fired: Arc<AtomicBool>,
}

impl Timer {
    fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire) || self.handle.is_finished()
    }
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `callback` to run once after `delay`, replacing any pending timer
    ///
    /// A replaced timer's callback never runs.
    pub fn arm<F>(&mut self, delay: Duration, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.cancel() {
            debug!("Debounce timer rearmed ({:?})", delay);
        }

        let deadline = Instant::now() + delay;
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        let handle = tokio::spawn(async move {
            sleep_until(deadline).await;
            flag.store(true, Ordering::Release);
            callback();
        });
        self.pending = Some(Timer { handle, fired });
    }

    /// Cancel the pending timer, if any
    ///
    /// Returns true when a timer that had not yet fired was cancelled. A
    /// callback that already started is left to finish.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(timer) => {
                let was_pending = !timer.has_fired();
                timer.handle.abort();
                was_pending
            }
            None => false,
        }
    }

    /// Whether a timer is armed and has not fired yet
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|timer| !timer.has_fired())
    }

    /// Wait for the pending timer (if any) to fire
    pub async fn wait(&mut self) {
        if let Some(timer) = self.pending.take() {
            // Err only when the task was aborted or panicked
            let _ = timer.handle.await;
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
