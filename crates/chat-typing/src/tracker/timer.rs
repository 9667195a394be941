//! One-shot timers owned by the tracker

use std::time::Duration;
use tokio::task::AbortHandle;
use tokio::time::Instant;

/// Handle to a pending one-shot timer
///
/// Cancelling aborts the spawned task. Dropping the handle without cancelling
/// leaves the task running; that only happens once the timer has fired.
#[derive(Debug)]
pub(crate) struct TimerHandle {
    generation: u64,
    task: AbortHandle,
}

impl TimerHandle {
    /// Spawn a timer that runs `on_fire` after `delay`
    ///
    /// Must be called from within a Tokio runtime.
    pub(crate) fn spawn<F>(generation: u64, delay: Duration, on_fire: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        // Deadline is fixed now, not when the task is first polled
        let deadline = Instant::now() + delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            on_fire();
        });

        Self {
            generation,
            task: task.abort_handle(),
        }
    }

    /// Generation this timer was started with
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancel the timer
    pub(crate) fn cancel(self) {
        self.task.abort();
    }
}
