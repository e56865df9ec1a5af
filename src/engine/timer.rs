//! Single-shot turn timer.
//!
//! A `TurnTimer` counts down on a background thread and calls its
//! callback once if the limit elapses before the timer is cancelled.
//! Dropping the handle cancels it.
//!
//! The timer knows nothing about the game. A callback that wants to act
//! on the game must send its request back to the thread that owns the
//! engine, which then goes through `GameEngine::execute_action` like any
//! other caller. Cancellation is advisory: a timer that fires just as it
//! is cancelled may still run its callback, and the engine's phase guard
//! turns a late request against a finished game into a no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::debug;

/// Handle to a running countdown.
#[derive(Debug)]
pub struct TurnTimer {
    cancel: Option<Sender<()>>,
    fired: Arc<AtomicBool>,
    limit: Duration,
}

impl TurnTimer {
    /// Start counting down `limit`; `on_timeout` runs on the timer thread
    /// if the limit elapses first.
    pub fn start(limit: Duration, on_timeout: impl FnOnce() + Send + 'static) -> Self {
        let (tx, rx) = mpsc::channel::<()>();
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);

        thread::spawn(move || match rx.recv_timeout(limit) {
            Err(RecvTimeoutError::Timeout) => {
                flag.store(true, Ordering::SeqCst);
                debug!(?limit, "turn timer expired");
                on_timeout();
            }
            // Explicit cancel or handle dropped.
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
        });

        Self {
            cancel: Some(tx),
            fired,
            limit,
        }
    }

    /// Stop the countdown. Has no effect if the timer already fired.
    pub fn cancel(mut self) {
        self.disarm();
    }

    /// True once the callback has been invoked.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn limit(&self) -> Duration {
        self.limit
    }

    fn disarm(&mut self) {
        if let Some(tx) = self.cancel.take() {
            // The timer thread may already have exited after firing.
            let _ = tx.send(());
        }
    }
}

impl Drop for TurnTimer {
    fn drop(&mut self) {
        self.disarm();
    }
}
