//! Cancellable periodic wakeup.
//!
//! The original timer hid its scheduling inside an implicit recurring
//! callback; here it is an explicit handle so the controller can prove at
//! most one wakeup registration exists per engine. Pausing or resetting
//! cancels the handle before returning, so a pause/resume pair can never
//! double-tick.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle to a background thread firing a callback once per period.
///
/// The callback returns `true` to keep ticking; returning `false` stops
/// the thread from inside (used when a completed work phase auto-pauses
/// the engine). Cancellation is synchronous: `cancel()` joins the thread,
/// so no callback runs after it returns. The callback must not hold locks
/// that the cancelling thread holds while calling `cancel()`.
pub struct Ticker {
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn a ticker firing `callback` at most once per `period`.
    pub fn every<F>(period: Duration, mut callback: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel();
        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => {
                    if !callback() {
                        break;
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });
        Self {
            stop_tx,
            handle: Some(handle),
        }
    }

    /// Stop the ticker. Idempotent; safe to call on an already-cancelled
    /// handle.
    pub fn cancel(&mut self) {
        // Send fails only if the thread already exited.
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
