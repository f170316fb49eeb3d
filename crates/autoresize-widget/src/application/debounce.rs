//! DebouncedResizeTrigger: coalesces bursts of viewport changes.
//!
//! # State machine
//!
//! ```text
//!            change (enabled)                 change (enabled)
//!   Idle ───────────────────────> PendingFire ─────────────────┐
//!    ^                               │   ^                      │
//!    │          timer expiry         │   └── restart timer ─────┘
//!    └───────── (fire detached) ─────┘
//!
//!   change (disabled): ignored in every state
//! ```
//!
//! Only the last event of a burst fires.  On expiry the fire action is
//! spawned as its own task and the trigger is back in Idle immediately, so a
//! new event arriving while a request is still in flight starts a fresh timer
//! instead of cancelling that request.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, trace};

/// Observable state of the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    PendingFire,
}

/// Trailing-edge debouncer backed by a cancellable tokio timer task.
pub struct DebouncedResizeTrigger {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl DebouncedResizeTrigger {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn state(&self) -> TriggerState {
        match &self.pending {
            Some(handle) if !handle.is_finished() => TriggerState::PendingFire,
            _ => TriggerState::Idle,
        }
    }

    /// Handles one viewport-change event.
    ///
    /// While `enabled` is false the event is dropped without touching the
    /// timer.  Otherwise any pending timer is cancelled and a new one armed;
    /// `fire` runs when it expires.  `fire` is lazy: anything it computes
    /// (such as the target size) is computed at expiry.
    pub fn on_viewport_change<F>(&mut self, enabled: bool, fire: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if !enabled {
            trace!("viewport change ignored: auto-resize is off");
            return;
        }

        if let Some(previous) = self.pending.take() {
            if !previous.is_finished() {
                debug!("viewport change within quiet period; restarting debounce timer");
            }
            previous.abort();
        }

        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            time::sleep(delay).await;
            debug!("debounce timer expired; firing resize");
            tokio::spawn(fire);
        }));
    }

    /// Cancels a pending fire.  Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                if was_pending {
                    debug!("pending debounced resize cancelled");
                }
                was_pending
            }
            None => false,
        }
    }
}

impl Drop for DebouncedResizeTrigger {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
