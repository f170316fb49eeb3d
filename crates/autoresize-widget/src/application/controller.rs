//! AutoResizeController: the single owner of all widget state.
//!
//! Every piece of mutable state the widget has (the enabled flag, the
//! pending debounce timer, the injected elements) is held by one
//! controller instance and reached through it.  Components never talk to
//! each other directly; the controller routes:
//!
//! ```text
//! viewport change ─> DebouncedResizeTrigger ─(expiry)─> resize_now()
//! toggle click    ─> PersistedToggleState ─> render ─> resize_now() | "OFF" status
//! resize_now()    ─> SizeQuantizer ─> ResizeApi ─> status text
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use autoresize_core::{PendingPolicy, ResizeOutcome, StatusMessage, WidgetConfig};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::debounce::{DebouncedResizeTrigger, TriggerState};
use super::presence::{ClickEvents, DocumentHost, PresenceWidget};
use super::quantize::{SizeQuantizer, ViewportEvents, ViewportSource};
use super::resize_api::ResizeApi;
use super::toggle_state::{KeyValueStore, PersistedToggleState};

/// Routes viewport changes and toggle clicks to the resize endpoint.
pub struct AutoResizeController {
    quantizer: SizeQuantizer,
    api: Arc<dyn ResizeApi>,
    toggle: PersistedToggleState,
    widget: Arc<PresenceWidget>,
    trigger: Mutex<DebouncedResizeTrigger>,
    pending_policy: PendingPolicy,
}

impl AutoResizeController {
    /// Wires the components together.  Nothing is injected into the
    /// document and no listener is attached until the caller asks for it.
    pub fn new(
        config: &WidgetConfig,
        viewport: Arc<dyn ViewportSource>,
        api: Arc<dyn ResizeApi>,
        store: Arc<dyn KeyValueStore>,
        document: Arc<dyn DocumentHost>,
    ) -> Arc<Self> {
        let toggle = PersistedToggleState::new(store, config.storage_key.clone());
        let widget = Arc::new(PresenceWidget::new(document, toggle.subscribe(), config));
        Arc::new(Self {
            quantizer: SizeQuantizer::new(viewport),
            api,
            toggle,
            widget,
            trigger: Mutex::new(DebouncedResizeTrigger::new(config.debounce_delay())),
            pending_policy: config.pending_policy,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.toggle.is_enabled()
    }

    pub fn widget(&self) -> &Arc<PresenceWidget> {
        &self.widget
    }

    pub fn trigger_state(&self) -> TriggerState {
        self.lock_trigger().state()
    }

    /// The flag as persisted by a previous page load.
    pub fn persisted_enabled(&self) -> bool {
        self.toggle.load()
    }

    /// Feeds one viewport-change event into the debouncer.
    pub fn on_viewport_change(self: &Arc<Self>) {
        let this = Arc::clone(self);
        let enabled = self.is_enabled();
        self.lock_trigger().on_viewport_change(enabled, async move {
            this.resize_now().await;
        });
    }

    /// Handles a click on the toggle control and returns the new flag.
    ///
    /// Switching on spawns one immediate resize; switching off shows the
    /// "off" status and, under [`PendingPolicy::CancelOnDisable`], drops a
    /// pending debounced resize.
    pub fn on_toggle_click(self: &Arc<Self>) -> bool {
        let enabled = self.toggle.toggle();
        info!(enabled, "auto-resize toggled");
        self.widget.render(enabled);

        if enabled {
            let this = Arc::clone(self);
            tokio::spawn(async move {
                this.resize_now().await;
            });
        } else {
            if self.pending_policy == PendingPolicy::CancelOnDisable {
                self.lock_trigger().cancel();
            }
            self.widget.show_status(&StatusMessage::Off);
        }
        enabled
    }

    /// Re-activates a persisted "on" state once the restore delay is over.
    ///
    /// Storage is read again at this point, so a toggle made during the
    /// delay wins.  Nothing happens if the flag is already on (the click
    /// that turned it on already resized) or storage no longer says "on".
    pub async fn restore_persisted(&self) -> Option<ResizeOutcome> {
        if self.is_enabled() {
            debug!("auto-resize already on; skipping restore");
            return None;
        }
        if !self.toggle.load() {
            debug!("persisted flag changed during restore delay; skipping restore");
            return None;
        }
        Some(self.activate().await)
    }

    /// Turns the flag on without persisting it (it was just read from
    /// storage), re-renders, and performs one resize.
    pub async fn activate(&self) -> ResizeOutcome {
        info!("restoring persisted auto-resize state");
        self.toggle.set_enabled(true);
        self.widget.render(true);
        self.resize_now().await
    }

    /// Computes the target size and requests it once.
    ///
    /// Always completes: failures are reported through the status indicator
    /// and the returned outcome, never as an error.
    pub async fn resize_now(&self) -> ResizeOutcome {
        let size = self.quantizer.compute_target_size();
        self.widget.show_status(&StatusMessage::Resizing(size));

        let outcome = self.api.request_resize(size).await;
        match &outcome {
            ResizeOutcome::Success(size) => info!(%size, "remote session resized"),
            ResizeOutcome::Failure(failure) => {
                warn!(%size, reason = failure.reason(), "resize failed: {failure:?}");
            }
        }
        self.widget.show_status(&StatusMessage::for_outcome(&outcome));
        outcome
    }

    /// Spawns the viewport-change and click listener tasks.
    pub fn attach_listeners(
        self: &Arc<Self>,
        mut viewport_events: ViewportEvents,
        mut clicks: ClickEvents,
    ) -> Vec<JoinHandle<()>> {
        let on_resize = {
            let this = Arc::clone(self);
            tokio::spawn(async move {
                while viewport_events.recv().await.is_some() {
                    this.on_viewport_change();
                }
                debug!("viewport listener detached");
            })
        };
        let on_click = {
            let this = Arc::clone(self);
            tokio::spawn(async move {
                while clicks.recv().await.is_some() {
                    this.on_toggle_click();
                }
                debug!("toggle click listener detached");
            })
        };
        vec![on_resize, on_click]
    }

    /// Cancels a pending debounced resize, if any.
    pub fn cancel_pending(&self) -> bool {
        self.lock_trigger().cancel()
    }

    fn lock_trigger(&self) -> std::sync::MutexGuard<'_, DebouncedResizeTrigger> {
        self.trigger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
