//! Bootstrapper: decides whether the widget activates at all, and wires it up.
//!
//! # Startup sequence
//!
//! ```text
//! check_health ──false──> stay inert (nothing injected, no listeners)
//!      │
//!     true
//!      │
//! wait for document ready (content_loaded, or a short delay if already loaded)
//!      │
//! create elements ─> attach listeners ─> start presence check
//!      │
//! persisted flag "true"? ──yes──> after restore delay: restore_persisted()
//! ```
//!
//! Startup is fire-and-forget: once `run` returns, the listener tasks and
//! the presence loop own the controller, so the widget keeps working even
//! if the returned [`ActiveWidget`] is dropped.
//!
//! The bootstrapper never fails.  An unreachable endpoint is the normal case
//! on viewers without the resize service, so it is logged at `debug!` only.

use std::sync::Arc;

use autoresize_core::WidgetConfig;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info};

use super::controller::AutoResizeController;
use super::presence::{DocumentHost, PresenceHandle, ReadyState};
use super::quantize::ViewportSource;
use super::resize_api::ResizeApi;
use super::toggle_state::KeyValueStore;

/// Everything the widget needs from its environment.
pub struct Bootstrapper {
    config: WidgetConfig,
    viewport: Arc<dyn ViewportSource>,
    api: Arc<dyn ResizeApi>,
    store: Arc<dyn KeyValueStore>,
    document: Arc<dyn DocumentHost>,
}

impl Bootstrapper {
    pub fn new(
        config: WidgetConfig,
        viewport: Arc<dyn ViewportSource>,
        api: Arc<dyn ResizeApi>,
        store: Arc<dyn KeyValueStore>,
        document: Arc<dyn DocumentHost>,
    ) -> Self {
        Self {
            config,
            viewport,
            api,
            store,
            document,
        }
    }

    /// Runs the startup sequence.
    ///
    /// Returns `None` when the endpoint is unavailable; the widget then stays
    /// inert for the lifetime of the page.
    pub async fn run(self) -> Option<ActiveWidget> {
        if !self.api.check_health().await {
            debug!(
                endpoint = %self.config.endpoint.base_url(),
                "auto-resize API not available"
            );
            return None;
        }

        match self.document.ready_state() {
            ReadyState::Loading => self.document.content_loaded().await,
            ReadyState::Interactive | ReadyState::Complete => {
                time::sleep(self.config.ready_delay()).await;
            }
        }

        let controller = AutoResizeController::new(
            &self.config,
            Arc::clone(&self.viewport),
            Arc::clone(&self.api),
            Arc::clone(&self.store),
            Arc::clone(&self.document),
        );
        controller.widget().create();
        let listeners =
            controller.attach_listeners(self.viewport.subscribe(), controller.widget().clicks());
        let presence = controller
            .widget()
            .start_presence_check(self.config.presence_interval());
        info!("auto-resize widget initialised");

        let restore = if controller.persisted_enabled() {
            let delay = self.config.restore_delay();
            let controller = Arc::clone(&controller);
            Some(tokio::spawn(async move {
                time::sleep(delay).await;
                controller.restore_persisted().await;
            }))
        } else {
            None
        };

        Some(ActiveWidget {
            controller,
            listeners,
            presence,
            restore,
        })
    }

    /// Runs the startup sequence in the background.
    pub fn spawn(self) -> JoinHandle<Option<ActiveWidget>> {
        tokio::spawn(self.run())
    }
}

/// A running widget: the controller plus every task it owns.
///
/// The widget lives for the lifetime of the page.  Dropping this handle
/// detaches it without stopping anything; only [`shutdown`](Self::shutdown)
/// tears the widget down.
pub struct ActiveWidget {
    controller: Arc<AutoResizeController>,
    listeners: Vec<JoinHandle<()>>,
    presence: PresenceHandle,
    restore: Option<JoinHandle<()>>,
}

impl ActiveWidget {
    pub fn controller(&self) -> &Arc<AutoResizeController> {
        &self.controller
    }

    pub fn is_presence_running(&self) -> bool {
        self.presence.is_running()
    }

    /// Stops every task and cancels a pending debounced resize.
    ///
    /// Elements already in the document are left where they are.
    pub fn shutdown(self) {
        info!("shutting down auto-resize widget");
        for listener in &self.listeners {
            listener.abort();
        }
        if let Some(restore) = &self.restore {
            restore.abort();
        }
        self.controller.cancel_pending();
        self.presence.cancel();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
