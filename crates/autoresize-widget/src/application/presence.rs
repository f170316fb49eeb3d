//! PresenceWidget: the toggle control, the status indicator, and the loop
//! that keeps them in the document.
//!
//! # Why a presence loop?
//!
//! The viewer page re-renders parts of its DOM on its own schedule and may
//! drop anything that was injected into `<body>` without telling anyone.
//! Rather than hooking into the host's internals, the widget checks every
//! couple of seconds whether its toggle and status indicator are still
//! there and rebuilds both if either is gone.  The loop is a plain repeating timer task whose
//! [`PresenceHandle`] tears it down deterministically when cancelled.
//!
//! # Invariant
//!
//! Exactly one toggle and one status element exist while the widget is
//! active.  Recreation always removes every element carrying either reserved
//! id before appending fresh ones.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use autoresize_core::{StatusMessage, ToggleVisual, WidgetConfig};
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

// ── Host document seam ────────────────────────────────────────────────────────

/// Loading state of the host document (mirrors `document.readyState`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

/// Error type for host document operations.
#[derive(Debug, Error)]
pub enum DomError {
    #[error("document body is unavailable")]
    NoBody,
    #[error("DOM operation failed: {0}")]
    Operation(String),
}

/// Stream of click notifications for one element id.
pub type ClickEvents = mpsc::UnboundedReceiver<()>;

/// Static description of an element the widget injects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSpec {
    pub id: String,
    pub tag: &'static str,
    pub inner_html: &'static str,
    pub style: &'static [(&'static str, &'static str)],
}

/// The host page's document, reduced to what the widget needs.
///
/// Setters on an id that is not in the document are silent no-ops.
#[async_trait]
pub trait DocumentHost: Send + Sync {
    fn ready_state(&self) -> ReadyState;

    /// Resolves once the document has finished loading.
    async fn content_loaded(&self);

    fn contains(&self, id: &str) -> bool;

    /// Removes every element with `id`; returns how many were removed.
    fn remove(&self, id: &str) -> usize;

    /// Appends an element as a direct child of `<body>`.
    fn append_to_body(&self, element: ElementSpec) -> Result<(), DomError>;

    fn set_style(&self, id: &str, property: &str, value: &str);

    fn set_title(&self, id: &str, title: &str);

    fn set_text(&self, id: &str, text: &str);

    /// Attaches a click listener for elements with `id`, including elements
    /// created after the subscription.
    fn subscribe_clicks(&self, id: &str) -> ClickEvents;
}

// ── Element templates ─────────────────────────────────────────────────────────

const TOGGLE_ICON: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M15 3h6v6M9 21H3v-6M21 3l-7 7M3 21l7-7"/></svg>"#;

const TOGGLE_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "8px"),
    ("right", "8px"),
    ("z-index", "99999"),
    ("background", "#444"),
    ("color", "#fff"),
    ("width", "32px"),
    ("height", "32px"),
    ("border-radius", "4px"),
    ("cursor", "pointer"),
    ("display", "flex"),
    ("align-items", "center"),
    ("justify-content", "center"),
    ("box-shadow", "0 2px 8px rgba(0,0,0,0.3)"),
    ("transition", "background 0.2s"),
];

const STATUS_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "8px"),
    ("right", "48px"),
    ("z-index", "99999"),
    ("background", "rgba(0,0,0,0.8)"),
    ("color", "#fff"),
    ("padding", "6px 12px"),
    ("border-radius", "4px"),
    ("font-size", "12px"),
    ("font-family", "sans-serif"),
    ("opacity", "0"),
    ("transition", "opacity 0.3s"),
    ("pointer-events", "none"),
];

// ── Widget ────────────────────────────────────────────────────────────────────

/// Owner of the two injected elements.
pub struct PresenceWidget {
    document: Arc<dyn DocumentHost>,
    enabled: watch::Receiver<bool>,
    toggle_id: String,
    status_id: String,
    status_fade: Duration,
}

impl PresenceWidget {
    /// `enabled` is read whenever the elements have to be rebuilt, so a
    /// recreated toggle always shows the current state.
    pub fn new(
        document: Arc<dyn DocumentHost>,
        enabled: watch::Receiver<bool>,
        config: &WidgetConfig,
    ) -> Self {
        Self {
            document,
            enabled,
            toggle_id: config.toggle_element_id.clone(),
            status_id: config.status_element_id.clone(),
            status_fade: config.status_fade(),
        }
    }

    pub fn toggle_id(&self) -> &str {
        &self.toggle_id
    }

    pub fn status_id(&self) -> &str {
        &self.status_id
    }

    /// `true` while both the toggle and the status indicator are in the
    /// document.
    pub fn is_present(&self) -> bool {
        self.document.contains(&self.toggle_id) && self.document.contains(&self.status_id)
    }

    /// Recreates both elements if either of them is missing.
    ///
    /// Returns `true` when a rebuild happened.  Calling it while both are
    /// present does nothing.
    pub fn ensure(&self) -> bool {
        if self.is_present() {
            return false;
        }
        info!("auto-resize widget elements missing from document; recreating");
        self.create();
        true
    }

    /// Builds both elements from scratch, removing any existing ones first.
    pub fn create(&self) {
        let stale = self.document.remove(&self.toggle_id) + self.document.remove(&self.status_id);
        if stale > 0 {
            debug!(stale, "removed stale widget elements");
        }

        let toggle = ElementSpec {
            id: self.toggle_id.clone(),
            tag: "div",
            inner_html: TOGGLE_ICON,
            style: TOGGLE_STYLE,
        };
        let status = ElementSpec {
            id: self.status_id.clone(),
            tag: "div",
            inner_html: "",
            style: STATUS_STYLE,
        };
        for element in [toggle, status] {
            let id = element.id.clone();
            if let Err(e) = self.document.append_to_body(element) {
                warn!(%id, "could not inject widget element: {e}");
            }
        }

        self.render(*self.enabled.borrow());
    }

    /// Paints the toggle in its "on" or "off" visual state.
    pub fn render(&self, enabled: bool) {
        let visual = ToggleVisual::for_state(enabled);
        self.document
            .set_style(&self.toggle_id, "background", visual.background);
        self.document.set_title(&self.toggle_id, visual.title);
    }

    /// Shows `message` and schedules its own fade-out.
    ///
    /// Each call arms an independent fade timer; an earlier timer may hide a
    /// later message early.
    pub fn show_status(&self, message: &StatusMessage) {
        let text = message.to_string();
        debug!(status = %text, "showing status");
        self.document.set_text(&self.status_id, &text);
        self.document.set_style(&self.status_id, "opacity", "1");

        let document = Arc::clone(&self.document);
        let status_id = self.status_id.clone();
        let fade = self.status_fade;
        tokio::spawn(async move {
            time::sleep(fade).await;
            document.set_style(&status_id, "opacity", "0");
        });
    }

    /// Click listener for the toggle control.
    pub fn clicks(&self) -> ClickEvents {
        self.document.subscribe_clicks(&self.toggle_id)
    }

    /// Starts the periodic presence check.
    ///
    /// The first check runs one `interval` after the call.
    pub fn start_presence_check(self: &Arc<Self>, interval: Duration) -> PresenceHandle {
        let widget = Arc::clone(self);
        // `interval_at` panics on a zero period.
        let interval = interval.max(Duration::from_millis(1));
        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                widget.ensure();
            }
        });
        PresenceHandle { task }
    }
}

/// Cancel handle for the presence loop.
///
/// Dropping the handle detaches the loop; only [`cancel`](Self::cancel)
/// stops it.
pub struct PresenceHandle {
    task: JoinHandle<()>,
}

impl PresenceHandle {
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn cancel(self) {
        self.task.abort();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
