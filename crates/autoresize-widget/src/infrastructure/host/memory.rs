//! In-memory document and viewport.
//!
//! # Why a headless host?
//!
//! The widget's behaviour (what it injects, when it resizes, how it heals
//! itself) does not depend on a real browser.  `InMemoryDocument` keeps a
//! flat list of `<body>` children with their styles, title, and text, so
//! tests can assert on exactly what a user would see.  It can also simulate
//! the host page wiping injected elements or a user clicking the toggle.
//!
//! # Usage in tests
//!
//! ```ignore
//! let document = Arc::new(InMemoryDocument::loaded());
//! let viewport = Arc::new(InMemoryViewport::new(1365, 767));
//!
//! // ... bootstrap the widget ...
//!
//! document.click("autoresize-btn");
//! viewport.resize_to(1024, 700);
//! assert_eq!(document.text("autoresize-status").as_deref(), Some("1024x696"));
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};

use crate::application::presence::{ClickEvents, DocumentHost, DomError, ElementSpec, ReadyState};
use crate::application::quantize::{ViewportEvents, ViewportSource};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Document ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Element {
    id: String,
    tag: &'static str,
    styles: HashMap<String, String>,
    title: Option<String>,
    text: String,
}

impl Element {
    fn from_spec(spec: ElementSpec) -> Self {
        let styles = spec
            .style
            .iter()
            .map(|(property, value)| (property.to_string(), value.to_string()))
            .collect();
        Self {
            id: spec.id,
            tag: spec.tag,
            styles,
            title: None,
            text: spec.inner_html.to_string(),
        }
    }
}

/// Headless [`DocumentHost`].
pub struct InMemoryDocument {
    body: Mutex<Vec<Element>>,
    ready: watch::Sender<ReadyState>,
    click_listeners: Mutex<HashMap<String, Vec<mpsc::UnboundedSender<()>>>>,
}

impl InMemoryDocument {
    fn with_state(state: ReadyState) -> Self {
        let (ready, _) = watch::channel(state);
        Self {
            body: Mutex::new(Vec::new()),
            ready,
            click_listeners: Mutex::new(HashMap::new()),
        }
    }

    /// A document that has finished loading.
    pub fn loaded() -> Self {
        Self::with_state(ReadyState::Complete)
    }

    /// A document still parsing; see [`finish_loading`](Self::finish_loading).
    pub fn loading() -> Self {
        Self::with_state(ReadyState::Loading)
    }

    /// Fires the equivalent of `DOMContentLoaded`.
    pub fn finish_loading(&self) {
        self.ready.send_replace(ReadyState::Complete);
    }

    /// Total number of `<body>` children.
    pub fn element_count(&self) -> usize {
        lock(&self.body).len()
    }

    /// Number of elements carrying `id`.
    pub fn count(&self, id: &str) -> usize {
        lock(&self.body).iter().filter(|e| e.id == id).count()
    }

    /// Inline style `property` of the first element with `id`.
    pub fn style(&self, id: &str, property: &str) -> Option<String> {
        self.with_first(id, |e| e.styles.get(property).cloned())
            .flatten()
    }

    /// Tag name of the first element with `id`.
    pub fn tag(&self, id: &str) -> Option<&'static str> {
        self.with_first(id, |e| e.tag)
    }

    pub fn title(&self, id: &str) -> Option<String> {
        self.with_first(id, |e| e.title.clone()).flatten()
    }

    pub fn text(&self, id: &str) -> Option<String> {
        self.with_first(id, |e| e.text.clone())
    }

    /// Simulates a user click on the element with `id`.
    ///
    /// Returns `false` (and notifies nobody) if no such element exists.
    pub fn click(&self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        let mut listeners = lock(&self.click_listeners);
        if let Some(senders) = listeners.get_mut(id) {
            senders.retain(|tx| tx.send(()).is_ok());
        }
        true
    }

    fn with_first<R>(&self, id: &str, f: impl FnOnce(&Element) -> R) -> Option<R> {
        lock(&self.body).iter().find(|e| e.id == id).map(f)
    }

    fn for_each_with_id(&self, id: &str, f: impl FnMut(&mut Element)) {
        lock(&self.body)
            .iter_mut()
            .filter(|e| e.id == id)
            .for_each(f);
    }
}

#[async_trait]
impl DocumentHost for InMemoryDocument {
    fn ready_state(&self) -> ReadyState {
        *self.ready.borrow()
    }

    async fn content_loaded(&self) {
        let mut rx = self.ready.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = rx.wait_for(|state| *state != ReadyState::Loading).await;
    }

    fn contains(&self, id: &str) -> bool {
        self.count(id) > 0
    }

    fn remove(&self, id: &str) -> usize {
        let mut body = lock(&self.body);
        let before = body.len();
        body.retain(|e| e.id != id);
        before - body.len()
    }

    fn append_to_body(&self, element: ElementSpec) -> Result<(), DomError> {
        if *self.ready.borrow() == ReadyState::Loading {
            return Err(DomError::NoBody);
        }
        lock(&self.body).push(Element::from_spec(element));
        Ok(())
    }

    fn set_style(&self, id: &str, property: &str, value: &str) {
        self.for_each_with_id(id, |e| {
            e.styles.insert(property.to_string(), value.to_string());
        });
    }

    fn set_title(&self, id: &str, title: &str) {
        self.for_each_with_id(id, |e| e.title = Some(title.to_string()));
    }

    fn set_text(&self, id: &str, text: &str) {
        self.for_each_with_id(id, |e| e.text = text.to_string());
    }

    fn subscribe_clicks(&self, id: &str) -> ClickEvents {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.click_listeners)
            .entry(id.to_string())
            .or_default()
            .push(tx);
        rx
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Headless [`ViewportSource`] with a settable size.
pub struct InMemoryViewport {
    size: Mutex<(u32, u32)>,
    listeners: Mutex<Vec<mpsc::UnboundedSender<()>>>,
}

impl InMemoryViewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Mutex::new((width, height)),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Changes the size without emitting a change event.
    pub fn set_size(&self, width: u32, height: u32) {
        *lock(&self.size) = (width, height);
    }

    /// Changes the size and notifies every attached listener.
    pub fn resize_to(&self, width: u32, height: u32) {
        self.set_size(width, height);
        lock(&self.listeners).retain(|tx| tx.send(()).is_ok());
    }

    /// Number of listeners still attached.
    pub fn listener_count(&self) -> usize {
        let mut listeners = lock(&self.listeners);
        listeners.retain(|tx| !tx.is_closed());
        listeners.len()
    }
}

impl ViewportSource for InMemoryViewport {
    fn inner_size(&self) -> (u32, u32) {
        *lock(&self.size)
    }

    fn subscribe(&self) -> ViewportEvents {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.listeners).push(tx);
        rx
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
