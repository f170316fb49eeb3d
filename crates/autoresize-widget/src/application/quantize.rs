//! SizeQuantizer: turns the current viewport into a grid-aligned resize target.

use std::sync::Arc;

use autoresize_core::{quantize, Size};
use tokio::sync::mpsc;

/// Stream of viewport-change notifications.  Each `()` is one change event.
pub type ViewportEvents = mpsc::UnboundedReceiver<()>;

/// The host's viewport.
///
/// The browser implementation reads `window.innerWidth/innerHeight` and
/// forwards `resize` events; tests use
/// [`crate::infrastructure::host::InMemoryViewport`].
pub trait ViewportSource: Send + Sync {
    /// Current viewport width and height in CSS pixels.
    fn inner_size(&self) -> (u32, u32);

    /// Attaches a viewport-change listener.
    ///
    /// Every subscription is a separate listener; dropping the receiver
    /// detaches it.
    fn subscribe(&self) -> ViewportEvents;
}

/// Computes resize targets from the ambient viewport.
pub struct SizeQuantizer {
    viewport: Arc<dyn ViewportSource>,
}

impl SizeQuantizer {
    pub fn new(viewport: Arc<dyn ViewportSource>) -> Self {
        Self { viewport }
    }

    /// Viewport size floored to the grid.  Never fails, no side effects.
    pub fn compute_target_size(&self) -> Size {
        let (width, height) = self.viewport.inner_size();
        quantize(width, height)
    }
}
