//! End-to-end lifecycle tests for the auto-resize widget.
//!
//! The widget is bootstrapped against the in-memory host, storage and a
//! recording resize API.  Every test runs on tokio's paused clock, so the
//! 300 ms debounce, 1500 ms restore delay and 2000 ms presence interval are
//! exercised exactly, without real waiting.

use std::sync::Arc;
use std::time::Duration;

use autoresize_core::{PendingPolicy, ResizeFailure, Size, ToggleVisual, WidgetConfig};
use autoresize_widget::application::bootstrap::{ActiveWidget, Bootstrapper};
use autoresize_widget::application::presence::DocumentHost;
use autoresize_widget::application::quantize::ViewportSource;
use autoresize_widget::application::resize_api::ResizeApi;
use autoresize_widget::application::toggle_state::KeyValueStore;
use autoresize_widget::infrastructure::host::{InMemoryDocument, InMemoryViewport};
use autoresize_widget::infrastructure::http::mock::RecordingResizeApi;
use autoresize_widget::infrastructure::storage::{MemoryStore, UnavailableStore};
use tokio::time;

const TOGGLE: &str = "autoresize-btn";
const STATUS: &str = "autoresize-status";
const KEY: &str = "vnc_autoresize";

// ── Helpers ───────────────────────────────────────────────────────────────────

struct Page {
    document: Arc<InMemoryDocument>,
    viewport: Arc<InMemoryViewport>,
    api: Arc<RecordingResizeApi>,
}

impl Page {
    fn new(width: u32, height: u32, api: RecordingResizeApi) -> Self {
        Self {
            document: Arc::new(InMemoryDocument::loaded()),
            viewport: Arc::new(InMemoryViewport::new(width, height)),
            api: Arc::new(api),
        }
    }

    async fn boot(&self, config: WidgetConfig, store: Arc<dyn KeyValueStore>) -> Option<ActiveWidget> {
        Bootstrapper::new(
            config,
            Arc::clone(&self.viewport) as Arc<dyn ViewportSource>,
            Arc::clone(&self.api) as Arc<dyn ResizeApi>,
            store,
            Arc::clone(&self.document) as Arc<dyn DocumentHost>,
        )
        .run()
        .await
    }

    fn click_toggle(&self) {
        assert!(self.document.click(TOGGLE), "toggle must be in the document");
    }
}

async fn advance(ms: u64) {
    time::sleep(Duration::from_millis(ms)).await;
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_resize_burst_produces_one_request_with_last_size() {
    // Arrange: widget running and switched on.
    let page = Page::new(1365, 767, RecordingResizeApi::healthy());
    let store = Arc::new(MemoryStore::new());
    let _widget = page.boot(WidgetConfig::default(), store).await.unwrap();
    page.click_toggle();
    advance(10).await;

    // Act: five changes 100 ms apart.
    for width in [900, 950, 1000, 1050, 1101] {
        page.viewport.resize_to(width, 707);
        advance(100).await;
    }
    advance(300).await;

    // Assert: the toggle-on resize, then one for the final size.
    assert_eq!(
        page.api.requests(),
        vec![Size::new(1360, 760), Size::new(1096, 704)]
    );
    assert_eq!(page.document.text(STATUS).as_deref(), Some("1096x704"));
}

#[tokio::test(start_paused = true)]
async fn test_persisted_state_restores_after_reload() {
    // Arrange: first page load, user switches on.
    let store = Arc::new(MemoryStore::new());
    let first = Page::new(1365, 767, RecordingResizeApi::healthy());
    let widget = first
        .boot(WidgetConfig::default(), Arc::clone(&store) as Arc<dyn KeyValueStore>)
        .await
        .unwrap();
    first.click_toggle();
    advance(10).await;
    widget.shutdown();
    assert_eq!(store.value(KEY).as_deref(), Some("true"));

    // Act: "reload" into a fresh page sharing the same storage.
    let second = Page::new(1920, 1080, RecordingResizeApi::healthy());
    let widget = second
        .boot(WidgetConfig::default(), Arc::clone(&store) as Arc<dyn KeyValueStore>)
        .await
        .unwrap();
    advance(1499).await;
    let before_restore = second.api.requests().len();
    advance(2).await;

    // Assert
    assert_eq!(before_restore, 0);
    assert!(widget.controller().is_enabled());
    assert_eq!(second.api.requests(), vec![Size::new(1920, 1080)]);
    assert_eq!(
        second.document.style(TOGGLE, "background").as_deref(),
        Some(ToggleVisual::ON.background)
    );
}

#[tokio::test(start_paused = true)]
async fn test_toggle_round_trip_restores_persisted_value_with_one_resize() {
    let page = Page::new(1024, 768, RecordingResizeApi::healthy());
    let store = Arc::new(MemoryStore::with_value(KEY, "false"));
    let _widget = page
        .boot(WidgetConfig::default(), Arc::clone(&store) as Arc<dyn KeyValueStore>)
        .await
        .unwrap();

    page.click_toggle();
    page.click_toggle();
    advance(10).await;

    assert_eq!(store.value(KEY).as_deref(), Some("false"));
    assert_eq!(page.api.requests().len(), 1);
    assert_eq!(
        page.document.title(TOGGLE).as_deref(),
        Some(ToggleVisual::OFF.title)
    );
}

#[tokio::test(start_paused = true)]
async fn test_unavailable_endpoint_keeps_widget_inert() {
    // Arrange
    let page = Page::new(1024, 768, RecordingResizeApi::unavailable());
    let store = Arc::new(MemoryStore::with_value(KEY, "true"));

    // Act
    let widget = page.boot(WidgetConfig::default(), store).await;
    page.viewport.resize_to(800, 600);
    advance(10_000).await;

    // Assert
    assert!(widget.is_none());
    assert_eq!(page.document.element_count(), 0);
    assert_eq!(page.viewport.listener_count(), 0);
    assert!(page.api.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_widget_heals_after_host_wipes_it() {
    // Arrange: enabled widget.
    let page = Page::new(1024, 768, RecordingResizeApi::healthy());
    let _widget = page
        .boot(WidgetConfig::default(), Arc::new(MemoryStore::new()))
        .await
        .unwrap();
    page.click_toggle();
    advance(10).await;

    // Act: the host re-renders and drops both elements.
    page.document.remove(TOGGLE);
    page.document.remove(STATUS);
    advance(2000).await;

    // Assert: one of each again, still showing "on", and still clickable.
    assert_eq!(page.document.count(TOGGLE), 1);
    assert_eq!(page.document.count(STATUS), 1);
    assert_eq!(
        page.document.title(TOGGLE).as_deref(),
        Some(ToggleVisual::ON.title)
    );
    page.click_toggle();
    advance(10).await;
    assert_eq!(
        page.document.title(TOGGLE).as_deref(),
        Some(ToggleVisual::OFF.title)
    );
}

#[tokio::test(start_paused = true)]
async fn test_failed_resize_shows_failure_then_fades_and_stays_enabled() {
    // Arrange
    let page = Page::new(1024, 768, RecordingResizeApi::healthy());
    page.api
        .fail_with(ResizeFailure::NotSuccessful { error: Some("xrandr failed".into()) });
    let widget = page
        .boot(WidgetConfig::default(), Arc::new(MemoryStore::new()))
        .await
        .unwrap();

    // Act
    page.click_toggle();
    advance(10).await;
    let shown = page.document.text(STATUS);
    let opacity_while_shown = page.document.style(STATUS, "opacity");
    advance(2000).await;

    // Assert
    assert_eq!(shown.as_deref(), Some("Resize failed"));
    assert_eq!(opacity_while_shown.as_deref(), Some("1"));
    assert_eq!(page.document.style(STATUS, "opacity").as_deref(), Some("0"));
    assert!(widget.controller().is_enabled());
}

#[tokio::test(start_paused = true)]
async fn test_recovery_after_failure_on_next_change() {
    let page = Page::new(1024, 768, RecordingResizeApi::healthy());
    page.api
        .fail_with(ResizeFailure::Transport("connection refused".into()));
    let _widget = page
        .boot(WidgetConfig::default(), Arc::new(MemoryStore::new()))
        .await
        .unwrap();
    page.click_toggle();
    advance(10).await;

    page.api.succeed();
    page.viewport.resize_to(1280, 720);
    advance(350).await;

    assert_eq!(page.api.requests().len(), 2);
    assert_eq!(page.document.text(STATUS).as_deref(), Some("1280x720"));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_on_disable_policy_drops_pending_resize() {
    let page = Page::new(1024, 768, RecordingResizeApi::healthy());
    let config = WidgetConfig {
        pending_policy: PendingPolicy::CancelOnDisable,
        ..WidgetConfig::default()
    };
    let _widget = page
        .boot(config, Arc::new(MemoryStore::new()))
        .await
        .unwrap();
    page.click_toggle();
    advance(10).await;

    page.viewport.resize_to(800, 600);
    advance(100).await;
    page.click_toggle();
    advance(500).await;

    assert_eq!(page.api.requests(), vec![Size::new(1024, 768)]);
}

#[tokio::test(start_paused = true)]
async fn test_widget_works_without_storage() {
    let page = Page::new(1024, 768, RecordingResizeApi::healthy());
    let widget = page
        .boot(WidgetConfig::default(), Arc::new(UnavailableStore))
        .await
        .unwrap();

    page.click_toggle();
    advance(10).await;

    assert!(widget.controller().is_enabled());
    assert_eq!(page.api.requests(), vec![Size::new(1024, 768)]);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_resizing() {
    let page = Page::new(1024, 768, RecordingResizeApi::healthy());
    let widget = page
        .boot(WidgetConfig::default(), Arc::new(MemoryStore::new()))
        .await
        .unwrap();
    page.click_toggle();
    advance(10).await;
    page.viewport.resize_to(800, 600);

    widget.shutdown();
    advance(1000).await;

    assert_eq!(page.api.requests().len(), 1);
    assert_eq!(page.viewport.listener_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_detached_startup_still_restores_and_heals() {
    // Arrange: persisted "on", startup spawned and its handle discarded.
    let page = Page::new(1365, 767, RecordingResizeApi::healthy());
    let store = Arc::new(MemoryStore::with_value(KEY, "true"));
    drop(
        Bootstrapper::new(
            WidgetConfig::default(),
            Arc::clone(&page.viewport) as Arc<dyn ViewportSource>,
            Arc::clone(&page.api) as Arc<dyn ResizeApi>,
            store,
            Arc::clone(&page.document) as Arc<dyn DocumentHost>,
        )
        .spawn(),
    );

    // Act: past the ready delay and the restore delay.
    advance(3000).await;

    // Assert: exactly one restore resize, listener still attached.
    assert_eq!(page.api.requests(), vec![Size::new(1360, 760)]);
    assert_eq!(page.viewport.listener_count(), 1);

    // Act: the host wipes the toggle.
    page.document.remove(TOGGLE);
    advance(2000).await;

    // Assert: the presence check put it back.
    assert_eq!(page.document.count(TOGGLE), 1);
    assert_eq!(
        page.document.title(TOGGLE).as_deref(),
        Some(ToggleVisual::ON.title)
    );
}
