//! autoresize-widget library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the widget do? (for beginners)
//!
//! A remote-desktop viewer shows the remote screen inside a browser tab.  If
//! the tab is larger or smaller than the remote desktop, the picture is either
//! letterboxed or scaled.  The widget fixes that by asking the remote side to
//! change its resolution to match the tab:
//!
//! 1. At startup it probes the resize endpoint.  If nobody answers, it stays
//!    completely invisible.
//! 2. It injects a small toggle button and a status label into the page.
//! 3. While the toggle is on, every burst of viewport changes results in one
//!    resize request for the viewport size floored to an 8-pixel grid.
//! 4. The on/off choice is persisted, and a reload restores it.
//! 5. If the host page wipes the injected elements during its own re-render,
//!    a periodic presence check puts them back.
//!
//! # Layers
//!
//! - **`application`** – the components (quantizer, debounced trigger,
//!   persisted toggle, presence widget, controller, bootstrapper) written
//!   against traits for everything the host provides.
//! - **`infrastructure`** – implementations of those traits: the `reqwest`
//!   resize client, in-memory storage, and an in-memory document/viewport
//!   used by tests and headless hosts.

/// Application layer: resize orchestration.
pub mod application;

/// Infrastructure layer: HTTP client, storage and host adapters.
pub mod infrastructure;
