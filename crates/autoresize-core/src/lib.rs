//! # autoresize-core
//!
//! Shared library for the remote-session auto-resize widget containing the
//! domain types, the JSON wire messages of the resize endpoint, and the
//! widget configuration.
//!
//! It has zero dependencies on async runtimes, HTTP clients, or the host page.
//!
//! # Architecture overview (for beginners)
//!
//! The widget lives inside a remote-desktop web viewer.  Whenever the browser
//! viewport changes size, it asks a small HTTP service running next to the
//! remote desktop to change the desktop resolution so the session fills the
//! viewport exactly.  A toggle button lets the user switch the behaviour on
//! and off, and the choice survives page reloads.
//!
//! This crate (`autoresize-core`) is the shared foundation.  It defines:
//!
//! - **`domain`** – Pure business rules: the 8-pixel grid that every target
//!   [`Size`] snaps to, the [`ResizeOutcome`] of one attempt, and the visual
//!   states of the toggle control.
//!
//! - **`protocol`** – How the widget talks to the resize endpoint: URL
//!   construction and the JSON response bodies.
//!
//! - **`config`** – The named timing constants and the [`WidgetConfig`]
//!   struct that bundles them, loadable from TOML.

pub mod config;
pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `autoresize_core::Size` instead of `autoresize_core::domain::size::Size`.
pub use config::{ApiEndpoint, ConfigError, PendingPolicy, WidgetConfig};
pub use domain::outcome::{ResizeFailure, ResizeOutcome};
pub use domain::size::{quantize, Size, GRID_UNIT};
pub use domain::status::StatusMessage;
pub use domain::toggle::ToggleVisual;
pub use protocol::messages::{ResizeResponse, ResolutionResponse};
