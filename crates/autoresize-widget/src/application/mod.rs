//! Application layer of the auto-resize widget.
//!
//! # Components (leaf-first)
//!
//! - **`quantize`** – `SizeQuantizer`: reads the viewport through the
//!   [`quantize::ViewportSource`] seam and snaps it to the grid.
//! - **`resize_api`** – the [`resize_api::ResizeApi`] seam to the resize
//!   endpoint (implemented by `infrastructure::http::HttpResizeClient`).
//! - **`debounce`** – `DebouncedResizeTrigger`: Idle / PendingFire state
//!   machine that coalesces bursts of viewport changes.
//! - **`toggle_state`** – `PersistedToggleState`: the enabled flag, mirrored
//!   into a best-effort [`toggle_state::KeyValueStore`].
//! - **`presence`** – `PresenceWidget`: owns the two injected elements,
//!   renders the toggle, shows fading status text, and runs the self-healing
//!   presence check.
//! - **`controller`** – `AutoResizeController`: the single owner of all
//!   widget state; routes viewport changes and clicks.
//! - **`bootstrap`** – `Bootstrapper`: health probe, readiness wait, wiring,
//!   and restoration of the persisted flag.
//!
//! Everything here runs on one tokio runtime and suspends only at network
//! calls and timers.

pub mod bootstrap;
pub mod controller;
pub mod debounce;
pub mod presence;
pub mod quantize;
pub mod resize_api;
pub mod toggle_state;
