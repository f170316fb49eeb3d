//! Infrastructure layer for the auto-resize widget.
//!
//! Contains the adapters behind the application-layer seams: the HTTP
//! client for the resize endpoint, key/value storage, and host document and
//! viewport implementations.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `autoresize_core`, but MUST NOT be imported by the `application` layer
//! outside of its tests.
//!
//! # Sub-modules
//!
//! - **`http`** – `HttpResizeClient`, the reqwest-backed `ResizeApi`, plus a
//!   `RecordingResizeApi` used by tests.
//!
//! - **`storage`** – `MemoryStore` and `UnavailableStore`, the two
//!   `KeyValueStore` implementations available outside a browser.
//!
//! - **`host`** – `InMemoryDocument` and `InMemoryViewport`, a headless
//!   host page.  A browser embedding provides its own `DocumentHost` and
//!   `ViewportSource` backed by the real DOM.

pub mod host;
pub mod http;
pub mod storage;
