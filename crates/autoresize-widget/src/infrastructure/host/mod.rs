//! Host page adapters.
//!
//! The widget only ever sees a host through the `DocumentHost` and
//! `ViewportSource` traits.  This module provides the headless
//! implementations used by tests and by embedders that drive the widget
//! outside a browser.

mod memory;

pub use memory::{InMemoryDocument, InMemoryViewport};
