//! Grid-aligned target size for the remote session.
//!
//! The remote display protocol is happiest with framebuffer dimensions that
//! are multiples of a small grid unit, so every size the widget requests is
//! floored onto an 8-pixel grid first.
//!
//! # Example
//!
//! ```rust
//! use autoresize_core::{quantize, Size};
//!
//! assert_eq!(quantize(1365, 767), Size::new(1360, 760));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rounding granularity, in pixels, applied to both target dimensions.
pub const GRID_UNIT: u32 = 8;

/// A `(width, height)` pair in pixels.
///
/// Sizes produced by [`quantize`] are always multiples of [`GRID_UNIT`].
/// A `Size` is derived fresh for every resize attempt and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` when both dimensions sit on the grid.
    pub fn is_grid_aligned(&self) -> bool {
        self.width % GRID_UNIT == 0 && self.height % GRID_UNIT == 0
    }
}

impl fmt::Display for Size {
    /// Formats as `WIDTHxHEIGHT`, e.g. `1360x760`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Floors both viewport dimensions to the nearest lower multiple of
/// [`GRID_UNIT`].
///
/// Viewport dimensions are unsigned, so the result is never below zero.
pub fn quantize(viewport_width: u32, viewport_height: u32) -> Size {
    Size {
        width: floor_to_grid(viewport_width),
        height: floor_to_grid(viewport_height),
    }
}

fn floor_to_grid(value: u32) -> u32 {
    (value / GRID_UNIT) * GRID_UNIT
}

// ── Tests ─────────────────────────────────────────────────────────────────────
