//! Layout samples and normalized scroll progress.
//!
//! These are the values the Geometry Sampler produces on every scroll or
//! resize tick. None of them carries identity beyond the read that produced
//! it, and none is cached across ticks.

use serde::{Deserialize, Serialize};

/// One read of the layout the pinned track depends on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSample {
    /// Top edge of the pinned element relative to the viewport.
    /// Negative once the element has scrolled past the top.
    pub element_top: f64,
    /// Full height of the pinned element.
    pub element_height: f64,
    /// Height of the viewport.
    pub viewport_height: f64,
    /// Scrollable width of the horizontal track.
    pub track_scroll_width: f64,
    /// Visible width of the horizontal track.
    pub track_client_width: f64,
}

/// Normalized progress through a scroll-driven animation.
///
/// Always in `[0, 1]`; the constructor clamps, and `NaN` maps to the start.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
pub struct Progress(f64);

impl Progress {
    /// Animation not started.
    pub const START: Self = Self(0.0);

    /// Animation complete.
    pub const END: Self = Self(1.0);

    /// Clamping constructor.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::START;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Raw value in `[0, 1]`.
    pub fn get(&self) -> f64 {
        self.0
    }
}

/// Viewport dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Inner width.
    pub width: f64,
    /// Inner height.
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Box relative to the viewport, as `getBoundingClientRect()` reports it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    /// Distance from the viewport top.
    pub top: f64,
    /// Distance from the viewport left edge.
    pub left: f64,
    /// Border-box width.
    pub width: f64,
    /// Border-box height.
    pub height: f64,
}
