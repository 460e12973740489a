//! Scroll-progress mapping for the pinned horizontal track.
//!
//! Pure functions from a [`ViewportSample`] to a normalized [`Progress`] and
//! from progress to a horizontal pixel offset. The caller decides whether the
//! mapper runs at all (see [`PIN_BREAKPOINT_PX`]).

use crate::model::{Progress, ViewportSample};

/// Viewports at or below this width leave the track unpinned.
pub const PIN_BREAKPOINT_PX: f64 = 980.0;

/// Horizontal gap between cards on the track.
pub const CARD_GAP_PX: f64 = 18.0;

/// Clamp `n` into `[lo, hi]`.
///
/// Unlike `f64::clamp` this never panics when `lo > hi`; `lo` wins.
pub fn clamp(n: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(n))
}

/// Scroll distance over which the pinned element animates.
///
/// At least 1 so a pin shorter than the viewport never divides by zero.
pub fn scroll_span(sample: &ViewportSample) -> f64 {
    (sample.element_height - sample.viewport_height).max(1.0)
}

/// How far through the pinned section the page has scrolled.
///
/// `elementTop` above zero (not yet scrolled in) yields 0; scrolled past the
/// end yields 1.
pub fn progress(sample: &ViewportSample) -> Progress {
    let end = scroll_span(sample);
    let scrolled = clamp(-sample.element_top, 0.0, end);
    Progress::new(scrolled / end)
}

/// Maximum horizontal travel of the track.
pub fn max_offset(sample: &ViewportSample) -> f64 {
    (sample.track_scroll_width - sample.track_client_width).max(0.0)
}

/// Horizontal offset of the track for the given progress.
///
/// The track is translated by the negation of this value.
pub fn translate_x(progress: Progress, sample: &ViewportSample) -> f64 {
    max_offset(sample) * progress.get()
}

/// Inline transform for a track offset.
pub fn track_transform(offset: f64) -> String {
    format!("translate3d({}px,0,0)", format_px(-offset))
}

/// Vertical scroll needed to move the track by one card.
///
/// `direction` is `-1` for the previous card and `1` for the next. The
/// horizontal step is mapped back through the progress span so the page
/// scroll lands where the track shows the neighbouring card.
pub fn card_scroll_delta(
    card_width: f64,
    gap: f64,
    direction: i32,
    sample: &ViewportSample,
) -> f64 {
    let max_x = (sample.track_scroll_width - sample.track_client_width).max(1.0);
    let end = scroll_span(sample);
    let dx = (card_width + gap) * f64::from(direction);
    let dt = dx / max_x;
    dt * end
}

/// Format a pixel value without a trailing `.0` for whole numbers.
pub(crate) fn format_px(value: f64) -> String {
    // -0 renders as 0
    let value = if value == 0.0 { 0.0 } else { value };
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.3}", value)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}
