//! Drag gesture translation for sliders.
//!
//! A [`DragTracker`] holds at most one [`DragSession`], keyed by the pointer
//! that started it. Moves produce a preview transform without touching the
//! slider state; release produces a [`DragDecision`] that the caller commits
//! through the same `SliderState::step` path as buttons and keys.

use super::carousel::slide_transform;

/// Smallest drag distance that can commit a transition.
pub const MIN_DRAG_THRESHOLD_PX: f64 = 40.0;

/// Share of the viewport width a drag must exceed on wide viewports.
pub const DRAG_THRESHOLD_RATIO: f64 = 0.12;

/// Threshold tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragThreshold {
    /// Floor in pixels.
    pub min_px: f64,
    /// Fraction of the viewport width.
    pub ratio: f64,
}

impl Default for DragThreshold {
    fn default() -> Self {
        Self {
            min_px: MIN_DRAG_THRESHOLD_PX,
            ratio: DRAG_THRESHOLD_RATIO,
        }
    }
}

impl DragThreshold {
    /// Pixel distance a drag must exceed for a viewport of `viewport_width`.
    pub fn for_width(&self, viewport_width: f64) -> f64 {
        self.min_px.max(viewport_width * self.ratio)
    }
}

/// One in-progress drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Pointer that owns the session.
    pub pointer_id: i32,
    /// Client x at pointer-down.
    pub start_x: f64,
    /// Latest horizontal delta in pixels.
    pub current_delta_x: f64,
    /// Slide index when the drag began.
    pub baseline_index: usize,
}

/// What a finished drag asks the slider to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragDecision {
    /// Move to the next slide (dragged left).
    Advance,
    /// Move to the previous slide (dragged right).
    Retreat,
    /// Distance under threshold; return to the current slide.
    SnapBack,
}

impl DragDecision {
    /// Index delta this decision commits.
    pub fn delta(&self) -> i64 {
        match self {
            DragDecision::Advance => 1,
            DragDecision::Retreat => -1,
            DragDecision::SnapBack => 0,
        }
    }
}

/// Decide a finished drag from its pixel delta.
///
/// Negative deltas (finger moved left) advance; positive deltas retreat.
pub fn decide(delta_px: f64, viewport_width: f64, threshold: &DragThreshold) -> DragDecision {
    if delta_px.abs() > threshold.for_width(viewport_width) {
        if delta_px < 0.0 {
            DragDecision::Advance
        } else {
            DragDecision::Retreat
        }
    } else {
        DragDecision::SnapBack
    }
}

/// Preview transform while dragging: `-index*100% + deltaPercent%`.
pub fn preview_transform(index: usize, delta_px: f64, viewport_width: f64) -> String {
    let delta_percent = if viewport_width > 0.0 {
        delta_px / viewport_width * 100.0
    } else {
        0.0
    };
    slide_transform(-(index as f64) * 100.0 + delta_percent)
}

/// Per-slider drag session holder.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    session: Option<DragSession>,
    threshold: DragThreshold,
}

impl DragTracker {
    /// Tracker with the given threshold tuning.
    pub fn new(threshold: DragThreshold) -> Self {
        Self {
            session: None,
            threshold,
        }
    }

    /// Active session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Whether a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Start a session. Returns `false` when another pointer already owns one.
    pub fn begin(&mut self, pointer_id: i32, x: f64, index: usize) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = Some(DragSession {
            pointer_id,
            start_x: x,
            current_delta_x: 0.0,
            baseline_index: index,
        });
        true
    }

    /// Track a move. Returns the preview transform, or `None` for a foreign
    /// pointer or no session.
    pub fn update(&mut self, pointer_id: i32, x: f64, viewport_width: f64) -> Option<String> {
        let session = self.session.as_mut()?;
        if session.pointer_id != pointer_id {
            return None;
        }
        session.current_delta_x = x - session.start_x;
        Some(preview_transform(
            session.baseline_index,
            session.current_delta_x,
            viewport_width,
        ))
    }

    /// End the session owned by `pointer_id`, using `x` as the final position.
    ///
    /// Returns `None` for a foreign pointer or no session.
    pub fn finish(&mut self, pointer_id: i32, x: f64, viewport_width: f64) -> Option<DragDecision> {
        match &self.session {
            Some(session) if session.pointer_id == pointer_id => {}
            _ => return None,
        }
        let session = self.session.take()?;
        let delta = x - session.start_x;
        Some(decide(delta, viewport_width, &self.threshold))
    }

    /// Abandon the session owned by `pointer_id` using the last tracked delta.
    pub fn cancel(&mut self, pointer_id: i32, viewport_width: f64) -> Option<DragDecision> {
        let x = {
            let session = self.session.as_ref()?;
            session.start_x + session.current_delta_x
        };
        self.finish(pointer_id, x, viewport_width)
    }
}
