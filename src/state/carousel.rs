//! Carousel state machine.
//!
//! One [`SliderState`] per slider on the page. Every trigger (buttons, dots,
//! arrow keys, a committed drag) goes through [`SliderState::step`] or
//! [`SliderState::go_to`], so the index invariant `0 <= index < slide_count`
//! is enforced in exactly one place.

use serde::{Deserialize, Serialize};

/// Policy applied when a transition would leave the slide range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionMode {
    /// Stop at the first and last slide.
    #[default]
    Bounded,
    /// Cycle past either end.
    Wrapping,
}

impl TransitionMode {
    /// Parse the `data-slider-mode` attribute value.
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value.trim() {
            "bounded" => Some(Self::Bounded),
            "wrapping" | "wrap" => Some(Self::Wrapping),
            _ => None,
        }
    }
}

/// Result of applying a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Index before the transition.
    pub from: usize,
    /// Index after the transition.
    pub to: usize,
}

impl Transition {
    /// Whether the index moved.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Everything a render writes for the current index.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideFrame {
    /// Inline transform for the track.
    pub transform: String,
    /// Indicator that carries the `active` marker; `None` when inert.
    pub active_dot: Option<usize>,
    /// Human-readable position, e.g. `"2 of 5"`. Empty when inert.
    pub counter: String,
    /// Whether the previous control is usable. Always true in wrapping mode.
    pub prev_enabled: bool,
    /// Whether the next control is usable. Always true in wrapping mode.
    pub next_enabled: bool,
}

/// Current slide of one slider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderState {
    id: String,
    slide_count: usize,
    index: usize,
    mode: TransitionMode,
    inert: bool,
}

impl SliderState {
    /// Create a slider at its first slide.
    ///
    /// Zero slides produce an inert single frame: the count is held at 1 and
    /// every transition is a no-op.
    pub fn new(id: impl Into<String>, slide_count: usize, mode: TransitionMode) -> Self {
        Self {
            id: id.into(),
            slide_count: slide_count.max(1),
            index: 0,
            mode,
            inert: slide_count == 0,
        }
    }

    /// Slider identifier (the root element's id).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of slides; at least 1.
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Current index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Transition policy.
    pub fn mode(&self) -> TransitionMode {
        self.mode
    }

    /// Whether the slider has no slides.
    pub fn is_inert(&self) -> bool {
        self.inert
    }

    /// Map any integer index into range under this slider's policy.
    pub fn normalize(&self, target: i64) -> usize {
        let count = self.slide_count as i64;
        match self.mode {
            TransitionMode::Bounded => target.clamp(0, count - 1) as usize,
            TransitionMode::Wrapping => target.rem_euclid(count) as usize,
        }
    }

    /// Move by `delta` slides.
    pub fn step(&mut self, delta: i64) -> Transition {
        let target = self.index as i64 + delta;
        self.go_to(target)
    }

    /// Select a slide directly (dot click, or any integer in wrapping mode).
    pub fn go_to(&mut self, target: i64) -> Transition {
        let from = self.index;
        if !self.inert {
            self.index = self.normalize(target);
        }
        Transition {
            from,
            to: self.index,
        }
    }

    /// Advance one slide.
    pub fn next(&mut self) -> Transition {
        self.step(1)
    }

    /// Retreat one slide.
    pub fn prev(&mut self) -> Transition {
        self.step(-1)
    }

    /// Whether `prev` would move in bounded mode.
    pub fn can_prev(&self) -> bool {
        !self.inert && (self.mode == TransitionMode::Wrapping || self.index > 0)
    }

    /// Whether `next` would move in bounded mode.
    pub fn can_next(&self) -> bool {
        !self.inert && (self.mode == TransitionMode::Wrapping || self.index + 1 < self.slide_count)
    }

    /// Presentation for the current index.
    pub fn frame(&self) -> SlideFrame {
        if self.inert {
            return SlideFrame {
                transform: slide_transform(0.0),
                active_dot: None,
                counter: String::new(),
                prev_enabled: false,
                next_enabled: false,
            };
        }
        SlideFrame {
            transform: slide_transform(-(self.index as f64) * 100.0),
            active_dot: Some(self.index),
            counter: format!("{} of {}", self.index + 1, self.slide_count),
            prev_enabled: self.can_prev(),
            next_enabled: self.can_next(),
        }
    }
}

/// Track transform for a percentage offset of the viewport width.
pub fn slide_transform(percent: f64) -> String {
    format!(
        "translateX({}%)",
        super::scroll_progress::format_px(percent)
    )
}
