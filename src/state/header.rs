//! Header show/hide hysteresis.
//!
//! Hiding is eager (any downward scroll past [`HysteresisConfig::hide_after`]),
//! revealing needs a decisive upward scroll, and tiny movements are ignored
//! entirely. The machine owns its `last_scroll_y`; there is no shared state.

/// Thresholds in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HysteresisConfig {
    /// Positions above this always show the header.
    pub top_dead_zone: f64,
    /// Moves smaller than this are ignored.
    pub jitter_band: f64,
    /// Downward scrolling only hides below this position.
    pub hide_after: f64,
    /// Upward delta needed to reveal.
    pub reveal_delta: f64,
}

impl Default for HysteresisConfig {
    fn default() -> Self {
        Self {
            top_dead_zone: 40.0,
            jitter_band: 6.0,
            hide_after: 120.0,
            reveal_delta: 24.0,
        }
    }
}

/// Outcome of feeding one scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderUpdate {
    /// Inside the jitter band; nothing recorded.
    Ignored,
    /// Processed; visibility did not change.
    Unchanged,
    /// Header became visible.
    Shown,
    /// Header became hidden.
    Hidden,
}

impl HeaderUpdate {
    /// Whether the caller needs to write the new visibility.
    pub fn changed(&self) -> bool {
        matches!(self, HeaderUpdate::Shown | HeaderUpdate::Hidden)
    }
}

/// Header visibility state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderVisibility {
    is_hidden: bool,
    last_scroll_y: f64,
    config: HysteresisConfig,
}

impl Default for HeaderVisibility {
    fn default() -> Self {
        Self::new(HysteresisConfig::default())
    }
}

impl HeaderVisibility {
    /// Shown, at the top of the page.
    pub fn new(config: HysteresisConfig) -> Self {
        Self {
            is_hidden: false,
            last_scroll_y: 0.0,
            config,
        }
    }

    /// Whether the header is hidden.
    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    /// Last processed scroll position.
    pub fn last_scroll_y(&self) -> f64 {
        self.last_scroll_y
    }

    /// Apply the transition rules for a new scroll position.
    pub fn update(&mut self, current_y: f64) -> HeaderUpdate {
        let cfg = self.config;

        if current_y < cfg.top_dead_zone {
            self.last_scroll_y = current_y;
            return self.set_hidden(false);
        }

        let delta = current_y - self.last_scroll_y;
        if delta.abs() < cfg.jitter_band {
            return HeaderUpdate::Ignored;
        }

        let outcome = if current_y > cfg.hide_after && delta > 0.0 && !self.is_hidden {
            self.set_hidden(true)
        } else if delta < -cfg.reveal_delta && self.is_hidden {
            self.set_hidden(false)
        } else {
            HeaderUpdate::Unchanged
        };
        self.last_scroll_y = current_y;
        outcome
    }

    fn set_hidden(&mut self, hidden: bool) -> HeaderUpdate {
        if self.is_hidden == hidden {
            return HeaderUpdate::Unchanged;
        }
        self.is_hidden = hidden;
        if hidden {
            HeaderUpdate::Hidden
        } else {
            HeaderUpdate::Shown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(machine: &mut HeaderVisibility, ys: &[f64]) -> Vec<HeaderUpdate> {
        ys.iter().map(|&y| machine.update(y)).collect()
    }

    #[test]
    fn scrolling_down_past_threshold_hides() {
        let mut h = HeaderVisibility::default();
        let updates = feed(&mut h, &[0.0, 50.0, 150.0, 250.0]);
        assert_eq!(
            updates,
            vec![
                HeaderUpdate::Unchanged,
                HeaderUpdate::Unchanged,
                HeaderUpdate::Hidden,
                HeaderUpdate::Unchanged
            ]
        );
        assert!(h.is_hidden());
    }

    #[test]
    fn dead_zone_forces_shown() {
        let mut h = HeaderVisibility::default();
        feed(&mut h, &[0.0, 50.0, 150.0, 250.0]);
        assert_eq!(h.update(20.0), HeaderUpdate::Shown);
        assert!(!h.is_hidden());
        assert_eq!(h.last_scroll_y(), 20.0);
    }

    #[test]
    fn jitter_is_ignored_without_recording_position() {
        let mut h = HeaderVisibility::default();
        feed(&mut h, &[0.0, 50.0, 150.0]);
        assert_eq!(h.update(153.0), HeaderUpdate::Ignored);
        assert_eq!(h.last_scroll_y(), 150.0);
        assert_eq!(h.update(148.0), HeaderUpdate::Ignored);
        assert!(h.is_hidden());
    }

    #[test]
    fn small_upward_scroll_does_not_reveal() {
        let mut h = HeaderVisibility::default();
        feed(&mut h, &[0.0, 50.0, 300.0]);
        assert_eq!(h.update(290.0), HeaderUpdate::Unchanged);
        assert!(h.is_hidden());
        assert_eq!(h.last_scroll_y(), 290.0);
    }

    #[test]
    fn decisive_upward_scroll_reveals() {
        let mut h = HeaderVisibility::default();
        feed(&mut h, &[0.0, 50.0, 300.0]);
        assert_eq!(h.update(270.0), HeaderUpdate::Shown);
        assert!(!h.is_hidden());
    }

    #[test]
    fn downward_scroll_above_hide_threshold_keeps_header() {
        let mut h = HeaderVisibility::default();
        assert_eq!(h.update(100.0), HeaderUpdate::Unchanged);
        assert!(!h.is_hidden());
    }

    #[test]
    fn only_transitions_report_change() {
        assert!(HeaderUpdate::Shown.changed());
        assert!(HeaderUpdate::Hidden.changed());
        assert!(!HeaderUpdate::Unchanged.changed());
        assert!(!HeaderUpdate::Ignored.changed());
    }
}
