//! Pinned horizontal track driven by vertical scroll.

use super::{Component, EventContext, Handled};
use crate::dom::{ComponentId, Document, GeometrySource, ListenTarget, NodeId};
use crate::model::{EventKind, PageEvent};
use crate::state::scroll_progress::{self, card_scroll_delta, track_transform};
use tracing::debug;

/// Controller for `.jubilee-pin` / `#jubileeTrack`.
#[derive(Debug, Clone)]
pub struct PinnedTrack {
    pin: NodeId,
    track: NodeId,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    breakpoint: f64,
    card_gap: f64,
}

impl PinnedTrack {
    /// Bind to the page. Returns `None`, registering nothing, when either the
    /// pin or the track is missing.
    pub fn bind(doc: &mut Document, breakpoint: f64, card_gap: f64) -> Option<Self> {
        let pin = doc.find_first_by_class(doc.root(), "jubilee-pin")?;
        let track = doc.by_id("jubileeTrack")?;
        let prev = doc.by_id("prevCard");
        let next = doc.by_id("nextCard");

        let owner = ComponentId::PinnedTrack;
        if let Some(button) = prev {
            doc.add_listener(ListenTarget::Node(button), EventKind::Click, owner);
        }
        if let Some(button) = next {
            doc.add_listener(ListenTarget::Node(button), EventKind::Click, owner);
        }
        doc.add_listener(ListenTarget::Window, EventKind::Scroll, owner);
        doc.add_listener(ListenTarget::Window, EventKind::Resize, owner);

        let controller = Self {
            pin,
            track,
            prev,
            next,
            breakpoint,
            card_gap,
        };
        controller.update(doc);
        Some(controller)
    }

    /// Track offset for the current geometry, or `None` on narrow viewports.
    pub fn offset(&self, geometry: &impl GeometrySource) -> Option<f64> {
        if geometry.is_narrow(self.breakpoint) {
            return None;
        }
        let sample = geometry.sample(self.pin, self.track);
        let progress = scroll_progress::progress(&sample);
        Some(scroll_progress::translate_x(progress, &sample))
    }

    /// Read geometry, then write the track transform.
    pub fn update(&self, doc: &mut Document) {
        if let Some(x) = self.offset(&*doc) {
            doc.set_style(self.track, "transform", &track_transform(x));
        }
    }

    /// Scroll the page so the track moves by one card.
    pub fn scroll_by_card(&self, doc: &mut Document, direction: i32) {
        let Some(card) = doc.find_first_by_class(self.track, "jcard") else {
            debug!("pinned track has no cards; ignoring card step");
            return;
        };
        let card_width = doc.bounding_rect(card).width;
        let sample = doc.sample(self.pin, self.track);
        let dy = card_scroll_delta(card_width, self.card_gap, direction, &sample);
        doc.scroll_by(dy);
    }

    /// The track element.
    pub fn track(&self) -> NodeId {
        self.track
    }

    /// The pin element.
    pub fn pin(&self) -> NodeId {
        self.pin
    }
}

impl Component for PinnedTrack {
    fn name(&self) -> &'static str {
        "pinned-track"
    }

    fn handle(&mut self, doc: &mut Document, cx: &EventContext<'_>) -> Handled {
        match cx.event {
            PageEvent::Scroll { .. } | PageEvent::Resize { .. } => self.update(doc),
            PageEvent::Click { .. } => {
                let Some(target) = cx.target else {
                    return Handled::Continue;
                };
                if self.prev.is_some_and(|b| doc.contains(b, target)) {
                    self.scroll_by_card(doc, -1);
                } else if self.next.is_some_and(|b| doc.contains(b, target)) {
                    self.scroll_by_card(doc, 1);
                }
            }
            _ => {}
        }
        Handled::Continue
    }
}
