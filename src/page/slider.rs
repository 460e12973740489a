//! Slider controller.
//!
//! Owns the node references of one `[data-slider]` root and its
//! [`SliderState`]. Buttons, dots, arrow keys and drags all commit through the
//! state machine, then [`Slider::render`] writes the frame.

use super::{Component, EventContext, Handled};
use crate::dom::{ComponentId, Document, GeometrySource, ListenTarget, NodeId};
use crate::model::{EventKind, Key, PageEvent};
use crate::state::{DragThreshold, DragTracker, SliderState, TransitionMode};
use tracing::debug;

/// Controller for one slider.
#[derive(Debug, Clone)]
pub struct Slider {
    root: NodeId,
    viewport: NodeId,
    track: NodeId,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    dots: Vec<NodeId>,
    counter: Option<NodeId>,
    state: SliderState,
    drag: DragTracker,
}

impl Slider {
    /// Bind to a slider root. Returns `None`, registering nothing, when the
    /// root lacks a `.slider-viewport` with a `.slider-track` inside.
    ///
    /// `mode` is the explicitly configured policy for this slider.
    pub fn bind(
        doc: &mut Document,
        root: NodeId,
        position: usize,
        mode: TransitionMode,
        threshold: DragThreshold,
    ) -> Option<Self> {
        let viewport = doc.find_first_by_class(root, "slider-viewport")?;
        let track = doc.find_first_by_class(viewport, "slider-track")?;
        let slide_count = doc.find_all_by_class(track, "slide").len();
        let prev = doc.find_first_by_class(root, "slider-prev");
        let next = doc.find_first_by_class(root, "slider-next");
        let dots = doc.find_all_by_class(root, "dot");
        let counter = doc.find_first_by_class(root, "slider-counter");
        let id = doc
            .node(root)
            .id()
            .map(str::to_string)
            .unwrap_or_else(|| format!("slider-{position}"));

        let owner = ComponentId::Slider(position);
        for button in prev.iter().chain(next.iter()).chain(dots.iter()) {
            doc.add_listener(ListenTarget::Node(*button), EventKind::Click, owner);
        }
        doc.add_listener(ListenTarget::Node(root), EventKind::KeyDown, owner);
        for kind in [
            EventKind::PointerDown,
            EventKind::PointerMove,
            EventKind::PointerUp,
            EventKind::PointerCancel,
        ] {
            doc.add_listener(ListenTarget::Node(viewport), kind, owner);
        }

        let slider = Self {
            root,
            viewport,
            track,
            prev,
            next,
            dots,
            counter,
            state: SliderState::new(id, slide_count, mode),
            drag: DragTracker::new(threshold),
        };
        slider.render(doc);
        Some(slider)
    }

    /// Current state.
    pub fn state(&self) -> &SliderState {
        &self.state
    }

    /// Root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Write the current frame.
    pub fn render(&self, doc: &mut Document) {
        let frame = self.state.frame();
        doc.set_style(self.track, "transform", &frame.transform);
        for (i, dot) in self.dots.iter().enumerate() {
            let active = frame.active_dot == Some(i);
            doc.toggle_class(*dot, "active", active);
            if active {
                doc.set_attribute(*dot, "aria-current", "true");
            } else {
                doc.remove_attribute(*dot, "aria-current");
            }
        }
        if let Some(counter) = self.counter {
            doc.set_text(counter, &frame.counter);
        }
        if self.state.mode() == TransitionMode::Bounded {
            set_enabled(doc, self.prev, frame.prev_enabled);
            set_enabled(doc, self.next, frame.next_enabled);
        }
    }

    fn commit(&mut self, doc: &mut Document, delta: i64) {
        let transition = self.state.step(delta);
        debug!(
            slider = self.state.id(),
            from = transition.from,
            to = transition.to,
            "slider step"
        );
        self.render(doc);
    }

    fn select(&mut self, doc: &mut Document, index: usize) {
        let transition = self.state.go_to(index as i64);
        debug!(
            slider = self.state.id(),
            from = transition.from,
            to = transition.to,
            "slider select"
        );
        self.render(doc);
    }

    fn drag_width(&self, doc: &Document) -> f64 {
        let width = doc.bounding_rect(self.viewport).width;
        if width > 0.0 {
            width
        } else {
            doc.viewport().width
        }
    }

    fn on_click(&mut self, doc: &mut Document, target: NodeId) {
        if self.prev.is_some_and(|b| doc.contains(b, target)) {
            self.commit(doc, -1);
        } else if self.next.is_some_and(|b| doc.contains(b, target)) {
            self.commit(doc, 1);
        } else if let Some(i) = self.dots.iter().position(|d| doc.contains(*d, target)) {
            self.select(doc, i);
        }
    }

    fn on_pointer_down(&mut self, doc: &mut Document, pointer_id: i32, x: f64) {
        if self.state.is_inert() {
            return;
        }
        if self.drag.begin(pointer_id, x, self.state.index()) {
            doc.set_pointer_capture(self.viewport, pointer_id);
            doc.set_style(self.track, "transition", "none");
        }
    }

    fn on_pointer_move(&mut self, doc: &mut Document, pointer_id: i32, x: f64) {
        let width = self.drag_width(doc);
        if let Some(preview) = self.drag.update(pointer_id, x, width) {
            doc.set_style(self.track, "transform", &preview);
        }
    }

    fn on_pointer_end(&mut self, doc: &mut Document, pointer_id: i32, x: Option<f64>) {
        let width = self.drag_width(doc);
        let decision = match x {
            Some(x) => self.drag.finish(pointer_id, x, width),
            None => self.drag.cancel(pointer_id, width),
        };
        let Some(decision) = decision else {
            return;
        };
        if let Err(err) = doc.release_pointer_capture(self.viewport, pointer_id) {
            debug!(%err, "pointer capture already released");
        }
        doc.remove_style(self.track, "transition");
        self.commit(doc, decision.delta());
    }
}

fn set_enabled(doc: &mut Document, button: Option<NodeId>, enabled: bool) {
    let Some(button) = button else {
        return;
    };
    if enabled {
        doc.remove_attribute(button, "disabled");
        doc.set_attribute(button, "aria-disabled", "false");
    } else {
        doc.set_attribute(button, "disabled", "");
        doc.set_attribute(button, "aria-disabled", "true");
    }
}

impl Component for Slider {
    fn name(&self) -> &'static str {
        "slider"
    }

    fn handle(&mut self, doc: &mut Document, cx: &EventContext<'_>) -> Handled {
        match cx.event {
            PageEvent::Click { .. } => {
                if let Some(target) = cx.target {
                    self.on_click(doc, target);
                }
            }
            PageEvent::Key { key, .. } => match key {
                Key::ArrowLeft => {
                    self.commit(doc, -1);
                    return Handled::PreventDefault;
                }
                Key::ArrowRight => {
                    self.commit(doc, 1);
                    return Handled::PreventDefault;
                }
                _ => {}
            },
            PageEvent::PointerDown(p) => self.on_pointer_down(doc, p.pointer_id, p.x),
            PageEvent::PointerMove(p) => self.on_pointer_move(doc, p.pointer_id, p.x),
            PageEvent::PointerUp(p) => self.on_pointer_end(doc, p.pointer_id, Some(p.x)),
            PageEvent::PointerCancel(p) => self.on_pointer_end(doc, p.pointer_id, None),
            _ => {}
        }
        Handled::Continue
    }
}

#[cfg(test)]
#[path = "slider_tests.rs"]
mod tests;
