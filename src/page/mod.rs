//! Component controllers and the page that wires them to a document.
//!
//! Each controller binds to its root elements (or declines to, registering
//! nothing, when they are absent), owns its node references and state, and
//! reacts to events routed to it through the document's listener registry.
//! [`Page`] binds them in a fixed order and dispatches events.

pub mod footer;
pub mod header;
pub mod lightbox;
pub mod menu;
pub mod pinned_track;
pub mod slider;

pub use footer::FooterYear;
pub use header::HeaderController;
pub use lightbox::{LightboxBinder, LightboxReport};
pub use menu::MenuDrawer;
pub use pinned_track::PinnedTrack;
pub use slider::Slider;

use crate::dom::{ComponentId, Document, NodeId};
use crate::model::{DomError, Key, PageEvent, Viewport};
use crate::state::{DragThreshold, HysteresisConfig, TransitionMode, CARD_GAP_PX, PIN_BREAKPOINT_PX};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Whether a component suppressed the event's default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Let the default action run.
    Continue,
    /// `preventDefault()`.
    PreventDefault,
}

/// An event as delivered to one component.
#[derive(Debug, Clone, Copy)]
pub struct EventContext<'a> {
    /// The event.
    pub event: &'a PageEvent,
    /// Resolved target; `None` for window events.
    pub target: Option<NodeId>,
}

/// A bound controller.
pub trait Component {
    /// Short name for diagnostics.
    fn name(&self) -> &'static str;

    /// React to an event this component registered for.
    fn handle(&mut self, doc: &mut Document, cx: &EventContext<'_>) -> Handled;
}

/// Tunables the controllers are bound with.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOptions {
    /// Width at or below which the pinned track is disabled.
    pub breakpoint: f64,
    /// Gap between pinned cards.
    pub card_gap: f64,
    /// Header thresholds.
    pub hysteresis: HysteresisConfig,
    /// Drag commit threshold.
    pub drag: DragThreshold,
    /// Slider policy when neither markup nor config names one.
    pub default_slider_mode: TransitionMode,
    /// Per-slider-id policy overrides.
    pub slider_modes: HashMap<String, TransitionMode>,
    /// Fixed footer year; the local clock when `None`.
    pub year: Option<i32>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            breakpoint: PIN_BREAKPOINT_PX,
            card_gap: CARD_GAP_PX,
            hysteresis: HysteresisConfig::default(),
            drag: DragThreshold::default(),
            default_slider_mode: TransitionMode::default(),
            slider_modes: HashMap::new(),
            year: None,
        }
    }
}

impl PageOptions {
    /// Policy for a slider: config override, then markup, then the default.
    pub fn slider_mode(&self, id: Option<&str>, attribute: Option<&str>) -> TransitionMode {
        id.and_then(|id| self.slider_modes.get(id).copied())
            .or_else(|| attribute.and_then(TransitionMode::from_attribute))
            .unwrap_or(self.default_slider_mode)
    }
}

/// What one dispatch did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchOutcome {
    /// Components notified, in order, including follow-up events.
    pub handled_by: Vec<&'static str>,
    /// Whether a component suppressed the default action.
    pub default_prevented: bool,
    /// Events synthesized by the page (activation clicks, scroll notifications).
    pub follow_ups: Vec<PageEvent>,
}

/// A document with every controller bound to it.
#[derive(Debug, Clone)]
pub struct Page {
    document: Document,
    menu: Option<MenuDrawer>,
    footer: Option<FooterYear>,
    header: Option<HeaderController>,
    pinned: Option<PinnedTrack>,
    sliders: Vec<Slider>,
    lightbox: Option<LightboxReport>,
}

impl Page {
    /// Bind every controller: menu, footer year, header, pinned track,
    /// sliders in document order, then lightbox triggers.
    pub fn bind(mut document: Document, options: &PageOptions) -> Self {
        let menu = MenuDrawer::bind(&mut document);
        let footer = FooterYear::bind(&mut document, options.year);
        let header = HeaderController::bind(&mut document, options.hysteresis);
        let pinned = PinnedTrack::bind(&mut document, options.breakpoint, options.card_gap);

        let roots = document.find_all_with_attribute(document.root(), "data-slider");
        let mut sliders = Vec::with_capacity(roots.len());
        for root in roots {
            let mode = options.slider_mode(
                document.node(root).id(),
                document.attribute(root, "data-slider-mode"),
            );
            let position = sliders.len();
            if let Some(slider) = Slider::bind(&mut document, root, position, mode, options.drag) {
                sliders.push(slider);
            }
        }

        let lightbox = match LightboxBinder::bind(&mut document) {
            Ok(report) => Some(report),
            Err(err) => {
                warn!(%err, "lightbox setup failed; galleries stay plain");
                None
            }
        };

        info!(
            menu = menu.is_some(),
            header = header.is_some(),
            pinned = pinned.is_some(),
            sliders = sliders.len(),
            listeners = document.listener_count(),
            "page bound"
        );

        Self {
            document,
            menu,
            footer,
            header,
            pinned,
            sliders,
            lightbox,
        }
    }

    /// Deliver one event.
    ///
    /// Owners are called once each in listener-registration order. Default
    /// actions that were not prevented run afterwards, and any programmatic
    /// scroll is delivered as a follow-up `Scroll` event.
    pub fn dispatch(&mut self, event: &PageEvent) -> Result<DispatchOutcome, DomError> {
        let mut outcome = DispatchOutcome::default();
        let target = self.resolve_target(event)?;
        self.apply_window_state(event);
        outcome.default_prevented = self.notify(event, target, &mut outcome.handled_by);

        if !outcome.default_prevented {
            if let Some(click) = self.run_default_action(event, target) {
                outcome.follow_ups.push(click.clone());
                self.notify(&click, target, &mut outcome.handled_by);
            }
        }

        while let Some(y) = self.document.take_pending_scroll() {
            let scroll = PageEvent::Scroll { y };
            outcome.follow_ups.push(scroll.clone());
            self.notify(&scroll, None, &mut outcome.handled_by);
        }
        Ok(outcome)
    }

    fn resolve_target(&self, event: &PageEvent) -> Result<Option<NodeId>, DomError> {
        if let Some(pointer) = event.pointer() {
            if let Some(holder) = self.document.capture_target(pointer.pointer_id) {
                return Ok(Some(holder));
            }
        }
        match (event, event.target()) {
            (_, Some(selector)) => self.document.resolve(selector).map(Some),
            (PageEvent::Key { .. }, None) => Ok(Some(
                self.document.focused().unwrap_or(self.document.root()),
            )),
            _ => Ok(None),
        }
    }

    fn apply_window_state(&mut self, event: &PageEvent) {
        match event {
            PageEvent::Scroll { y } => {
                self.document.scroll_to(*y);
            }
            PageEvent::Resize { width, height } => self.document.set_viewport(Viewport {
                width: *width,
                height: *height,
            }),
            _ => {}
        }
    }

    /// Call each owner once. Returns whether any prevented the default.
    fn notify(
        &mut self,
        event: &PageEvent,
        target: Option<NodeId>,
        handled_by: &mut Vec<&'static str>,
    ) -> bool {
        let owners = self.document.owners_for(event.kind(), target);
        let cx = EventContext { event, target };
        let mut prevented = false;
        for owner in owners {
            let document = &mut self.document;
            let component: Option<&mut dyn Component> = match owner {
                ComponentId::Menu => self.menu.as_mut().map(|c| c as &mut dyn Component),
                ComponentId::Header => self.header.as_mut().map(|c| c as &mut dyn Component),
                ComponentId::PinnedTrack => {
                    self.pinned.as_mut().map(|c| c as &mut dyn Component)
                }
                ComponentId::Slider(i) => {
                    self.sliders.get_mut(i).map(|c| c as &mut dyn Component)
                }
            };
            let Some(component) = component else {
                continue;
            };
            handled_by.push(component.name());
            if component.handle(document, &cx) == Handled::PreventDefault {
                prevented = true;
            }
        }
        prevented
    }

    /// Browser default actions the page models: Tab moves focus, Enter on a
    /// focused control activates it.
    fn run_default_action(&mut self, event: &PageEvent, target: Option<NodeId>) -> Option<PageEvent> {
        let PageEvent::Key { key, shift, .. } = event else {
            return None;
        };
        match key {
            Key::Tab => {
                self.document.focus_step(*shift);
                None
            }
            Key::Enter => {
                let node = target?;
                let tag = self.document.node(node).tag();
                if tag == "button" || tag == "a" {
                    debug!(node = %self.document.label(node), "enter activates control");
                    Some(PageEvent::Click {
                        target: self.document.label(node),
                    })
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Move focus directly, as a pointer click on a focusable would.
    pub fn focus(&mut self, node: NodeId) {
        self.document.focus(node);
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The document, mutably.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Menu drawer, when bound.
    pub fn menu(&self) -> Option<&MenuDrawer> {
        self.menu.as_ref()
    }

    /// Footer year, when bound.
    pub fn footer(&self) -> Option<&FooterYear> {
        self.footer.as_ref()
    }

    /// Header controller, when bound.
    pub fn header(&self) -> Option<&HeaderController> {
        self.header.as_ref()
    }

    /// Pinned track, when bound.
    pub fn pinned(&self) -> Option<&PinnedTrack> {
        self.pinned.as_ref()
    }

    /// Bound sliders in document order.
    pub fn sliders(&self) -> &[Slider] {
        &self.sliders
    }

    /// Lightbox pass result; `None` when it failed.
    pub fn lightbox(&self) -> Option<&LightboxReport> {
        self.lightbox.as_ref()
    }
}

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;
