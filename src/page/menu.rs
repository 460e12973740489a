//! Mobile menu drawer with a focus trap.

use super::{Component, EventContext, Handled};
use crate::dom::{ComponentId, Document, ListenTarget, NodeId};
use crate::model::{EventKind, Key, PageEvent};
use crate::state::focus_trap::next_focus;
use tracing::debug;

/// Controller for `#mobileOverlay` and its open/close buttons.
#[derive(Debug, Clone)]
pub struct MenuDrawer {
    overlay: NodeId,
    opener: Option<NodeId>,
    closer: Option<NodeId>,
    open: bool,
}

impl MenuDrawer {
    /// Bind to the overlay. Returns `None`, registering nothing, when the page
    /// has no `#mobileOverlay`.
    pub fn bind(doc: &mut Document) -> Option<Self> {
        let overlay = doc.by_id("mobileOverlay")?;
        let opener = doc.by_id("openMenu");
        let closer = doc.by_id("closeMenu");

        let owner = ComponentId::Menu;
        if let Some(button) = opener {
            doc.add_listener(ListenTarget::Node(button), EventKind::Click, owner);
        }
        if let Some(button) = closer {
            doc.add_listener(ListenTarget::Node(button), EventKind::Click, owner);
        }
        doc.add_listener(ListenTarget::Node(overlay), EventKind::Click, owner);
        doc.add_listener(ListenTarget::Node(overlay), EventKind::TransitionEnd, owner);
        doc.add_listener(ListenTarget::Window, EventKind::KeyDown, owner);

        Some(Self {
            overlay,
            opener,
            closer,
            open: false,
        })
    }

    /// Whether the drawer is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The overlay element.
    pub fn overlay(&self) -> NodeId {
        self.overlay
    }

    /// Open the drawer and move focus into it.
    pub fn open(&mut self, doc: &mut Document) {
        self.open = true;
        doc.add_class(self.overlay, "open");
        doc.remove_class(self.overlay, "closing");
        doc.set_attribute(self.overlay, "aria-hidden", "false");
        if let Some(opener) = self.opener {
            doc.set_attribute(opener, "aria-expanded", "true");
        }
        if let Some(first) = doc.focusables(self.overlay).first().copied() {
            doc.focus(first);
        }
        debug!("menu opened");
    }

    /// Close the drawer and return focus to the opener.
    pub fn close(&mut self, doc: &mut Document) {
        self.open = false;
        doc.remove_class(self.overlay, "open");
        doc.add_class(self.overlay, "closing");
        doc.set_attribute(self.overlay, "aria-hidden", "true");
        if let Some(opener) = self.opener {
            doc.set_attribute(opener, "aria-expanded", "false");
            doc.focus(opener);
        }
        debug!("menu closed");
    }

    /// Open when closed, close when open.
    pub fn toggle(&mut self, doc: &mut Document) {
        if self.open {
            self.close(doc);
        } else {
            self.open(doc);
        }
    }

    fn trap_tab(&self, doc: &mut Document, backwards: bool) -> Handled {
        let order = doc.focusables(self.overlay);
        if order.is_empty() {
            return Handled::Continue;
        }
        let current = doc
            .focused()
            .and_then(|f| order.iter().position(|n| *n == f));
        let target = match next_focus(order.len(), current, backwards) {
            Some(i) => i,
            // interior move, kept inside the drawer
            None => match (current, backwards) {
                (Some(i), false) => i + 1,
                (Some(i), true) => i - 1,
                (None, _) => 0,
            },
        };
        if let Some(node) = order.get(target) {
            doc.focus(*node);
        }
        Handled::PreventDefault
    }

    fn on_click(&mut self, doc: &mut Document, target: NodeId) {
        if self.opener.is_some_and(|b| doc.contains(b, target)) {
            self.open(doc);
            return;
        }
        let on_closer = self.closer.is_some_and(|b| doc.contains(b, target));
        // backdrop only; clicks inside the drawer bubble here too
        if self.open && (on_closer || target == self.overlay) {
            self.close(doc);
        }
    }
}

impl Component for MenuDrawer {
    fn name(&self) -> &'static str {
        "menu"
    }

    fn handle(&mut self, doc: &mut Document, cx: &EventContext<'_>) -> Handled {
        match cx.event {
            PageEvent::Click { .. } => {
                if let Some(target) = cx.target {
                    self.on_click(doc, target);
                }
            }
            PageEvent::TransitionEnd { .. } => {
                if cx.target == Some(self.overlay) {
                    doc.remove_class(self.overlay, "closing");
                }
            }
            PageEvent::Key { key, shift, .. } if self.open => match key {
                Key::Escape => self.close(doc),
                Key::Tab => return self.trap_tab(doc, *shift),
                _ => {}
            },
            _ => {}
        }
        Handled::Continue
    }
}
