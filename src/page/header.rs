//! Site header show/hide on scroll.

use super::{Component, EventContext, Handled};
use crate::dom::{ComponentId, Document, ListenTarget, NodeId};
use crate::model::{EventKind, PageEvent};
use crate::state::{HeaderUpdate, HeaderVisibility, HysteresisConfig};
use tracing::debug;

/// Class written while the header is hidden.
pub const HIDDEN_CLASS: &str = "is-hidden";

/// Controller for `.site-header`.
#[derive(Debug, Clone)]
pub struct HeaderController {
    header: NodeId,
    visibility: HeaderVisibility,
}

impl HeaderController {
    /// Bind to the first `.site-header`. Returns `None`, registering nothing,
    /// when the page has none.
    pub fn bind(doc: &mut Document, config: HysteresisConfig) -> Option<Self> {
        let header = doc.find_first_by_class(doc.root(), "site-header")?;
        doc.add_listener(ListenTarget::Window, EventKind::Scroll, ComponentId::Header);
        Some(Self {
            header,
            visibility: HeaderVisibility::new(config),
        })
    }

    /// Whether the header is currently hidden.
    pub fn is_hidden(&self) -> bool {
        self.visibility.is_hidden()
    }

    /// Feed a scroll position and write the class on a state change.
    pub fn on_scroll(&mut self, doc: &mut Document, y: f64) -> HeaderUpdate {
        let update = self.visibility.update(y);
        if update.changed() {
            debug!(y, hidden = self.visibility.is_hidden(), "header visibility");
            doc.toggle_class(self.header, HIDDEN_CLASS, self.visibility.is_hidden());
        }
        update
    }
}

impl Component for HeaderController {
    fn name(&self) -> &'static str {
        "header"
    }

    fn handle(&mut self, doc: &mut Document, cx: &EventContext<'_>) -> Handled {
        if let PageEvent::Scroll { .. } = cx.event {
            let y = doc.scroll_y();
            self.on_scroll(doc, y);
        }
        Handled::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::DomWrite;
    use crate::model::Viewport;

    fn page() -> (Document, HeaderController) {
        let mut doc = Document::new(Viewport::default(), 5000.0);
        let root = doc.root();
        let header = doc.append(root, "header");
        doc.add_class(header, "site-header");
        doc.take_writes();
        let controller = HeaderController::bind(&mut doc, HysteresisConfig::default()).unwrap();
        (doc, controller)
    }

    #[test]
    fn hides_then_reveals_with_one_write_each() {
        let (mut doc, mut header) = page();
        for y in [50.0, 150.0, 250.0, 400.0] {
            header.on_scroll(&mut doc, y);
        }
        assert!(header.is_hidden());
        header.on_scroll(&mut doc, 370.0);
        assert!(!header.is_hidden());
        assert_eq!(
            doc.take_writes(),
            vec![
                DomWrite::ClassAdded {
                    node: ".site-header[0]".to_string(),
                    class: HIDDEN_CLASS.to_string(),
                },
                DomWrite::ClassRemoved {
                    node: ".site-header[0]".to_string(),
                    class: HIDDEN_CLASS.to_string(),
                },
            ]
        );
    }

    #[test]
    fn jitter_produces_no_writes() {
        let (mut doc, mut header) = page();
        header.on_scroll(&mut doc, 300.0);
        doc.take_writes();
        for y in [302.0, 299.0, 303.0] {
            assert_eq!(header.on_scroll(&mut doc, y), HeaderUpdate::Ignored);
        }
        assert!(doc.writes().is_empty());
    }

    #[test]
    fn missing_header_registers_nothing() {
        let mut doc = Document::new(Viewport::default(), 5000.0);
        assert!(HeaderController::bind(&mut doc, HysteresisConfig::default()).is_none());
        assert_eq!(doc.listener_count(), 0);
    }
}
