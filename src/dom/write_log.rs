//! Record of presentation writes.
//!
//! Every effective mutation the document performs appends one entry. A write
//! that leaves the value unchanged is not recorded, so an empty log after an
//! event means the event produced no visible change.

use serde::Serialize;

/// One presentation write. Nodes are identified by a resolvable selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DomWrite {
    /// Inline style property set.
    Style {
        /// Target node.
        node: String,
        /// CSS property.
        property: String,
        /// New value.
        value: String,
    },
    /// Inline style property cleared.
    StyleRemoved {
        /// Target node.
        node: String,
        /// CSS property.
        property: String,
    },
    /// Class added.
    ClassAdded {
        /// Target node.
        node: String,
        /// Class name.
        class: String,
    },
    /// Class removed.
    ClassRemoved {
        /// Target node.
        node: String,
        /// Class name.
        class: String,
    },
    /// Attribute set.
    Attribute {
        /// Target node.
        node: String,
        /// Attribute name.
        name: String,
        /// New value.
        value: String,
    },
    /// Attribute removed.
    AttributeRemoved {
        /// Target node.
        node: String,
        /// Attribute name.
        name: String,
    },
    /// Text content replaced.
    Text {
        /// Target node.
        node: String,
        /// New text.
        text: String,
    },
    /// Focus moved.
    Focus {
        /// Newly focused node.
        node: String,
    },
    /// Window scrolled programmatically.
    ScrollBy {
        /// Requested delta.
        dy: f64,
        /// Resulting position after clamping.
        y: f64,
    },
    /// Node moved inside a new wrapper element.
    Wrapped {
        /// Node that was wrapped, labelled before the move.
        node: String,
        /// Tag of the wrapper.
        wrapper: String,
    },
    /// Lightbox library handed the prepared triggers.
    LightboxInit {
        /// Selector the library binds to.
        selector: String,
        /// Number of triggers.
        count: usize,
    },
}

impl DomWrite {
    /// Node label the write applies to, if any.
    pub fn node(&self) -> Option<&str> {
        match self {
            DomWrite::Style { node, .. }
            | DomWrite::StyleRemoved { node, .. }
            | DomWrite::ClassAdded { node, .. }
            | DomWrite::ClassRemoved { node, .. }
            | DomWrite::Attribute { node, .. }
            | DomWrite::AttributeRemoved { node, .. }
            | DomWrite::Text { node, .. }
            | DomWrite::Focus { node }
            | DomWrite::Wrapped { node, .. } => Some(node.as_str()),
            DomWrite::ScrollBy { .. } | DomWrite::LightboxInit { .. } => None,
        }
    }

    /// Whether this is a style write (inline style or class list).
    pub fn is_style(&self) -> bool {
        matches!(
            self,
            DomWrite::Style { .. }
                | DomWrite::StyleRemoved { .. }
                | DomWrite::ClassAdded { .. }
                | DomWrite::ClassRemoved { .. }
        )
    }
}
