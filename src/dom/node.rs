//! Document nodes.

use std::collections::BTreeMap;

/// Index of a node in its document's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Wrap a raw arena index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw arena index.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Layout box of a node in document coordinates.
///
/// The document never computes layout; fixtures assign these values and the
/// geometry sampler only reads them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutBox {
    /// Distance from the document top.
    pub offset_top: f64,
    /// Distance from the document left edge.
    pub offset_left: f64,
    /// Border-box width.
    pub width: f64,
    /// Border-box height.
    pub height: f64,
    /// Content width including overflow.
    pub scroll_width: f64,
    /// Visible content width.
    pub client_width: f64,
}

/// One element.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) tag: String,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attributes: BTreeMap<String, String>,
    pub(crate) style: BTreeMap<String, String>,
    pub(crate) text: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Layout read by the geometry sampler.
    pub layout: LayoutBox,
}

impl Node {
    pub(crate) fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            style: BTreeMap::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
            layout: LayoutBox::default(),
        }
    }

    /// Lowercase tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Class list in insertion order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Whether the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Inline style property.
    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    /// Text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parent node.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
