//! In-memory document.
//!
//! An arena of [`Node`]s rooted at `body`, plus the window-level state the
//! page components read and write: viewport, scroll position, focus, pointer
//! capture, listener registry, and the write log.

use super::node::{LayoutBox, Node, NodeId};
use super::selector::{Matcher, Selector};
use super::write_log::DomWrite;
use crate::model::{DomError, EventKind, Rect, Viewport, ViewportSample};
use std::collections::HashMap;

/// Layout reads the geometry sampler depends on.
///
/// [`Document`] implements this from its layout boxes; tests substitute a
/// fake provider.
pub trait GeometrySource {
    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Bounding box relative to the viewport.
    fn bounding_rect(&self, node: NodeId) -> Rect;

    /// Content width including overflow.
    fn scroll_width(&self, node: NodeId) -> f64;

    /// Visible content width.
    fn client_width(&self, node: NodeId) -> f64;

    /// Media query `(max-width: {breakpoint}px)`.
    fn is_narrow(&self, breakpoint: f64) -> bool {
        self.viewport().width <= breakpoint
    }

    /// Sample everything the pinned-track mapper needs in one read.
    fn sample(&self, pin: NodeId, track: NodeId) -> ViewportSample {
        let rect = self.bounding_rect(pin);
        ViewportSample {
            element_top: rect.top,
            element_height: rect.height,
            viewport_height: self.viewport().height,
            track_scroll_width: self.scroll_width(track),
            track_client_width: self.client_width(track),
        }
    }
}

/// Identifies the controller that registered a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// Menu drawer.
    Menu,
    /// Header hysteresis.
    Header,
    /// Pinned horizontal track.
    PinnedTrack,
    /// Slider by position in the page's slider list.
    Slider(usize),
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenTarget {
    /// Window: receives every event of its kind.
    Window,
    /// Element: receives events whose target is the element or inside it.
    Node(NodeId),
}

/// One registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    /// Attachment point.
    pub target: ListenTarget,
    /// Event type.
    pub kind: EventKind,
    /// Owning controller.
    pub owner: ComponentId,
}

/// The document tree and window state.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    viewport: Viewport,
    document_height: f64,
    scroll_y: f64,
    pending_scroll: Option<f64>,
    focused: Option<NodeId>,
    captures: HashMap<i32, NodeId>,
    listeners: Vec<Listener>,
    writes: Vec<DomWrite>,
}

impl Document {
    /// Empty document with a `body` root.
    pub fn new(viewport: Viewport, document_height: f64) -> Self {
        let mut body = Node::new("body");
        body.layout = LayoutBox {
            width: viewport.width,
            height: document_height,
            client_width: viewport.width,
            scroll_width: viewport.width,
            ..LayoutBox::default()
        };
        Self {
            nodes: vec![body],
            root: NodeId::new(0),
            viewport,
            document_height,
            scroll_y: 0.0,
            pending_scroll: None,
            focused: None,
            captures: HashMap::new(),
            listeners: Vec::new(),
            writes: Vec::new(),
        }
    }

    // ===== Tree =====

    /// The `body` element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a node.
    ///
    /// # Panics
    /// Panics when `id` was not created by this document.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Number of nodes, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document holds only its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Node::new(tag));
        NodeId::new(self.nodes.len() - 1)
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old) = self.node(child).parent {
            self.node_mut(old).children.retain(|c| *c != child);
        }
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    /// Create an element and append it to `parent`.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let child = self.create_element(tag);
        self.append_child(parent, child);
        child
    }

    /// Replace `node` in its parent with `wrapper` and move `node` inside it.
    pub fn wrap(&mut self, node: NodeId, wrapper: NodeId) -> Result<(), DomError> {
        let parent = self
            .node(node)
            .parent
            .ok_or(DomError::Detached(node.index()))?;
        let label = self.label(node);
        let position = self
            .node(parent)
            .children
            .iter()
            .position(|c| *c == node)
            .ok_or(DomError::Detached(node.index()))?;
        if let Some(old) = self.node(wrapper).parent {
            self.node_mut(old).children.retain(|c| *c != wrapper);
        }
        self.node_mut(parent).children[position] = wrapper;
        self.node_mut(wrapper).parent = Some(parent);
        self.node_mut(node).parent = Some(wrapper);
        self.node_mut(wrapper).children.push(node);
        let wrapper_tag = self.node(wrapper).tag.clone();
        self.writes.push(DomWrite::Wrapped {
            node: label,
            wrapper: wrapper_tag,
        });
        Ok(())
    }

    /// Set the `id` of a node during construction.
    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.node_mut(node).id = Some(id.to_string());
    }

    /// Mutable layout box, for fixtures.
    pub fn layout_mut(&mut self, node: NodeId) -> &mut LayoutBox {
        &mut self.node_mut(node).layout
    }

    /// Ancestors from the parent upwards.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.node(node).parent;
        while let Some(id) = current {
            out.push(id);
            current = self.node(id).parent;
        }
        out
    }

    /// Whether `node` is `ancestor` or lies inside it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).contains(&ancestor)
    }

    /// Whether `node` is attached to the document tree.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(self.root, node)
    }

    /// Descendants in document order, excluding `scope` itself.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(scope).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }

    /// Element with the given `id` attached to the tree.
    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|n| self.node(*n).id.as_deref() == Some(id))
    }

    /// Descendants of `scope` carrying `class`.
    pub fn find_all_by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| self.node(*n).has_class(class))
            .collect()
    }

    /// First descendant of `scope` carrying `class`.
    pub fn find_first_by_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|n| self.node(*n).has_class(class))
    }

    /// Descendants of `scope` with the given tag.
    pub fn find_all_by_tag(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| self.node(*n).tag == tag)
            .collect()
    }

    /// Descendants of `scope` carrying attribute `name`.
    pub fn find_all_with_attribute(&self, scope: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| self.node(*n).attributes.contains_key(name))
            .collect()
    }

    /// Nearest inclusive ancestor carrying `class`.
    pub fn closest_with_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        std::iter::once(node)
            .chain(self.ancestors(node))
            .find(|n| self.node(*n).has_class(class))
    }

    /// Resolve a selector to its first match.
    pub fn resolve(&self, selector: &str) -> Result<NodeId, DomError> {
        self.query_all(selector)?
            .into_iter()
            .next()
            .ok_or_else(|| DomError::UnresolvedTarget(selector.to_string()))
    }

    /// Resolve a selector to all matches in document order.
    pub fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let parsed = Selector::parse(selector)?;
        let mut scopes: Vec<NodeId> = Vec::new();
        for (i, step) in parsed.steps().iter().enumerate() {
            let candidates: Vec<NodeId> = if i == 0 {
                std::iter::once(self.root)
                    .chain(self.descendants(self.root))
                    .collect()
            } else {
                let mut seen = Vec::new();
                for scope in &scopes {
                    for d in self.descendants(*scope) {
                        if !seen.contains(&d) {
                            seen.push(d);
                        }
                    }
                }
                seen
            };
            let mut matched: Vec<NodeId> = candidates
                .into_iter()
                .filter(|n| self.matches(*n, &step.matcher))
                .collect();
            if let Some(nth) = step.nth {
                matched = matched.get(nth).copied().into_iter().collect();
            }
            scopes = matched;
        }
        Ok(scopes)
    }

    fn matches(&self, node: NodeId, matcher: &Matcher) -> bool {
        let n = self.node(node);
        match matcher {
            Matcher::Id(id) => n.id.as_deref() == Some(id.as_str()),
            Matcher::Class(class) => n.has_class(class),
            Matcher::Tag(tag) => n.tag == *tag,
        }
    }

    /// Selector that resolves back to `node`.
    ///
    /// `#id` when the node has one; otherwise the first class (or the tag)
    /// with its index, scoped under the nearest ancestor that has an id.
    pub fn label(&self, node: NodeId) -> String {
        if node == self.root {
            return "body".to_string();
        }
        let n = self.node(node);
        if let Some(id) = &n.id {
            return format!("#{id}");
        }
        let anchor = self
            .ancestors(node)
            .into_iter()
            .find(|a| self.node(*a).id.is_some());
        let scope = anchor.unwrap_or(self.root);
        let step = match n.classes.first() {
            Some(class) => {
                let idx = self
                    .find_all_by_class(scope, class)
                    .iter()
                    .position(|x| *x == node)
                    .unwrap_or(0);
                format!(".{class}[{idx}]")
            }
            None => {
                let idx = self
                    .find_all_by_tag(scope, &n.tag)
                    .iter()
                    .position(|x| *x == node)
                    .unwrap_or(0);
                format!("{}[{idx}]", n.tag)
            }
        };
        match anchor.and_then(|a| self.node(a).id.clone()) {
            Some(id) => format!("#{id} {step}"),
            None => step,
        }
    }

    // ===== Class list, attributes, style, text =====

    /// Whether `node` carries `class`.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).has_class(class)
    }

    /// Add a class; recorded only when it was absent.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        self.node_mut(node).classes.push(class.to_string());
        let label = self.label(node);
        self.writes.push(DomWrite::ClassAdded {
            node: label,
            class: class.to_string(),
        });
    }

    /// Remove a class; recorded only when it was present.
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            return;
        }
        // label before removal so a class-based label still resolves in the log
        let label = self.label(node);
        self.node_mut(node).classes.retain(|c| c != class);
        self.writes.push(DomWrite::ClassRemoved {
            node: label,
            class: class.to_string(),
        });
    }

    /// `classList.toggle(class, force)`.
    pub fn toggle_class(&mut self, node: NodeId, class: &str, force: bool) {
        if force {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    /// Attribute value.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node).attribute(name)
    }

    /// Set an attribute; recorded only when the value changes.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if self.attribute(node, name) == Some(value) {
            return;
        }
        self.node_mut(node)
            .attributes
            .insert(name.to_string(), value.to_string());
        let label = self.label(node);
        self.writes.push(DomWrite::Attribute {
            node: label,
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    /// Remove an attribute; recorded only when it was present.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if self.node_mut(node).attributes.remove(name).is_none() {
            return;
        }
        let label = self.label(node);
        self.writes.push(DomWrite::AttributeRemoved {
            node: label,
            name: name.to_string(),
        });
    }

    /// Inline style value.
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.node(node).style(property)
    }

    /// Set an inline style property; recorded only when the value changes.
    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if self.style(node, property) == Some(value) {
            return;
        }
        self.node_mut(node)
            .style
            .insert(property.to_string(), value.to_string());
        let label = self.label(node);
        self.writes.push(DomWrite::Style {
            node: label,
            property: property.to_string(),
            value: value.to_string(),
        });
    }

    /// Clear an inline style property; recorded only when it was set.
    pub fn remove_style(&mut self, node: NodeId, property: &str) {
        if self.node_mut(node).style.remove(property).is_none() {
            return;
        }
        let label = self.label(node);
        self.writes.push(DomWrite::StyleRemoved {
            node: label,
            property: property.to_string(),
        });
    }

    /// Text content.
    pub fn text(&self, node: NodeId) -> &str {
        self.node(node).text()
    }

    /// Replace text content; recorded only when it changes.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if self.text(node) == text {
            return;
        }
        self.node_mut(node).text = text.to_string();
        let label = self.label(node);
        self.writes.push(DomWrite::Text {
            node: label,
            text: text.to_string(),
        });
    }

    // ===== Focus =====

    /// Focused element.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Move focus; recorded only when it changes.
    pub fn focus(&mut self, node: NodeId) {
        if self.focused == Some(node) {
            return;
        }
        self.focused = Some(node);
        let label = self.label(node);
        self.writes.push(DomWrite::Focus { node: label });
    }

    /// Whether an element takes part in sequential focus navigation.
    pub fn is_focusable(&self, node: NodeId) -> bool {
        let n = self.node(node);
        if n.attributes.contains_key("disabled") {
            return false;
        }
        match n.attribute("tabindex") {
            Some(index) => index.trim() != "-1",
            None => matches!(
                n.tag.as_str(),
                "a" | "button" | "input" | "select" | "textarea"
            ),
        }
    }

    /// Focusable descendants of `scope` in document order.
    pub fn focusables(&self, scope: NodeId) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| self.is_focusable(*n))
            .collect()
    }

    /// Default Tab behaviour: move to the next (or previous) focusable in
    /// the document, wrapping at the ends.
    pub fn focus_step(&mut self, backwards: bool) {
        let order = self.focusables(self.root);
        if order.is_empty() {
            return;
        }
        let current = self
            .focused
            .and_then(|f| order.iter().position(|n| *n == f));
        let next = match (current, backwards) {
            (None, false) => 0,
            (None, true) => order.len() - 1,
            (Some(i), false) => (i + 1) % order.len(),
            (Some(i), true) => (i + order.len() - 1) % order.len(),
        };
        self.focus(order[next]);
    }

    // ===== Pointer capture =====

    /// Route all events of `pointer_id` to `node` until released.
    pub fn set_pointer_capture(&mut self, node: NodeId, pointer_id: i32) {
        self.captures.insert(pointer_id, node);
    }

    /// Node holding capture for `pointer_id`.
    pub fn capture_target(&self, pointer_id: i32) -> Option<NodeId> {
        self.captures.get(&pointer_id).copied()
    }

    /// Release capture. Fails when `node` does not hold it.
    pub fn release_pointer_capture(&mut self, node: NodeId, pointer_id: i32) -> Result<(), DomError> {
        match self.captures.get(&pointer_id) {
            Some(holder) if *holder == node => {
                self.captures.remove(&pointer_id);
                Ok(())
            }
            _ => Err(DomError::CaptureNotHeld {
                node: node.index(),
                pointer_id,
            }),
        }
    }

    /// Drop capture the platform lost (e.g. `lostpointercapture`).
    pub fn lose_pointer_capture(&mut self, pointer_id: i32) {
        self.captures.remove(&pointer_id);
    }

    // ===== Window =====

    /// Current `scrollY`.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Total scrollable height.
    pub fn document_height(&self) -> f64 {
        self.document_height
    }

    /// Largest valid `scrollY`.
    pub fn max_scroll_y(&self) -> f64 {
        (self.document_height - self.viewport.height).max(0.0)
    }

    /// Set the scroll position, clamped to the document. Returns the result.
    pub fn scroll_to(&mut self, y: f64) -> f64 {
        self.scroll_y = y.clamp(0.0, self.max_scroll_y());
        self.scroll_y
    }

    /// Programmatic `window.scrollBy`. Leaves a pending scroll notification
    /// when the position changed.
    pub fn scroll_by(&mut self, dy: f64) {
        let before = self.scroll_y;
        let y = self.scroll_to(before + dy);
        self.writes.push(DomWrite::ScrollBy { dy, y });
        if y != before {
            self.pending_scroll = Some(y);
        }
    }

    /// Take the pending programmatic scroll, if any.
    pub fn take_pending_scroll(&mut self) -> Option<f64> {
        self.pending_scroll.take()
    }

    /// Resize the viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let root = self.root;
        let layout = self.layout_mut(root);
        layout.width = viewport.width;
        layout.client_width = viewport.width;
        layout.scroll_width = viewport.width;
        self.scroll_to(self.scroll_y);
    }

    // ===== Listeners =====

    /// Register a listener.
    pub fn add_listener(&mut self, target: ListenTarget, kind: EventKind, owner: ComponentId) {
        self.listeners.push(Listener {
            target,
            kind,
            owner,
        });
    }

    /// Registered listeners in registration order.
    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Owners to notify for an event, deduplicated, in registration order.
    pub fn owners_for(&self, kind: EventKind, target: Option<NodeId>) -> Vec<ComponentId> {
        let mut owners: Vec<ComponentId> = Vec::new();
        for listener in self.listeners.iter().filter(|l| l.kind == kind) {
            let hit = match (listener.target, target) {
                (ListenTarget::Window, _) => true,
                (ListenTarget::Node(node), Some(t)) => self.contains(node, t),
                (ListenTarget::Node(_), None) => false,
            };
            if hit && !owners.contains(&listener.owner) {
                owners.push(listener.owner);
            }
        }
        owners
    }

    // ===== Write log =====

    /// Writes recorded so far.
    pub fn writes(&self) -> &[DomWrite] {
        &self.writes
    }

    /// Drain the write log.
    pub fn take_writes(&mut self) -> Vec<DomWrite> {
        std::mem::take(&mut self.writes)
    }

    /// Record the lightbox library hand-off.
    pub fn record_lightbox_init(&mut self, selector: &str, count: usize) {
        self.writes.push(DomWrite::LightboxInit {
            selector: selector.to_string(),
            count,
        });
    }
}

impl GeometrySource for Document {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        let layout = self.node(node).layout;
        Rect {
            top: layout.offset_top - self.scroll_y,
            left: layout.offset_left,
            width: layout.width,
            height: layout.height,
        }
    }

    fn scroll_width(&self, node: NodeId) -> f64 {
        self.node(node).layout.scroll_width
    }

    fn client_width(&self, node: NodeId) -> f64 {
        self.node(node).layout.client_width
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
