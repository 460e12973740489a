//! In-memory document model.
//!
//! Stands in for the browser DOM: a node tree with classes, attributes,
//! inline style, text, and assigned layout boxes, plus window state (viewport,
//! scroll, focus, pointer capture) and a listener registry. Every effective
//! presentation write is appended to a write log.

pub mod document;
pub mod fixture;
pub mod node;
pub mod selector;
pub mod write_log;

pub use document::{ComponentId, Document, GeometrySource, ListenTarget, Listener};
pub use fixture::PageFixture;
pub use node::{LayoutBox, Node, NodeId};
pub use write_log::DomWrite;
