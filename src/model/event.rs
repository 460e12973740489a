//! Input events delivered to a page.
//!
//! This is the serialized vocabulary of event scripts: one `PageEvent` per
//! JSON line, tagged by `"type"`. Targets are selector strings resolved
//! against the document at dispatch time (see `Document::resolve`).

use serde::{Deserialize, Serialize};

/// A browser-style input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    /// Window scrolled to an absolute vertical position.
    Scroll {
        /// New `scrollY`.
        y: f64,
    },
    /// Window resized.
    Resize {
        /// New inner width.
        width: f64,
        /// New inner height.
        height: f64,
    },
    /// Pointer pressed.
    PointerDown(PointerInput),
    /// Pointer moved.
    PointerMove(PointerInput),
    /// Pointer released.
    PointerUp(PointerInput),
    /// Pointer gesture cancelled by the platform.
    PointerCancel(PointerInput),
    /// Key pressed.
    Key {
        /// Which key.
        key: Key,
        /// Whether Shift was held.
        #[serde(default)]
        shift: bool,
        /// Element receiving the key; the focused element when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<String>,
    },
    /// Element clicked.
    Click {
        /// Clicked element.
        target: String,
    },
    /// CSS transition finished on an element.
    TransitionEnd {
        /// Element whose transition ended.
        target: String,
    },
}

/// Payload shared by all pointer events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    /// Element under the pointer.
    pub target: String,
    /// Platform pointer identifier.
    pub pointer_id: i32,
    /// Horizontal client coordinate.
    pub x: f64,
}

/// Keys the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Closes the menu drawer.
    Escape,
    /// Moves focus; trapped while the drawer is open.
    Tab,
    /// Previous slide when a slider has focus.
    ArrowLeft,
    /// Next slide when a slider has focus.
    ArrowRight,
    /// Activates the focused control.
    Enter,
}

/// Event type used by the listener registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// `scroll`
    Scroll,
    /// `resize`
    Resize,
    /// `pointerdown`
    PointerDown,
    /// `pointermove`
    PointerMove,
    /// `pointerup`
    PointerUp,
    /// `pointercancel`
    PointerCancel,
    /// `keydown`
    KeyDown,
    /// `click`
    Click,
    /// `transitionend`
    TransitionEnd,
}

impl PageEvent {
    /// Registry kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            PageEvent::Scroll { .. } => EventKind::Scroll,
            PageEvent::Resize { .. } => EventKind::Resize,
            PageEvent::PointerDown(_) => EventKind::PointerDown,
            PageEvent::PointerMove(_) => EventKind::PointerMove,
            PageEvent::PointerUp(_) => EventKind::PointerUp,
            PageEvent::PointerCancel(_) => EventKind::PointerCancel,
            PageEvent::Key { .. } => EventKind::KeyDown,
            PageEvent::Click { .. } => EventKind::Click,
            PageEvent::TransitionEnd { .. } => EventKind::TransitionEnd,
        }
    }

    /// Selector of the element the event is aimed at, if it names one.
    pub fn target(&self) -> Option<&str> {
        match self {
            PageEvent::Scroll { .. } | PageEvent::Resize { .. } => None,
            PageEvent::PointerDown(p)
            | PageEvent::PointerMove(p)
            | PageEvent::PointerUp(p)
            | PageEvent::PointerCancel(p) => Some(p.target.as_str()),
            PageEvent::Key { target, .. } => target.as_deref(),
            PageEvent::Click { target } | PageEvent::TransitionEnd { target } => {
                Some(target.as_str())
            }
        }
    }

    /// Pointer payload for pointer events.
    pub fn pointer(&self) -> Option<&PointerInput> {
        match self {
            PageEvent::PointerDown(p)
            | PageEvent::PointerMove(p)
            | PageEvent::PointerUp(p)
            | PageEvent::PointerCancel(p) => Some(p),
            _ => None,
        }
    }
}
