//! Key actions to page events.
//!
//! The preview never pokes controllers directly: each action becomes the
//! same `PageEvent`s a replay script would contain, so what the preview shows
//! is what a script would record.

use super::constants::{NARROW_WIDTH_PX, PAGE_STEP_RATIO, SCROLL_STEP_PX};
use crate::dom::{GeometrySource, NodeId};
use crate::model::{Key, KeyAction, PageEvent, Viewport};
use crate::page::Page;

/// Preview-side state the translation depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionContext {
    /// Slider receiving slide keys, by position.
    pub focused_slider: Option<usize>,
    /// Whether the narrow viewport is active.
    pub narrow: bool,
    /// Viewport the fixture declared.
    pub base_viewport: Viewport,
}

/// Events an action produces. Actions handled by the preview itself
/// (`CycleSlider`, `Quit`) produce none.
pub fn events_for_action(action: KeyAction, page: &Page, cx: &ActionContext) -> Vec<PageEvent> {
    let doc = page.document();
    let y = doc.scroll_y();
    let height = doc.viewport().height;

    let event = match action {
        KeyAction::ScrollDown => PageEvent::Scroll {
            y: y + SCROLL_STEP_PX,
        },
        KeyAction::ScrollUp => PageEvent::Scroll {
            y: (y - SCROLL_STEP_PX).max(0.0),
        },
        KeyAction::PageDown => PageEvent::Scroll {
            y: y + height * PAGE_STEP_RATIO,
        },
        KeyAction::PageUp => PageEvent::Scroll {
            y: (y - height * PAGE_STEP_RATIO).max(0.0),
        },
        KeyAction::ScrollToTop => PageEvent::Scroll { y: 0.0 },
        KeyAction::SlidePrev | KeyAction::SlideNext => {
            let Some(root) = focused_root(page, cx) else {
                return Vec::new();
            };
            let key = if action == KeyAction::SlidePrev {
                Key::ArrowLeft
            } else {
                Key::ArrowRight
            };
            PageEvent::Key {
                key,
                shift: false,
                target: Some(doc.label(root)),
            }
        }
        KeyAction::CardPrev | KeyAction::CardNext => {
            let id = if action == KeyAction::CardPrev {
                "prevCard"
            } else {
                "nextCard"
            };
            if doc.by_id(id).is_none() {
                return Vec::new();
            }
            PageEvent::Click {
                target: format!("#{id}"),
            }
        }
        KeyAction::ToggleMenu => {
            let open = page.menu().is_some_and(|m| m.is_open());
            let id = if open { "closeMenu" } else { "openMenu" };
            if doc.by_id(id).is_none() {
                return Vec::new();
            }
            PageEvent::Click {
                target: format!("#{id}"),
            }
        }
        KeyAction::FocusNext | KeyAction::FocusPrev => PageEvent::Key {
            key: Key::Tab,
            shift: action == KeyAction::FocusPrev,
            target: None,
        },
        KeyAction::Escape => PageEvent::Key {
            key: Key::Escape,
            shift: false,
            target: None,
        },
        KeyAction::ToggleNarrow => {
            let width = if cx.narrow {
                cx.base_viewport.width
            } else {
                NARROW_WIDTH_PX
            };
            PageEvent::Resize {
                width,
                height: cx.base_viewport.height,
            }
        }
        KeyAction::CycleSlider | KeyAction::Quit => return Vec::new(),
    };
    vec![event]
}

fn focused_root(page: &Page, cx: &ActionContext) -> Option<NodeId> {
    page.sliders().get(cx.focused_slider?).map(|s| s.root())
}

/// Next slider position when cycling focus, wrapping after the last.
pub fn next_slider(current: Option<usize>, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    Some(current.map_or(0, |i| (i + 1) % count))
}
