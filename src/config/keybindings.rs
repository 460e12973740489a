//! Keyboard bindings for the preview.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to preview actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&KeyEvent::new(key.code, key.modifiers)).copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;

        // Page scrolling
        keys.bind(KeyCode::Char('j'), none, KeyAction::ScrollDown);
        keys.bind(KeyCode::Down, none, KeyAction::ScrollDown);
        keys.bind(KeyCode::Char('k'), none, KeyAction::ScrollUp);
        keys.bind(KeyCode::Up, none, KeyAction::ScrollUp);
        keys.bind(KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown);
        keys.bind(KeyCode::PageDown, none, KeyAction::PageDown);
        keys.bind(KeyCode::Char(' '), none, KeyAction::PageDown);
        keys.bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp);
        keys.bind(KeyCode::PageUp, none, KeyAction::PageUp);
        keys.bind(KeyCode::Char('g'), none, KeyAction::ScrollToTop);
        keys.bind(KeyCode::Home, none, KeyAction::ScrollToTop);

        // Sliders and cards
        keys.bind(KeyCode::Char('h'), none, KeyAction::SlidePrev);
        keys.bind(KeyCode::Left, none, KeyAction::SlidePrev);
        keys.bind(KeyCode::Char('l'), none, KeyAction::SlideNext);
        keys.bind(KeyCode::Right, none, KeyAction::SlideNext);
        keys.bind(KeyCode::Char('s'), none, KeyAction::CycleSlider);
        keys.bind(KeyCode::Char('['), none, KeyAction::CardPrev);
        keys.bind(KeyCode::Char(']'), none, KeyAction::CardNext);

        // Menu drawer
        keys.bind(KeyCode::Char('m'), none, KeyAction::ToggleMenu);
        keys.bind(KeyCode::Tab, none, KeyAction::FocusNext);
        keys.bind(KeyCode::BackTab, KeyModifiers::SHIFT, KeyAction::FocusPrev);
        keys.bind(KeyCode::Esc, none, KeyAction::Escape);

        keys.bind(KeyCode::Char('n'), none, KeyAction::ToggleNarrow);

        keys.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn vim_and_arrow_keys_scroll() {
        let keys = KeyBindings::default();
        assert_eq!(
            keys.get(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(KeyAction::ScrollDown)
        );
        assert_eq!(
            keys.get(key(KeyCode::Up, KeyModifiers::NONE)),
            Some(KeyAction::ScrollUp)
        );
    }

    #[test]
    fn shift_tab_moves_focus_backwards() {
        let keys = KeyBindings::default();
        assert_eq!(
            keys.get(key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(KeyAction::FocusPrev)
        );
    }

    #[test]
    fn ctrl_c_quits() {
        let keys = KeyBindings::default();
        assert_eq!(
            keys.get(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(keys.get(key(KeyCode::Char('c'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn every_action_has_a_default_key() {
        let keys = KeyBindings::default();
        let bound: std::collections::HashSet<KeyAction> = keys.bindings.values().copied().collect();
        for action in [
            KeyAction::ScrollDown,
            KeyAction::ScrollUp,
            KeyAction::PageDown,
            KeyAction::PageUp,
            KeyAction::ScrollToTop,
            KeyAction::SlidePrev,
            KeyAction::SlideNext,
            KeyAction::CycleSlider,
            KeyAction::CardPrev,
            KeyAction::CardNext,
            KeyAction::ToggleMenu,
            KeyAction::FocusNext,
            KeyAction::FocusPrev,
            KeyAction::Escape,
            KeyAction::ToggleNarrow,
            KeyAction::Quit,
        ] {
            assert!(bound.contains(&action), "{action:?} has no key");
        }
    }
}
