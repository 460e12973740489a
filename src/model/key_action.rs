//! Domain-level keyboard actions for the terminal preview.

/// Preview actions independent of the physical key that triggers them.
///
/// The mapping from `crossterm::event::KeyEvent` to `KeyAction` lives in
/// `config::KeyBindings`. Each action is translated into one or more
/// `PageEvent`s by the preview, so the page sees the same input vocabulary a
/// replay script would produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Page scrolling
    /// Scroll the page down a small step. Default: j/↓
    ScrollDown,
    /// Scroll the page up a small step. Default: k/↑
    ScrollUp,
    /// Scroll down one viewport. Default: Ctrl+d/Page Down/Space
    PageDown,
    /// Scroll up one viewport. Default: Ctrl+u/Page Up
    PageUp,
    /// Jump to the top of the page. Default: g/Home
    ScrollToTop,

    // Sliders
    /// Previous slide in the focused slider. Default: h/←
    SlidePrev,
    /// Next slide in the focused slider. Default: l/→
    SlideNext,
    /// Move slider focus to the next slider on the page. Default: s
    CycleSlider,
    /// Previous card on the pinned track. Default: [
    CardPrev,
    /// Next card on the pinned track. Default: ]
    CardNext,

    // Menu drawer
    /// Open or close the menu drawer. Default: m
    ToggleMenu,
    /// Move focus forward (trapped in the open drawer). Default: Tab
    FocusNext,
    /// Move focus backward (trapped in the open drawer). Default: Shift+Tab
    FocusPrev,
    /// Escape key. Default: Esc
    Escape,

    // Viewport
    /// Switch between the fixture width and a narrow mobile width. Default: n
    ToggleNarrow,

    // Application
    /// Exit the preview. Default: q/Ctrl+c
    Quit,
}
