//! Layout and input constants for the preview.

/// Height of the title bar in lines.
pub const TITLE_BAR_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of the header and pinned-track panels (border + one line).
pub const PANEL_HEIGHT: u16 = 3;

/// Height of one slider row (border + one line).
pub const SLIDER_ROW_HEIGHT: u16 = 3;

/// Width percentage of the menu drawer overlay.
pub const DRAWER_WIDTH_PERCENT: u16 = 40;

/// Height percentage of the menu drawer overlay.
pub const DRAWER_HEIGHT_PERCENT: u16 = 60;

/// Pixels per small scroll step (j/k).
pub const SCROLL_STEP_PX: f64 = 80.0;

/// Fraction of the viewport height a page step scrolls.
pub const PAGE_STEP_RATIO: f64 = 0.9;

/// Viewport width used when the narrow toggle is on.
pub const NARROW_WIDTH_PX: f64 = 390.0;

/// Writes kept in the history panel.
pub const WRITE_HISTORY: usize = 200;

/// Pointer id used for mouse drags.
pub const MOUSE_POINTER_ID: i32 = 1;
