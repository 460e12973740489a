//! Domain model types (pure).
//!
//! Plain values shared by the pure core, the document, and the shell.

pub mod error;
pub mod event;
pub mod geometry;
pub mod key_action;

// Re-export for convenience
pub use error::{AppError, DomError, FixtureError, ParseError, ScriptError};
pub use event::{EventKind, Key, PageEvent, PointerInput};
pub use geometry::{Progress, Rect, Viewport, ViewportSample};
pub use key_action::KeyAction;
