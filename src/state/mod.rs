//! Pure interaction state machines.
//!
//! Nothing here touches the document. Each module is a transform over plain
//! values so it can be tested and benchmarked in isolation; the controllers
//! in `page` own the node references and apply the results.

pub mod carousel;
pub mod drag;
pub mod focus_trap;
pub mod header;
pub mod scroll_progress;

pub use carousel::{SlideFrame, SliderState, Transition, TransitionMode};
pub use drag::{DragDecision, DragSession, DragThreshold, DragTracker};
pub use header::{HeaderUpdate, HeaderVisibility, HysteresisConfig};
pub use scroll_progress::{progress, translate_x, CARD_GAP_PX, PIN_BREAKPOINT_PX};
