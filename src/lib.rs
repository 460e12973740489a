//! sitemotion
//!
//! Headless interaction engine for a static marketing site: the pinned
//! horizontal card track, sliders with drag gestures, header hysteresis, the
//! menu drawer focus trap, lightbox trigger preparation, and the footer year.
//!
//! Pure core / impure shell: `state` holds the interaction state machines as
//! plain transforms; `dom` and `page` apply them to an in-memory document;
//! the remaining modules are the outer surfaces.

pub mod config;
pub mod dom;
pub mod logging;
pub mod model;
pub mod page;
pub mod parser;
pub mod replay;
pub mod source;
pub mod state;
pub mod tools;
pub mod view;
