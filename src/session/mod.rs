//! Placement sessions
//!
//! A session starts when a reticle is handed to [`PlacementCanvas::start_session`]
//! and ends when the user confirms or cancels, or when the reticle's `in_flight`
//! flag is cleared from outside. The returned [`PlacementHandle`] resolves with
//! the finished reticle.

pub mod canvas;
pub mod controller;
pub mod handle;
pub mod input;

pub use canvas::PlacementCanvas;
pub use controller::{LayerId, SessionController, Transition, MOVE_THROTTLE};
pub use handle::PlacementHandle;
pub use input::{InputEvent, ListenerKind, ListenerRegistry, Modifiers, PointerButton};
