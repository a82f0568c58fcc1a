//! Pointer-driven manipulation
//!
//! Selection, translation and rotation of elements. The
//! [`InteractionContext`] holds the session-wide state the viewport host
//! observes (selection, orbit suspension); the [`Manipulator`] owns each
//! element's [`GestureState`] and turns pointer events into transform
//! updates on the update tick.

mod context;
mod gesture;
mod manipulator;
mod picking;

pub use context::InteractionContext;
pub use gesture::{GestureState, PointerEvent, PointerTarget, TransformCommit};
pub use manipulator::Manipulator;
pub use picking::{pick, GROUND_HALF_EXTENT, GROUND_HEIGHT, GROUND_NAME};
