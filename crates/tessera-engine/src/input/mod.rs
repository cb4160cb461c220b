//! Input subsystem.
//!
//! Public API is host-agnostic. The boundary translates raw host callbacks
//! (pointer, wheel, text, named keys) into `InputEvent`s; `InputState` tracks
//! the pointer gesture lifecycle so out-of-order events are rejected instead of
//! corrupting session state.

mod state;
mod types;

pub use state::InputState;
pub use types::{InputEvent, KeyCode, PointerEvent, TextEvent, UnknownKeyCode, WheelDelta};
