//! Editing session: the engine-side state that input and lifecycle calls mutate
//! and that every frame draws.
//!
//! - [`TextDocument`]: multi-line text with caret and selection
//! - [`History`]: bounded undo/redo snapshots
//! - [`Layout`]: screen regions derived from the last frame size
//! - [`Session`]: ties them together with pointer targets, the open panel and
//!   tick-driven state (caret blink, activity)

mod document;
mod history;
mod layout;
mod session;

pub use document::{Snapshot, TextDocument};
pub use history::History;
pub use layout::{Layout, Target, BUTTON_RADIUS, DEFAULT_VIEWPORT};
pub use session::{Gesture, Mode, Session};
