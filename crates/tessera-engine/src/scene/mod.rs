//! Per-frame draw stream.
//!
//! Responsibilities:
//! - store draw commands as (quad vertices, uniform record) pairs
//! - provide deterministic ordering (z-index + insertion order)
//! - build the session's frame (`compose`)

mod cmd;
mod compose;
mod key;
mod list;

pub use cmd::{DrawCmd, TextureId};
pub use compose::{compose, FrameInputs, BADGE_TEXTURE};
pub use key::{SortKey, ZIndex};
pub use list::{DrawItem, DrawList};
