//! Geometry types shared by layout, the draw list and the shading stage.
//!
//! Canonical CPU space:
//! - pixels of the host-supplied buffer
//! - origin top-left
//! - +X right, +Y down

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
