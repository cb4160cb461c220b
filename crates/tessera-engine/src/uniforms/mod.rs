//! Uniform Layout Set.
//!
//! One fixed-size record per drawable primitive class. A shading stage (the
//! host's GPU shaders, or [`crate::raster`] on the CPU) addresses these fields
//! by byte offset, never by name, so the layouts are part of the ABI:
//!
//! - every field is 32 bits wide (`f32`, booleans are `u32` 0/1)
//! - `#[repr(C)]`, field order fixed, no padding (every member is 4-byte aligned)
//! - offsets are pinned by the layout tests in each record module
//!
//! The C mirror lives in `tessera-ffi/include/tessera.h`.

mod disc;
mod grid;
mod rounded_box;
mod text;
mod texture;
mod vertex;

#[cfg(feature = "gpu")]
pub mod gpu;

pub use disc::DiscUniform;
pub use grid::GridUniform;
pub use rounded_box::BoxUniform;
pub use text::TextUniform;
pub use texture::TextureUniform;
pub use vertex::{quad, Quad, VertexUniform, QUAD_INDICES};

use bytemuck::Pod;

/// Primitive class of a uniform record.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UniformKind {
    Vertex,
    Texture,
    Disc,
    Box,
    Text,
    Grid,
}

/// A uniform record that can be handed to a shading stage as raw bytes.
pub trait Uniform: Pod {
    const KIND: UniformKind;

    /// Record size in bytes.
    const SIZE: usize = core::mem::size_of::<Self>();

    /// Exact bytes the shading stage reads.
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Encodes a flag the way uniform records store it.
#[inline]
pub const fn bool32(v: bool) -> u32 {
    v as u32
}
