use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;

use super::{Uniform, UniformKind};

/// Background grid overlay.
///
/// Layout (24 bytes):
///
///  offset  0  screen_size  [f32; 2]
///  offset  8  offset       [f32; 2] (pan, pixels)
///  offset 16  grid_size    f32 (cell size before zoom)
///  offset 20  scale        f32 (zoom)
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct GridUniform {
    pub screen_size: [f32; 2],
    pub offset: [f32; 2],
    pub grid_size: f32,
    pub scale: f32,
}

impl GridUniform {
    pub fn new(screen_size: Vec2, offset: Vec2, grid_size: f32, scale: f32) -> Self {
        Self {
            screen_size: screen_size.to_array(),
            offset: offset.to_array(),
            grid_size,
            scale,
        }
    }

    /// On-screen cell size in pixels.
    #[inline]
    pub fn cell_pixels(&self) -> f32 {
        self.grid_size * self.scale
    }
}

impl Uniform for GridUniform {
    const KIND: UniformKind = UniformKind::Grid;
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::offset_of;

    #[test]
    fn layout_offsets() {
        assert_eq!(offset_of!(GridUniform, screen_size), 0);
        assert_eq!(offset_of!(GridUniform, offset), 8);
        assert_eq!(offset_of!(GridUniform, grid_size), 16);
        assert_eq!(offset_of!(GridUniform, scale), 20);
    }
}
