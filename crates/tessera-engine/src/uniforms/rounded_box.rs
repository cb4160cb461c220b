use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Vec2};
use crate::paint::Color;

use super::{bool32, Uniform, UniformKind};

/// Rounded box with border, rotation, onion, mirroring, texture and checker
/// pattern.
///
/// Layout (100 bytes):
///
///  offset  0  screen_size    [f32; 2]
///  offset  8  position       [f32; 2]
///  offset 16  size           [f32; 2]
///  offset 24  corner_radius  f32
///  offset 28  border_size    f32
///  offset 32  fill_color     [f32; 4]
///  offset 48  border_color   [f32; 4]
///  offset 64  rotation       f32 (radians)
///  offset 68  onion          f32 in [0, 1]
///  offset 72  mirror_x       u32 (0/1)
///  offset 76  mirror_y       u32 (0/1)
///  offset 80  has_texture    u32 (0/1)
///  offset 84  texture_size   [f32; 2]
///  offset 92  checker_size   [f32; 2] (zero disables the pattern)
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct BoxUniform {
    pub screen_size: [f32; 2],
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub corner_radius: f32,
    pub border_size: f32,
    pub fill_color: [f32; 4],
    pub border_color: [f32; 4],
    pub rotation: f32,
    pub onion: f32,
    pub mirror_x: u32,
    pub mirror_y: u32,
    pub has_texture: u32,
    pub texture_size: [f32; 2],
    pub checker_size: [f32; 2],
}

impl BoxUniform {
    /// Sharp, borderless box filling `rect`.
    pub fn new(screen_size: Vec2, rect: Rect, fill: Color) -> Self {
        Self {
            screen_size: screen_size.to_array(),
            position: rect.origin.to_array(),
            size: rect.size.to_array(),
            fill_color: fill.to_array(),
            ..Self::zeroed()
        }
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius.max(0.0);
        self
    }

    pub fn with_border(mut self, size: f32, color: Color) -> Self {
        self.border_size = size.max(0.0);
        self.border_color = color.to_array();
        self
    }

    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    /// Hollow factor: 0 is solid, 1 leaves only the border.
    pub fn with_onion(mut self, onion: f32) -> Self {
        self.onion = onion.clamp(0.0, 1.0);
        self
    }

    pub fn with_mirror(mut self, x: bool, y: bool) -> Self {
        self.mirror_x = bool32(x);
        self.mirror_y = bool32(y);
        self
    }

    pub fn with_texture(mut self, texture_size: Vec2) -> Self {
        self.has_texture = bool32(true);
        self.texture_size = texture_size.to_array();
        self
    }

    /// Alternating checker cells of `size` pixels tinting the fill.
    pub fn with_checker(mut self, size: Vec2) -> Self {
        self.checker_size = size.max(Vec2::zero()).to_array();
        self
    }

    #[inline]
    pub fn is_textured(&self) -> bool {
        self.has_texture != 0
    }
}

impl Uniform for BoxUniform {
    const KIND: UniformKind = UniformKind::Box;
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::offset_of;

    #[test]
    fn layout_offsets() {
        assert_eq!(offset_of!(BoxUniform, screen_size), 0);
        assert_eq!(offset_of!(BoxUniform, position), 8);
        assert_eq!(offset_of!(BoxUniform, size), 16);
        assert_eq!(offset_of!(BoxUniform, corner_radius), 24);
        assert_eq!(offset_of!(BoxUniform, border_size), 28);
        assert_eq!(offset_of!(BoxUniform, fill_color), 32);
        assert_eq!(offset_of!(BoxUniform, border_color), 48);
        assert_eq!(offset_of!(BoxUniform, rotation), 64);
        assert_eq!(offset_of!(BoxUniform, onion), 68);
        assert_eq!(offset_of!(BoxUniform, mirror_x), 72);
        assert_eq!(offset_of!(BoxUniform, mirror_y), 76);
        assert_eq!(offset_of!(BoxUniform, has_texture), 80);
        assert_eq!(offset_of!(BoxUniform, texture_size), 84);
        assert_eq!(offset_of!(BoxUniform, checker_size), 92);
    }

    #[test]
    fn negative_inputs_are_clamped() {
        let rect = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = BoxUniform::new(Vec2::new(1.0, 1.0), rect, Color::transparent())
            .with_corner_radius(-3.0)
            .with_border(-1.0, Color::transparent())
            .with_checker(Vec2::new(-4.0, 2.0));
        assert_eq!(b.corner_radius, 0.0);
        assert_eq!(b.border_size, 0.0);
        assert_eq!(b.checker_size, [0.0, 2.0]);
    }
}
