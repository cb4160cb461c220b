use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::paint::Color;

use super::{bool32, Uniform, UniformKind};

/// Filled disc, optionally bordered, hollow (onion) or textured.
///
/// The disc is centered in the quad it is drawn with; the record carries no
/// position of its own.
///
/// Layout (60 bytes):
///
///  offset  0  fill_color    [f32; 4]
///  offset 16  border_color  [f32; 4]
///  offset 32  radius        f32
///  offset 36  border_size   f32
///  offset 40  rotation      f32 (radians)
///  offset 44  onion         f32 in [0, 1]
///  offset 48  has_texture   u32 (0/1)
///  offset 52  texture_size  [f32; 2]
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct DiscUniform {
    pub fill_color: [f32; 4],
    pub border_color: [f32; 4],
    pub radius: f32,
    pub border_size: f32,
    pub rotation: f32,
    pub onion: f32,
    pub has_texture: u32,
    pub texture_size: [f32; 2],
}

impl DiscUniform {
    pub fn new(radius: f32, fill: Color) -> Self {
        Self {
            fill_color: fill.to_array(),
            radius: radius.max(0.0),
            ..Self::zeroed()
        }
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

    /// Hollow-ring factor: 0 is a solid disc, 1 leaves only the border.
    pub fn with_onion(mut self, onion: f32) -> Self {
        self.onion = onion.clamp(0.0, 1.0);
        self
    }

    pub fn with_texture(mut self, texture_size: Vec2) -> Self {
        self.has_texture = bool32(true);
        self.texture_size = texture_size.to_array();
        self
    }

    #[inline]
    pub fn is_textured(&self) -> bool {
        self.has_texture != 0
    }
}

impl Uniform for DiscUniform {
    const KIND: UniformKind = UniformKind::Disc;
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::offset_of;

    #[test]
    fn layout_offsets() {
        assert_eq!(offset_of!(DiscUniform, fill_color), 0);
        assert_eq!(offset_of!(DiscUniform, border_color), 16);
        assert_eq!(offset_of!(DiscUniform, radius), 32);
        assert_eq!(offset_of!(DiscUniform, border_size), 36);
        assert_eq!(offset_of!(DiscUniform, rotation), 40);
        assert_eq!(offset_of!(DiscUniform, onion), 44);
        assert_eq!(offset_of!(DiscUniform, has_texture), 48);
        assert_eq!(offset_of!(DiscUniform, texture_size), 52);
    }

    #[test]
    fn onion_is_clamped() {
        assert_eq!(DiscUniform::new(4.0, Color::transparent()).with_onion(-1.0).onion, 0.0);
        assert_eq!(DiscUniform::new(4.0, Color::transparent()).with_onion(7.0).onion, 1.0);
    }
}
