use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Vec2};

use super::{bool32, Uniform, UniformKind};

/// Textured sprite blitted into a screen rect.
///
/// Layout (32 bytes):
///
///  offset  0  screen_size   [f32; 2]
///  offset  8  position      [f32; 2]
///  offset 16  size          [f32; 2]
///  offset 24  global_alpha  f32
///  offset 28  mirror_x      u32 (0/1)
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct TextureUniform {
    pub screen_size: [f32; 2],
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub global_alpha: f32,
    pub mirror_x: u32,
}

impl TextureUniform {
    /// Opaque, unmirrored sprite covering `rect`.
    pub fn new(screen_size: Vec2, rect: Rect) -> Self {
        Self {
            screen_size: screen_size.to_array(),
            position: rect.origin.to_array(),
            size: rect.size.to_array(),
            global_alpha: 1.0,
            mirror_x: 0,
        }
    }

    /// Global opacity, clamped to [0, 1].
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.global_alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_mirror_x(mut self, mirror: bool) -> Self {
        self.mirror_x = bool32(mirror);
        self
    }

}

impl Uniform for TextureUniform {
    const KIND: UniformKind = UniformKind::Texture;
}
