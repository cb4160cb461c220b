use bytemuck::{Pod, Zeroable};

use crate::paint::Color;

use super::{Uniform, UniformKind};

/// One glyph sampled from a coverage atlas.
///
/// The glyph is stretched over the quad it is drawn with; the record only says
/// where in the atlas to read from.
///
/// Layout (40 bytes):
///
///  offset  0  atlas_size      [f32; 2]
///  offset  8  glyph_position  [f32; 2] (atlas pixels)
///  offset 16  glyph_size      [f32; 2] (atlas pixels)
///  offset 24  color           [f32; 4]
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct TextUniform {
    pub atlas_size: [f32; 2],
    pub glyph_position: [f32; 2],
    pub glyph_size: [f32; 2],
    pub color: [f32; 4],
}

impl TextUniform {
    #[inline]
    pub fn new(
        atlas_size: [f32; 2],
        glyph_position: [f32; 2],
        glyph_size: [f32; 2],
        color: Color,
    ) -> Self {
        Self { atlas_size, glyph_position, glyph_size, color: color.to_array() }
    }
}

impl Uniform for TextUniform {
    const KIND: UniformKind = UniformKind::Text;
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::offset_of;

    #[test]
    fn layout_offsets() {
        assert_eq!(offset_of!(TextUniform, atlas_size), 0);
        assert_eq!(offset_of!(TextUniform, glyph_position), 8);
        assert_eq!(offset_of!(TextUniform, glyph_size), 16);
        assert_eq!(offset_of!(TextUniform, color), 24);
    }
}
