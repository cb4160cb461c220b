use bytemuck::{Pod, Zeroable};

use crate::coords::Rect;

use super::{Uniform, UniformKind};

/// Quad corner: screen position plus texture coordinate.
///
/// Layout (16 bytes):
///
///  offset  0  position   [f32; 2]
///  offset  8  tex_coord  [f32; 2]
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct VertexUniform {
    pub position: [f32; 2],
    pub tex_coord: [f32; 2],
}

impl VertexUniform {
    #[inline]
    pub const fn new(position: [f32; 2], tex_coord: [f32; 2]) -> Self {
        Self { position, tex_coord }
    }
}

impl Uniform for VertexUniform {
    const KIND: UniformKind = UniformKind::Vertex;
}

/// Four corners in top-left, top-right, bottom-right, bottom-left order.
pub type Quad = [VertexUniform; 4];

/// Index list drawing a [`Quad`] as two triangles.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Screen-space quad covering `rect` with texture coordinates spanning 0..1.
pub fn quad(rect: Rect) -> Quad {
    let min = rect.origin;
    let max = rect.max();
    [
        VertexUniform::new([min.x, min.y], [0.0, 0.0]),
        VertexUniform::new([max.x, min.y], [1.0, 0.0]),
        VertexUniform::new([max.x, max.y], [1.0, 1.0]),
        VertexUniform::new([min.x, max.y], [0.0, 1.0]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::offset_of;

    #[test]
    fn layout_offsets() {
        assert_eq!(offset_of!(VertexUniform, position), 0);
        assert_eq!(offset_of!(VertexUniform, tex_coord), 8);
        assert_eq!(core::mem::size_of::<VertexUniform>(), 16);
    }

    #[test]
    fn quad_corners_follow_winding() {
        let q = quad(Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(q[0].position, [1.0, 2.0]);
        assert_eq!(q[2].position, [4.0, 6.0]);
        assert_eq!(q[3].tex_coord, [0.0, 1.0]);
    }
}
