//! wgpu descriptors for hosts that shade the records on a wgpu device.
//!
//! Records are tightly packed (4-byte alignment), so they bind as storage or
//! vertex data; WGSL `uniform` address space rules would insert padding.

use std::num::NonZeroU64;

use super::{Uniform, VertexUniform};

impl VertexUniform {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x2  // tex_coord
    ];

    /// Per-vertex buffer layout for quads built from [`super::quad`].
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<VertexUniform>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Minimum binding size for a buffer holding one `T` record.
pub fn min_binding_size<T: Uniform>() -> NonZeroU64 {
    NonZeroU64::new(T::SIZE as u64).unwrap_or(NonZeroU64::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniforms::{BoxUniform, DiscUniform, GridUniform, TextUniform, TextureUniform};

    #[test]
    fn vertex_layout_matches_record() {
        let layout = VertexUniform::layout();
        assert_eq!(layout.array_stride, 16);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
        let offsets: Vec<u64> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 8]);
        let locations: Vec<u32> = layout.attributes.iter().map(|a| a.shader_location).collect();
        assert_eq!(locations, vec![0, 1]);
        assert!(layout.attributes.iter().all(|a| a.format == wgpu::VertexFormat::Float32x2));
    }

    #[test]
    fn binding_sizes_equal_record_sizes() {
        assert_eq!(min_binding_size::<VertexUniform>().get(), VertexUniform::SIZE as u64);
        assert_eq!(min_binding_size::<TextureUniform>().get(), TextureUniform::SIZE as u64);
        assert_eq!(min_binding_size::<DiscUniform>().get(), DiscUniform::SIZE as u64);
        assert_eq!(min_binding_size::<BoxUniform>().get(), 100);
        assert_eq!(min_binding_size::<TextUniform>().get(), TextUniform::SIZE as u64);
        assert_eq!(min_binding_size::<GridUniform>().get(), GridUniform::SIZE as u64);
    }
}
