use crate::uniforms::{
    BoxUniform, DiscUniform, GridUniform, TextUniform, TextureUniform, Uniform, UniformKind,
};

/// Index into the texture slice handed to the rasterizer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub usize);

/// One draw call's uniform record.
///
/// Geometry lives in the item's quad; the record describes how to shade it.
/// Extending the scene:
/// - add a record under `uniforms::*`
/// - add a variant here
/// - add the matching shading function under `raster::shade`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Grid(GridUniform),
    Box { uniform: BoxUniform, texture: Option<TextureId> },
    Disc { uniform: DiscUniform, texture: Option<TextureId> },
    Text(TextUniform),
    Texture { uniform: TextureUniform, texture: TextureId },
}

impl DrawCmd {
    /// Primitive class of the record this command carries.
    pub fn kind(&self) -> UniformKind {
        match self {
            DrawCmd::Grid(_) => GridUniform::KIND,
            DrawCmd::Box { .. } => BoxUniform::KIND,
            DrawCmd::Disc { .. } => DiscUniform::KIND,
            DrawCmd::Text(_) => TextUniform::KIND,
            DrawCmd::Texture { .. } => TextureUniform::KIND,
        }
    }
}
