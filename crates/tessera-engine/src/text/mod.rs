//! Glyph atlas for the text primitive.
//!
//! Fonts are the host's business; the engine only needs a coverage atlas and
//! monospace metrics. [`GlyphAtlas::load`] rasterizes printable ASCII from a font
//! file with `fontdue`; without one, [`GlyphAtlas::builtin`] provides block
//! glyphs so text layout and selection still render.

mod atlas;

pub use atlas::{FontError, Glyph, GlyphAtlas};
