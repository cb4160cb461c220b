//! CPU shading stage.
//!
//! Evaluates each draw item's uniform record per pixel over the item's quad and
//! composites the result into a [`Canvas`] with premultiplied-alpha blending
//! (`src + dst * (1 - src.a)`). Records are read through the same fields a GPU
//! stage would bind.

mod canvas;
mod shade;
mod texture;

pub use canvas::{Canvas, MAX_DIMENSION};
pub use texture::Texture;

use crate::coords::{Rect, Vec2};
use crate::scene::{DrawCmd, DrawList};
use crate::text::GlyphAtlas;
use crate::uniforms::Quad;

/// Read-only inputs the shading functions sample from.
#[derive(Debug, Copy, Clone)]
pub struct Resources<'a> {
    pub atlas: &'a GlyphAtlas,
    pub textures: &'a [Texture],
}

/// Counters from one [`rasterize`] pass.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RasterStats {
    /// Items shaded (including ones fully outside the canvas).
    pub drawn: usize,
    /// Items skipped for non-finite geometry or a missing texture.
    pub skipped: usize,
}

/// Shades every item of `list` into `canvas` in paint order.
pub fn rasterize(canvas: &mut Canvas<'_>, list: &mut DrawList, res: Resources<'_>) -> RasterStats {
    let mut stats = RasterStats::default();

    for item in list.iter_in_paint_order() {
        let Some(bounds) = quad_bounds(&item.quad) else {
            log::warn!("skipping {:?} draw with invalid geometry: {:?}", item.cmd.kind(), item.key);
            stats.skipped += 1;
            continue;
        };

        let texture = match &item.cmd {
            DrawCmd::Texture { texture, .. } => Some(*texture),
            DrawCmd::Box { texture, .. } | DrawCmd::Disc { texture, .. } => *texture,
            DrawCmd::Grid(_) | DrawCmd::Text(_) => None,
        };
        let texture = match texture {
            Some(id) => match res.textures.get(id.0) {
                Some(t) => Some(t),
                None => {
                    log::warn!("skipping {:?} draw with unknown texture {}", item.cmd.kind(), id.0);
                    stats.skipped += 1;
                    continue;
                }
            },
            None => None,
        };

        let tc0 = Vec2::from(item.quad[0].tex_coord);
        let tc2 = Vec2::from(item.quad[2].tex_coord);
        let Some((x0, y0, x1, y1)) = canvas.pixel_span(bounds) else {
            stats.drawn += 1;
            continue;
        };

        for py in y0..y1 {
            for px in x0..x1 {
                let frag = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                let t = Vec2::new(
                    (frag.x - bounds.origin.x) / bounds.size.x,
                    (frag.y - bounds.origin.y) / bounds.size.y,
                );
                let uv = tc0 + (tc2 - tc0) * t;

                let src = match &item.cmd {
                    DrawCmd::Grid(u) => shade::grid(u, frag),
                    DrawCmd::Box { uniform, .. } => shade::rounded_box(uniform, frag, texture),
                    DrawCmd::Disc { uniform, .. } => {
                        shade::disc(uniform, frag - bounds.center(), texture)
                    }
                    DrawCmd::Text(u) => shade::glyph(u, uv, res.atlas),
                    DrawCmd::Texture { uniform, .. } => match texture {
                        Some(t) => shade::sprite(uniform, uv, t),
                        None => continue,
                    },
                };
                canvas.blend(px, py, src);
            }
        }
        stats.drawn += 1;
    }

    stats
}

/// Axis-aligned bounds of a quad; `None` when non-finite or empty.
fn quad_bounds(q: &Quad) -> Option<Rect> {
    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    for v in q {
        let p = Vec2::from(v.position);
        if !p.is_finite() {
            return None;
        }
        min = Vec2::new(min.x.min(p.x), min.y.min(p.y));
        max = Vec2::new(max.x.max(p.x), max.y.max(p.y));
    }
    let r = Rect::from_origin_size(min, max - min);
    (!r.is_empty()).then_some(r)
}
