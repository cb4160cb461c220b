//! Per-pixel evaluation of each uniform record.
//!
//! Every function returns a premultiplied RGBA color for one fragment.
//! Distances are signed: negative inside the shape.

use crate::coords::Vec2;
use crate::paint::{palette, Color};
use crate::text::GlyphAtlas;
use crate::uniforms::{BoxUniform, DiscUniform, GridUniform, TextUniform, TextureUniform};

use super::texture::Texture;

const TRANSPARENT: [f32; 4] = [0.0; 4];
/// Brightness of the odd checker cells.
const CHECKER_SHADE: f32 = 0.85;

pub fn grid(u: &GridUniform, frag: Vec2) -> [f32; 4] {
    let cell = u.cell_pixels();
    if !cell.is_finite() || cell < 2.0 {
        return TRANSPARENT;
    }
    let world = frag - Vec2::from(u.offset);
    let fx = world.x.rem_euclid(cell);
    let fy = world.y.rem_euclid(cell);
    if fx < 1.0 || fy < 1.0 {
        palette::GRID_LINE.to_array()
    } else {
        TRANSPARENT
    }
}

pub fn rounded_box(u: &BoxUniform, frag: Vec2, texture: Option<&Texture>) -> [f32; 4] {
    let size = Vec2::from(u.size);
    if !(size.x > 0.0 && size.y > 0.0) {
        return TRANSPARENT;
    }
    let half = size * 0.5;
    let center = Vec2::from(u.position) + half;
    let p = (frag - center).rotated(-u.rotation);
    let depth_max = half.x.min(half.y);
    let radius = u.corner_radius.clamp(0.0, depth_max);
    let d = sd_round_box(p, half, radius);

    // Box-local coordinates, top-left origin.
    let local = p + half;
    let mut fill = Color::from(u.fill_color);

    if u.has_texture != 0 {
        if let Some(t) = texture {
            let mut uv = Vec2::new(local.x / size.x, local.y / size.y);
            if u.mirror_x != 0 {
                uv.x = 1.0 - uv.x;
            }
            if u.mirror_y != 0 {
                uv.y = 1.0 - uv.y;
            }
            fill = modulate(sample_sized(t, uv, u.texture_size), fill);
        }
    }

    let checker = Vec2::from(u.checker_size);
    if checker.x > 0.0 && checker.y > 0.0 {
        let cx = (local.x / checker.x).floor() as i64;
        let cy = (local.y / checker.y).floor() as i64;
        if (cx + cy).rem_euclid(2) == 1 {
            fill = Color::from_premul(
                fill.r * CHECKER_SHADE,
                fill.g * CHECKER_SHADE,
                fill.b * CHECKER_SHADE,
                fill.a,
            );
        }
    }

    surface(d, depth_max, u.border_size, Color::from(u.border_color), u.onion, fill)
}

/// Disc centered on the quad; `p` is the fragment relative to that center.
pub fn disc(u: &DiscUniform, p: Vec2, texture: Option<&Texture>) -> [f32; 4] {
    let r = u.radius;
    if !(r > 0.0) {
        return TRANSPARENT;
    }
    let d = p.length() - r;
    let mut fill = Color::from(u.fill_color);

    if u.has_texture != 0 {
        if let Some(t) = texture {
            let q = p.rotated(-u.rotation);
            let uv = q / (2.0 * r) + Vec2::splat(0.5);
            fill = modulate(sample_sized(t, uv, u.texture_size), fill);
        }
    }

    surface(d, r, u.border_size, Color::from(u.border_color), u.onion, fill)
}

/// Glyph quad; `uv` spans 0..1 across the glyph.
pub fn glyph(u: &TextUniform, uv: Vec2, atlas: &GlyphAtlas) -> [f32; 4] {
    let [aw, ah] = u.atlas_size;
    if !(aw > 0.0 && ah > 0.0) {
        return TRANSPARENT;
    }
    let at = Vec2::from(u.glyph_position) + uv * Vec2::from(u.glyph_size);
    let norm = Vec2::new(at.x / aw, at.y / ah);
    let coverage = atlas.sample(norm * Vec2::from(atlas.size()));
    Color::from(u.color).with_opacity(coverage).to_array()
}

pub fn sprite(u: &TextureUniform, uv: Vec2, t: &Texture) -> [f32; 4] {
    let uv = if u.mirror_x != 0 { Vec2::new(1.0 - uv.x, uv.y) } else { uv };
    let a = u.global_alpha.clamp(0.0, 1.0);
    t.sample(uv).map(|c| c * a)
}

// ── helpers ───────────────────────────────────────────────────────────────

/// Signed distance to a box of half extents `half` with corner radius `r`.
fn sd_round_box(p: Vec2, half: Vec2, r: f32) -> f32 {
    let q = p.abs() - half + Vec2::splat(r);
    q.max(Vec2::zero()).length() + q.x.max(q.y).min(0.0) - r
}

/// Pixel coverage of a signed distance, one pixel wide ramp.
#[inline]
fn coverage(d: f32) -> f32 {
    (0.5 - d).clamp(0.0, 1.0)
}

/// Shared fill/border/onion resolution for box and disc.
///
/// `depth_max` is the deepest interior distance. `onion` hollows everything
/// deeper than the border plus `(1 - onion)` of the remaining depth.
fn surface(
    d: f32,
    depth_max: f32,
    border: f32,
    border_color: Color,
    onion: f32,
    fill: Color,
) -> [f32; 4] {
    let outer = coverage(d);
    if outer <= 0.0 {
        return TRANSPARENT;
    }
    let border = border.clamp(0.0, depth_max);
    let color = if border > 0.0 { border_color.lerp(fill, coverage(d + border)) } else { fill };

    let onion = onion.clamp(0.0, 1.0);
    let keep = if onion > 0.0 {
        let solid = border + (1.0 - onion) * (depth_max - border);
        coverage(-d - solid)
    } else {
        1.0
    };
    color.with_opacity(outer * keep).to_array()
}

/// Samples `t` at normalized `uv` through the record's declared texture size,
/// or the texture's own size when the record carries none.
fn sample_sized(t: &Texture, uv: Vec2, declared: [f32; 2]) -> [f32; 4] {
    let declared = Vec2::from(declared);
    if declared.x > 0.0 && declared.y > 0.0 {
        t.texel(uv * declared)
    } else {
        t.sample(uv)
    }
}

/// Texel tinted by the fill color.
fn modulate(texel: [f32; 4], tint: Color) -> Color {
    let [r, g, b, a] = texel;
    Color::from_premul(r * tint.r, g * tint.g, b * tint.b, a * tint.a)
}
