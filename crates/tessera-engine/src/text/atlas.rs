use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;

use crate::coords::Vec2;

/// Error returned by [`GlyphAtlas::from_font_bytes`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum FontError {
    #[error("font parse error: {0}")]
    Parse(String),
    #[error("font has no horizontal line metrics")]
    NoLineMetrics,
}

/// Where a glyph lives in the atlas and how it sits in its text cell.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Glyph {
    /// Top-left corner in atlas pixels.
    pub atlas_pos: [f32; 2],
    /// Size in atlas pixels (drawn 1:1).
    pub size: [f32; 2],
    /// Offset of the glyph's top-left from the cell's top-left.
    pub offset: Vec2,
}

/// Single-channel coverage atlas with monospace cell metrics.
#[derive(Debug, Clone)]
pub struct GlyphAtlas {
    width: u32,
    height: u32,
    coverage: Vec<u8>,
    glyphs: HashMap<char, Glyph>,
    fallback: Option<Glyph>,
    advance: f32,
    line_height: f32,
}

const ATLAS_WIDTH: u32 = 256;
const PRINTABLE: core::ops::RangeInclusive<u8> = 0x21..=0x7e;

impl GlyphAtlas {
    /// Block glyphs sized for `px` pixel text.
    ///
    /// Each character maps to one of a few silhouettes (capital, x-height,
    /// descender, punctuation), so words keep a recognizable shape. Unknown
    /// characters render as a hollow box.
    pub fn builtin(px: f32) -> Self {
        let px = px.max(4.0);
        let advance = (px * 0.6).round().max(3.0);
        let line_height = (px * 1.3).round();
        let ascent = (px * 1.0).round();

        let w = (advance - 2.0).max(1.0) as u32;
        let cap_h = (px * 0.72).round().max(2.0) as u32;
        let x_h = (px * 0.52).round().max(2.0) as u32;
        let desc_h = (px * 0.72).round().max(2.0) as u32;
        let punct_h = (px * 0.18).round().max(1.0) as u32;

        let mut packer = ShelfPacker::new(ATLAS_WIDTH);
        let shapes = [
            (w, cap_h, false),
            (w, x_h, false),
            (w, desc_h, false),
            ((w / 2).max(1), punct_h, false),
            (w, cap_h, true),
        ];
        let mut slots = Vec::with_capacity(shapes.len());
        for (sw, sh, _) in shapes {
            slots.push(packer.place(sw, sh));
        }

        let mut atlas = Self::empty(packer.finish());
        for ((sw, sh, hollow), (x, y)) in shapes.iter().zip(&slots) {
            atlas.fill_block(*x, *y, *sw, *sh, *hollow);
        }

        let glyph_at = |slot: usize, top: f32| {
            let (x, y) = slots[slot];
            let (sw, sh, _) = shapes[slot];
            Glyph {
                atlas_pos: [x as f32, y as f32],
                size: [sw as f32, sh as f32],
                offset: Vec2::new(1.0, top),
            }
        };

        let baseline = ascent;
        let cap = glyph_at(0, baseline - cap_h as f32);
        let small = glyph_at(1, baseline - x_h as f32);
        let descender = glyph_at(2, baseline - x_h as f32);
        let punct = glyph_at(3, baseline - punct_h as f32);

        for b in PRINTABLE {
            let ch = b as char;
            let g = match ch {
                'g' | 'j' | 'p' | 'q' | 'y' => descender,
                'b' | 'd' | 'f' | 'h' | 'k' | 'l' | 't' | 'i' => cap,
                'a'..='z' => small,
                'A'..='Z' | '0'..='9' => cap,
                '.' | ',' | ':' | ';' | '_' | '\'' | '"' | '`' => punct,
                _ => small,
            };
            atlas.glyphs.insert(ch, g);
        }

        atlas.fallback = Some(glyph_at(4, baseline - cap_h as f32));
        atlas.advance = advance;
        atlas.line_height = line_height;
        atlas
    }

    /// Rasterizes printable ASCII from TrueType/OpenType bytes at `px` pixels.
    ///
    /// The cell advance is the widest ASCII advance, so proportional fonts still
    /// lay out on a grid.
    pub fn from_font_bytes(bytes: &[u8], px: f32) -> Result<Self, FontError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontError::Parse(e.to_string()))?;
        let line = font.horizontal_line_metrics(px).ok_or(FontError::NoLineMetrics)?;

        let mut rasterized = Vec::new();
        let mut packer = ShelfPacker::new(ATLAS_WIDTH);
        let mut advance: f32 = 0.0;

        for ch in PRINTABLE.map(char::from).chain(['\u{fffd}']) {
            let (metrics, bitmap) = font.rasterize(ch, px);
            advance = advance.max(metrics.advance_width);
            if metrics.width == 0 || metrics.height == 0 {
                continue;
            }
            let slot = packer.place(metrics.width as u32, metrics.height as u32);
            rasterized.push((ch, metrics, bitmap, slot));
        }

        let mut atlas = Self::empty(packer.finish());
        for (ch, metrics, bitmap, (x, y)) in rasterized {
            atlas.blit(x, y, metrics.width as u32, &bitmap);
            let top = line.ascent - (metrics.ymin as f32 + metrics.height as f32);
            let glyph = Glyph {
                atlas_pos: [x as f32, y as f32],
                size: [metrics.width as f32, metrics.height as f32],
                offset: Vec2::new(metrics.xmin as f32, top.round()),
            };
            if ch == '\u{fffd}' {
                atlas.fallback = Some(glyph);
            } else {
                atlas.glyphs.insert(ch, glyph);
            }
        }

        atlas.advance = advance.ceil().max(1.0);
        atlas.line_height = line.new_line_size.ceil().max(1.0);
        Ok(atlas)
    }

    /// Reads a font file and rasterizes it at `px` pixels.
    pub fn load(path: &Path, px: f32) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading font {}", path.display()))?;
        let atlas = Self::from_font_bytes(&bytes, px)
            .with_context(|| format!("rasterizing font {}", path.display()))?;
        log::info!("loaded font {} ({} glyphs)", path.display(), atlas.glyphs.len());
        Ok(atlas)
    }

    /// Glyph for `ch`, or `None` when nothing should be drawn (whitespace).
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        if ch.is_whitespace() {
            return None;
        }
        self.glyphs.get(&ch).or(self.fallback.as_ref())
    }

    /// Horizontal cell advance in pixels.
    #[inline]
    pub fn advance(&self) -> f32 {
        self.advance
    }

    /// Vertical distance between lines in pixels.
    #[inline]
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Atlas size as stored in [`crate::uniforms::TextUniform::atlas_size`].
    #[inline]
    pub fn size(&self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }

    /// Nearest-texel coverage in `[0, 1]`; zero outside the atlas.
    pub fn sample(&self, p: Vec2) -> f32 {
        if p.x < 0.0 || p.y < 0.0 {
            return 0.0;
        }
        let (x, y) = (p.x as u32, p.y as u32);
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        f32::from(self.coverage[(y * self.width + x) as usize]) / 255.0
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn empty((width, height): (u32, u32)) -> Self {
        Self {
            width,
            height,
            coverage: vec![0; (width * height) as usize],
            glyphs: HashMap::new(),
            fallback: None,
            advance: 1.0,
            line_height: 1.0,
        }
    }

    fn fill_block(&mut self, x: u32, y: u32, w: u32, h: u32, hollow: bool) {
        for row in 0..h {
            for col in 0..w {
                let edge = row == 0 || col == 0 || row == h - 1 || col == w - 1;
                if hollow && !edge {
                    continue;
                }
                self.coverage[((y + row) * self.width + x + col) as usize] = 255;
            }
        }
    }

    fn blit(&mut self, x: u32, y: u32, w: u32, bitmap: &[u8]) {
        for (row, line) in bitmap.chunks(w as usize).enumerate() {
            let start = ((y + row as u32) * self.width + x) as usize;
            self.coverage[start..start + line.len()].copy_from_slice(line);
        }
    }
}

/// Row-based rectangle packer with 1px gutters.
struct ShelfPacker {
    width: u32,
    cursor_x: u32,
    shelf_y: u32,
    shelf_h: u32,
}

impl ShelfPacker {
    fn new(width: u32) -> Self {
        Self { width, cursor_x: 1, shelf_y: 1, shelf_h: 0 }
    }

    fn place(&mut self, w: u32, h: u32) -> (u32, u32) {
        let w = w.min(self.width - 2);
        if self.cursor_x + w + 1 > self.width {
            self.shelf_y += self.shelf_h + 1;
            self.cursor_x = 1;
            self.shelf_h = 0;
        }
        let slot = (self.cursor_x, self.shelf_y);
        self.cursor_x += w + 1;
        self.shelf_h = self.shelf_h.max(h);
        slot
    }

    fn finish(&self) -> (u32, u32) {
        (self.width, self.shelf_y + self.shelf_h + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_printable_ascii() {
        let atlas = GlyphAtlas::builtin(14.0);
        for b in PRINTABLE {
            assert!(atlas.glyph(b as char).is_some(), "missing {:?}", b as char);
        }
        assert!(atlas.glyph(' ').is_none());
        assert!(atlas.advance() > 0.0 && atlas.line_height() > atlas.advance());
    }

    #[test]
    fn unknown_characters_use_fallback() {
        let atlas = GlyphAtlas::builtin(14.0);
        let g = atlas.glyph('語').copied();
        assert_eq!(g, atlas.fallback);
    }

    #[test]
    fn glyph_regions_contain_coverage() {
        let atlas = GlyphAtlas::builtin(14.0);
        let g = atlas.glyph('A').copied().unwrap();
        let inside = Vec2::new(g.atlas_pos[0] + 0.5, g.atlas_pos[1] + 0.5);
        assert_eq!(atlas.sample(inside), 1.0);
        assert_eq!(atlas.sample(Vec2::new(-1.0, 0.0)), 0.0);
        assert_eq!(atlas.sample(Vec2::new(10_000.0, 0.0)), 0.0);
    }

    #[test]
    fn garbage_font_bytes_are_rejected() {
        let parsed = GlyphAtlas::from_font_bytes(b"not a font", 14.0);
        assert!(matches!(parsed, Err(FontError::Parse(_))));
    }
}
