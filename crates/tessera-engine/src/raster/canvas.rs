use crate::coords::Rect;
use crate::engine::EngineError;
use crate::paint::Color;

/// Largest accepted width or height.
pub const MAX_DIMENSION: u32 = 16_384;

/// Borrowed RGBA8 premultiplied pixel buffer, row-major, 4 bytes per pixel.
///
/// Only the first `width * height * 4` bytes are touched.
#[derive(Debug)]
pub struct Canvas<'a> {
    pixels: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    /// Validates dimensions and buffer length before any write.
    pub fn new(pixels: &'a mut [u8], width: u32, height: u32) -> Result<Self, EngineError> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(EngineError::InvalidDimensions { width, height });
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(EngineError::InvalidDimensions { width, height })?;
        if pixels.len() < expected {
            return Err(EngineError::BufferTooSmall { expected, actual: pixels.len() });
        }
        Ok(Self { pixels: &mut pixels[..expected], width, height })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fills every pixel with `color`.
    pub fn clear(&mut self, color: Color) {
        let texel = to_bytes(color.to_array());
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&texel);
        }
    }

    /// Composites premultiplied `src` over the pixel at `(x, y)`.
    /// Out-of-range coordinates and non-finite colors are ignored.
    pub fn blend(&mut self, x: u32, y: u32, src: [f32; 4]) {
        if x >= self.width || y >= self.height || src.iter().any(|c| !c.is_finite()) {
            return;
        }
        let a = src[3].clamp(0.0, 1.0);
        if a <= 0.0 && src[..3].iter().all(|&c| c <= 0.0) {
            return;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let dst = &mut self.pixels[i..i + 4];
        let mut out = [0.0f32; 4];
        for (c, o) in out.iter_mut().enumerate() {
            let d = f32::from(dst[c]) / 255.0;
            *o = src[c] + d * (1.0 - a);
        }
        dst.copy_from_slice(&to_bytes(out));
    }

    /// Pixel index range `(x0, y0, x1, y1)` covered by `r`, clipped to the
    /// canvas. `None` when nothing remains.
    pub fn pixel_span(&self, r: Rect) -> Option<(u32, u32, u32, u32)> {
        let max = r.max();
        let x0 = r.origin.x.floor().max(0.0);
        let y0 = r.origin.y.floor().max(0.0);
        let x1 = max.x.ceil().min(self.width as f32);
        let y1 = max.y.ceil().min(self.height as f32);
        (x0 < x1 && y0 < y1).then(|| (x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

fn to_bytes(c: [f32; 4]) -> [u8; 4] {
    c.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
}
