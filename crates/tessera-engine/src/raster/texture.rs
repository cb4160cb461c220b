use crate::coords::Vec2;

/// Premultiplied RGBA texture sampled by textured records.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    texels: Vec<[f32; 4]>,
}

impl Texture {
    /// Texture from premultiplied RGBA8 bytes. `None` when the byte count does
    /// not match the dimensions.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        let n = (width as usize).checked_mul(height as usize)?;
        if width == 0 || height == 0 || bytes.len() != n.checked_mul(4)? {
            return None;
        }
        let texels = bytes
            .chunks_exact(4)
            .map(|c| [c[0], c[1], c[2], c[3]].map(|v| f32::from(v) / 255.0))
            .collect();
        Some(Self { width, height, texels })
    }

    /// 16×16 toolbar badge: a warm disc with a cool corner notch, so mirroring
    /// is visible.
    pub fn badge() -> Self {
        const N: u32 = 16;
        let c = (N as f32 - 1.0) * 0.5;
        let mut texels = Vec::with_capacity((N * N) as usize);
        for y in 0..N {
            for x in 0..N {
                let p = Vec2::new(x as f32 - c, y as f32 - c);
                let t = (p.length() / 7.5).min(1.0);
                let texel = if p.length() > 7.5 {
                    [0.0; 4]
                } else if p.x > 2.0 && p.y < -2.0 {
                    [0.22, 0.45, 0.85, 1.0]
                } else {
                    [0.95 - 0.25 * t, 0.55 - 0.2 * t, 0.15, 1.0]
                };
                texels.push(texel);
            }
        }
        Self { width: N, height: N, texels }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Nearest texel at texel coordinates `p`; transparent outside.
    pub fn texel(&self, p: Vec2) -> [f32; 4] {
        if !p.is_finite() || p.x < 0.0 || p.y < 0.0 {
            return [0.0; 4];
        }
        let (x, y) = (p.x as u32, p.y as u32);
        if x >= self.width || y >= self.height {
            return [0.0; 4];
        }
        self.texels[(y * self.width + x) as usize]
    }

    /// Nearest texel at normalized coordinates in `[0, 1]`.
    #[inline]
    pub fn sample(&self, uv: Vec2) -> [f32; 4] {
        let p = uv * self.size();
        // uv == 1.0 lands on the last texel.
        self.texel(Vec2::new(p.x.min(self.width as f32 - 0.5), p.y.min(self.height as f32 - 0.5)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_length_must_match() {
        assert!(Texture::from_rgba8(2, 2, &[0; 15]).is_none());
        assert!(Texture::from_rgba8(0, 2, &[]).is_none());
        let t = Texture::from_rgba8(1, 1, &[255, 0, 0, 255]).unwrap();
        assert_eq!(t.sample(Vec2::new(0.5, 0.5)), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(t.sample(Vec2::new(1.0, 1.0)), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn badge_is_not_symmetric() {
        let b = Texture::badge();
        let left = b.sample(Vec2::new(0.3, 0.3));
        let right = b.sample(Vec2::new(0.7, 0.3));
        assert_ne!(left, right);
        assert_eq!(b.sample(Vec2::new(0.0, 0.0))[3], 0.0);
    }
}
