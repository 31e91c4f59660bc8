/// Straight-alpha RGBA color with `f32` channels in `[0, 1]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Opaque color from 8-bit-style channels.
    ///
    /// Inputs are clamped to `0..=255` first, so any integer triple yields
    /// channels in `[0, 1]`.
    #[inline]
    pub fn from_rgb_clamped(rgb: [i32; 3]) -> Self {
        let c = |v: i32| v.clamp(0, 255) as f32 / 255.0;
        Self::rgb(c(rgb[0]), c(rgb[1]), c(rgb[2]))
    }

    /// Clamps all channels to `[0, 1]`.
    #[inline]
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_unit(c: Color) -> bool {
        [c.r, c.g, c.b, c.a].iter().all(|v| (0.0..=1.0).contains(v))
    }

    #[test]
    fn in_range_bytes_divide_by_255() {
        let c = Color::from_rgb_clamped([255, 0, 51]);
        assert_eq!(c, Color::rgb(1.0, 0.0, 0.2));
    }

    #[test]
    fn out_of_range_triples_land_in_unit_interval() {
        for rgb in [[-1, 0, 0], [256, 300, 1000], [i32::MIN, i32::MAX, 128], [-255, 510, -7]] {
            let c = Color::from_rgb_clamped(rgb);
            assert!(in_unit(c), "{rgb:?} -> {c:?}");
            assert_eq!(c.a, 1.0);
        }
    }

    #[test]
    fn clamped_limits_channels() {
        let c = Color::rgba(-0.5, 2.0, 0.5, 1.5).clamped();
        assert_eq!(c, Color::rgba(0.0, 1.0, 0.5, 1.0));
    }

    #[test]
    fn wgpu_conversion_keeps_channels() {
        let w = Color::rgb(0.2, 0.2, 0.2).to_wgpu();
        assert!((w.r - 0.2).abs() < 1e-6 && (w.a - 1.0).abs() < 1e-12);
    }
}
