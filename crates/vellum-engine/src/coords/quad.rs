/// Normalized sub-rectangle of a texture.
///
/// Every component is a fraction of the owning texture's pixel size, so
/// `{0, 0, 1, 1}` samples the whole texture. Build one from pixel units with
/// [`Quad::from_pixels`] or [`crate::texture::new_quad`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quad {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Quad {
    /// The whole texture.
    pub const FULL: Quad = Quad::new(0.0, 0.0, 1.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Converts a pixel-space rectangle into fractions of an
    /// `owner_width` × `owner_height` texture.
    ///
    /// The owner size must be non-zero; texture resources reject zero sizes at
    /// creation so this holds for any size read from one.
    #[inline]
    pub fn from_pixels(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        owner_width: u32,
        owner_height: u32,
    ) -> Self {
        let ow = owner_width as f32;
        let oh = owner_height as f32;
        Self::new(x / ow, y / oh, width / ow, height / oh)
    }

    #[inline]
    pub fn offset(self) -> [f32; 2] {
        [self.x, self.y]
    }

    #[inline]
    pub fn size(self) -> [f32; 2] {
        [self.width, self.height]
    }

    /// Texture coordinate sampled at `unit` (a corner or point of the unit
    /// quad) when drawing this quad.
    ///
    /// Mirrors the sprite vertex stage: `offset + unit * size`, then
    /// `v = 1 - v` for flipped (framebuffer-space) sources.
    #[inline]
    #[cfg(test)]
    pub(crate) fn sample_uv(self, unit: [f32; 2], flipped: bool) -> [f32; 2] {
        let u = self.x + unit[0] * self.width;
        let v = self.y + unit[1] * self.height;
        if flipped { [u, 1.0 - v] } else { [u, v] }
    }
}

impl Default for Quad {
    fn default() -> Self {
        Self::FULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pixels_divides_by_owner_size() {
        let q = Quad::from_pixels(32.0, 32.0, 64.0, 64.0, 128, 128);
        assert_eq!(q, Quad::new(0.25, 0.25, 0.5, 0.5));
    }

    #[test]
    fn from_pixels_non_square_owner() {
        let q = Quad::from_pixels(50.0, 40.0, 250.0, 200.0, 500, 400);
        assert_eq!(q, Quad::new(0.1, 0.1, 0.5, 0.5));
    }

    #[test]
    fn whole_owner_is_full() {
        assert_eq!(Quad::from_pixels(0.0, 0.0, 500.0, 400.0, 500, 400), Quad::FULL);
    }

    #[test]
    fn sample_uv_unflipped_follows_quad() {
        let q = Quad::new(0.25, 0.25, 0.5, 0.5);
        assert_eq!(q.sample_uv([0.0, 0.0], false), [0.25, 0.25]);
        assert_eq!(q.sample_uv([1.0, 1.0], false), [0.75, 0.75]);
    }

    #[test]
    fn sample_uv_flipped_inverts_v_only() {
        let q = Quad::FULL;
        for unit in [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.3, 0.8]] {
            let [u, v] = q.sample_uv(unit, false);
            let [fu, fv] = q.sample_uv(unit, true);
            assert_eq!(fu, u);
            assert!((fv - (1.0 - v)).abs() < 1e-6);
        }
    }
}
