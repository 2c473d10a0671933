/// Pixel size of a render target.
///
/// This is both the GPU viewport set before each draw and the `resolution`
/// uniform the vertex stages use to map pixels to NDC.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the size as the `vec2<f32>` the shaders expect.
    ///
    /// Zero extents are raised to 1 so the NDC divide stays finite while a
    /// window is minimized.
    #[inline]
    pub fn resolution(self) -> [f32; 2] {
        [self.width.max(1) as f32, self.height.max(1) as f32]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_matches_size() {
        assert_eq!(Viewport::new(500, 400).resolution(), [500.0, 400.0]);
    }

    #[test]
    fn resolution_never_zero() {
        let v = Viewport::new(0, 0);
        assert!(v.is_empty());
        assert_eq!(v.resolution(), [1.0, 1.0]);
    }
}
