/// Straight-alpha RGBA color.
///
/// Components are conventionally in `[0, 1]`; nothing is clamped. Alpha is
/// not premultiplied: the rect pipeline blends with `SrcAlpha,
/// OneMinusSrcAlpha`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// The render state's draw color starts out opaque white.
impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_opaque_white() {
        assert_eq!(Color::default(), Color::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn components_are_not_clamped() {
        let c = Color::new(2.0, -1.0, 0.5, 1.5);
        assert_eq!(c.to_array(), [2.0, -1.0, 0.5, 1.5]);
    }
}
