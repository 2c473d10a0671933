/// Renderer-facing context (device/queue + the shared color format).
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub color_format: wgpu::TextureFormat,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            device,
            queue,
            color_format,
        }
    }
}

/// How a target stores rows relative to draw coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Orientation {
    /// The visible screen: pixel row 0 is the top of the image.
    ScreenSpace,
    /// Canvases: rows are stored bottom-up, so sampling one inverts `v`.
    FramebufferSpace,
}

impl Orientation {
    /// Value of the `target_flip` shader uniform.
    #[inline]
    pub(crate) fn flag(self) -> u32 {
        match self {
            Orientation::ScreenSpace => 0,
            Orientation::FramebufferSpace => 1,
        }
    }
}

/// Color attachment a pass renders into.
pub struct DrawTarget<'a> {
    pub view: &'a wgpu::TextureView,
    pub orientation: Orientation,
}

impl<'a> DrawTarget<'a> {
    #[inline]
    pub fn new(view: &'a wgpu::TextureView, orientation: Orientation) -> Self {
        Self { view, orientation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_framebuffer_space_flips() {
        assert_eq!(Orientation::ScreenSpace.flag(), 0);
        assert_eq!(Orientation::FramebufferSpace.flag(), 1);
    }
}
