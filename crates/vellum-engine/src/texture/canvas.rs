use std::sync::Arc;

use crate::graphics::GraphicsError;

use super::filter::{FilterMode, SamplerFilter};
use super::gpu_texture::{checked_size, extent, GpuTexture};

/// Offscreen render target that can later be sampled like an image.
///
/// Draws into a canvas land in framebuffer space: the pipelines invert the
/// vertical axis while a canvas is the active target, so its rows are stored
/// bottom-up relative to the screen-space draw coordinates. Sampling a canvas
/// therefore inverts `v`, which is what [`Canvas::FLIPPED`] signals.
///
/// Cloning a canvas clones the handle, not the texture.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub(crate) inner: Arc<GpuTexture>,
}

impl Canvas {
    pub const FLIPPED: bool = true;

    /// Creates a `width` × `height` color attachment in `format`.
    ///
    /// `format` must match the render state's color format so the same
    /// pipelines can draw into the screen and into canvases.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Result<Self, GraphicsError> {
        let size = checked_size(width, height)?;
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("vellum canvas"),
            size: extent(size),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });

        log::debug!("canvas created ({width}x{height}, {format:?})");
        Ok(Self {
            inner: Arc::new(GpuTexture::new(texture, size)),
        })
    }

    pub fn width(&self) -> u32 {
        self.inner.size.width
    }

    pub fn height(&self) -> u32 {
        self.inner.size.height
    }

    /// See [`TextureResource::set_filter`](super::TextureResource::set_filter).
    pub fn set_filter(&self, min: FilterMode, mag: FilterMode) {
        self.inner.filter.set(SamplerFilter::new(min, mag));
    }

    /// True when both handles refer to the same GPU texture.
    pub fn same_target(&self, other: &Canvas) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn view(&self) -> &wgpu::TextureView {
        &self.inner.view
    }
}
