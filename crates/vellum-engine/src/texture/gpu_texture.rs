use crate::coords::Viewport;
use crate::graphics::GraphicsError;

use super::filter::{FilterCell, SamplerFilter};

/// GPU texture plus the metadata every resource variant shares.
#[derive(Debug)]
pub(crate) struct GpuTexture {
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) size: Viewport,
    pub(crate) filter: FilterCell,
}

impl GpuTexture {
    pub(crate) fn new(texture: wgpu::Texture, size: Viewport) -> Self {
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            size,
            filter: FilterCell::new(SamplerFilter::default()),
        }
    }
}

/// Rejects zero-sized textures; quads divide by these dimensions.
pub(crate) fn checked_size(width: u32, height: u32) -> Result<Viewport, GraphicsError> {
    let size = Viewport::new(width, height);
    if size.is_empty() {
        return Err(GraphicsError::InvalidSize { width, height });
    }
    Ok(size)
}

pub(crate) fn extent(size: Viewport) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: size.width,
        height: size.height,
        depth_or_array_layers: 1,
    }
}
