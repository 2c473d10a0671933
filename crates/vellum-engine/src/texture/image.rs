use std::path::Path;
use std::sync::Arc;

use wgpu::util::DeviceExt;

use crate::graphics::GraphicsError;

use super::filter::{FilterMode, SamplerFilter};
use super::gpu_texture::{checked_size, extent, GpuTexture};

/// Sampled-only texture created from pixels.
///
/// Image rows are uploaded top row first, so texture space matches screen
/// space and images are never flipped.
#[derive(Debug, Clone)]
pub struct Image {
    pub(crate) inner: Arc<GpuTexture>,
}

impl Image {
    pub const FLIPPED: bool = false;

    /// Uploads tightly packed RGBA8 rows (`width * height * 4` bytes).
    ///
    /// `color_format` is the render state's color format; the image is
    /// stored sRGB-encoded only when targets are, so texels reach an
    /// unblended target unchanged.
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Self, GraphicsError> {
        let size = checked_size(width, height)?;
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(GraphicsError::PixelDataMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("vellum image"),
                size: extent(size),
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: image_format(color_format),
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            pixels,
        );

        log::debug!("image created ({width}x{height})");
        Ok(Self {
            inner: Arc::new(GpuTexture::new(texture, size)),
        })
    }

    /// Decodes an encoded image (PNG) held in memory.
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        bytes: &[u8],
    ) -> Result<Self, GraphicsError> {
        let img = ::image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = img.dimensions();
        Self::from_rgba(device, queue, color_format, &img, width, height)
    }

    /// Loads and decodes an image file.
    pub fn from_path(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        path: impl AsRef<Path>,
    ) -> Result<Self, GraphicsError> {
        let img = ::image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();
        Self::from_rgba(device, queue, color_format, &img, width, height)
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
}

fn image_format(color_format: wgpu::TextureFormat) -> wgpu::TextureFormat {
    if color_format.is_srgb() {
        wgpu::TextureFormat::Rgba8UnormSrgb
    } else {
        wgpu::TextureFormat::Rgba8Unorm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_format_follows_target_encoding() {
        assert_eq!(
            image_format(wgpu::TextureFormat::Bgra8UnormSrgb),
            wgpu::TextureFormat::Rgba8UnormSrgb
        );
        assert_eq!(
            image_format(wgpu::TextureFormat::Bgra8Unorm),
            wgpu::TextureFormat::Rgba8Unorm
        );
    }
}
