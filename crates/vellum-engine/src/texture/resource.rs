use crate::coords::{Quad, Viewport};

use super::filter::{FilterMode, SamplerFilter};
use super::gpu_texture::GpuTexture;
use super::{Canvas, Image};

/// Anything that can be drawn as a source texture.
#[derive(Debug, Clone)]
pub enum TextureResource {
    Image(Image),
    Canvas(Canvas),
}

impl TextureResource {
    fn gpu(&self) -> &GpuTexture {
        match self {
            TextureResource::Image(image) => &image.inner,
            TextureResource::Canvas(canvas) => &canvas.inner,
        }
    }

    pub fn width(&self) -> u32 {
        self.gpu().size.width
    }

    pub fn height(&self) -> u32 {
        self.gpu().size.height
    }

    pub fn size(&self) -> Viewport {
        self.gpu().size
    }

    /// Whether sampling must invert `v` to appear upright in screen space.
    pub fn flipped(&self) -> bool {
        match self {
            TextureResource::Image(_) => Image::FLIPPED,
            TextureResource::Canvas(_) => Canvas::FLIPPED,
        }
    }

    /// Sets the minification and magnification filters.
    ///
    /// Takes effect on the next draw that samples this resource; every clone
    /// of the handle sees the change.
    pub fn set_filter(&self, min: FilterMode, mag: FilterMode) {
        self.gpu().filter.set(SamplerFilter::new(min, mag));
    }

    pub fn filter(&self) -> SamplerFilter {
        self.gpu().filter.get()
    }

    /// Pixel rectangle of this resource as a normalized quad.
    pub fn quad(&self, x: f32, y: f32, width: f32, height: f32) -> Quad {
        Quad::from_pixels(x, y, width, height, self.width(), self.height())
    }

    pub fn as_canvas(&self) -> Option<&Canvas> {
        match self {
            TextureResource::Canvas(canvas) => Some(canvas),
            TextureResource::Image(_) => None,
        }
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.gpu().view
    }
}

impl From<Image> for TextureResource {
    fn from(image: Image) -> Self {
        TextureResource::Image(image)
    }
}

impl From<Canvas> for TextureResource {
    fn from(canvas: Canvas) -> Self {
        TextureResource::Canvas(canvas)
    }
}

impl From<&Image> for TextureResource {
    fn from(image: &Image) -> Self {
        TextureResource::Image(image.clone())
    }
}

impl From<&Canvas> for TextureResource {
    fn from(canvas: &Canvas) -> Self {
        TextureResource::Canvas(canvas.clone())
    }
}

impl From<&TextureResource> for TextureResource {
    fn from(resource: &TextureResource) -> Self {
        resource.clone()
    }
}

/// Builds a quad from a pixel rectangle of `owner`.
///
/// Pure: reads only the owner's size.
pub fn new_quad(x: f32, y: f32, width: f32, height: f32, owner: &TextureResource) -> Quad {
    owner.quad(x, y, width, height)
}
