//! Texture resources: images, canvases and their shared interface.
//!
//! `Image` and `Canvas` are cheap handles around one owned GPU texture.
//! `TextureResource` is the sum type draw calls accept; its `flipped` flag is
//! decided by the variant, never stored.

mod canvas;
mod filter;
mod gpu_texture;
mod image;
mod resource;

pub use canvas::Canvas;
pub use filter::{FilterMode, SamplerFilter};
pub use image::Image;
pub use resource::{new_quad, TextureResource};

pub(crate) use filter::SamplerCache;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_flip_flags_are_fixed() {
        assert!(!Image::FLIPPED);
        assert!(Canvas::FLIPPED);
    }
}
