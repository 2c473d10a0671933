//! Coordinate types shared by the render state and the pipelines.
//!
//! Draw coordinates are pixels of the active target:
//! - origin top-left
//! - +X right, +Y down
//!
//! Texture coordinates are normalized (`Quad`), also top-left origin for
//! images. Canvases store rows bottom-up; see `texture::Canvas`.

mod quad;
mod viewport;

pub use quad::Quad;
pub use viewport::Viewport;
