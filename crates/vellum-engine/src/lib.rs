//! Vellum engine crate.
//!
//! A small immediate-mode 2D layer over wgpu: load images, cut them into
//! quads, render into the screen or into offscreen canvases, and composite
//! canvases back onto the screen.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod texture;
pub mod graphics;
pub mod gfx;

pub use coords::{Quad, Viewport};
pub use device::GpuInit;
pub use graphics::{Graphics, GraphicsError};
pub use paint::{ClearColor, Color};
pub use texture::{new_quad, Canvas, FilterMode, Image, TextureResource};

/// Window types for [`window::RuntimeConfig`] and [`core::App`] callbacks.
pub use winit;
