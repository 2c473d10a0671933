//! GPU device + screen management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the screen (window surface or headless texture)
//! - acquiring screen frames for the render state

mod error;
mod frame;
mod gpu;
mod init;
mod screen;

pub use error::SurfaceErrorAction;
pub use frame::ScreenFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
pub use screen::Screen;
