use winit::window::Window;

use crate::graphics::Graphics;
use crate::time::FrameTime;

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window borrow carried by `Graphics<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub graphics: &'a mut Graphics<'w>,
    pub time: FrameTime,
}

impl FrameCtx<'_, '_> {
    /// Physical pixels per logical pixel. Draw coordinates are physical, so
    /// layouts sized in logical units are multiplied by this.
    pub fn scale_factor(&self) -> f32 {
        self.window.scale_factor() as f32
    }
}
