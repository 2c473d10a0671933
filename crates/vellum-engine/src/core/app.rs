use winit::event::WindowEvent;

use crate::graphics::Graphics;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`crate::window::Runtime`].
pub trait App {
    /// Called once the window and its render state exist. Load images and
    /// create canvases here.
    fn setup(&mut self, graphics: &mut Graphics<'_>) -> anyhow::Result<()> {
        let _ = graphics;
        Ok(())
    }

    /// Called for every window event before the runtime handles it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per frame. The runtime presents the screen afterwards.
    ///
    /// An error stops the event loop and is returned from `Runtime::run`.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> anyhow::Result<AppControl>;
}
