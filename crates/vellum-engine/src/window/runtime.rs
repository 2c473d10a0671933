use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::core::{App, AppControl, FrameCtx};
use crate::device::GpuInit;
use crate::graphics::{Graphics, GraphicsError};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
    pub gpu: GpuInit,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "vellum".to_string(),
            initial_size: LogicalSize::new(1000.0, 800.0),
            resizable: true,
            gpu: GpuInit::default(),
        }
    }
}

/// Entry point: one window, one render state, continuous redraw.
pub struct Runtime;

impl Runtime {
    /// Runs `app` until the window closes or a callback asks to exit.
    ///
    /// Returns the first setup or frame error.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    graphics: Graphics<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    app: A,
    entry: Option<WindowEntry>,
    failure: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            entry: None,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        event_loop.exit();
    }

    fn create_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let size = physical_viewport(window.inner_size());
        let gpu_init = self.config.gpu.clone();

        let entry = WindowEntryTryBuilder {
            clock: FrameClock::default(),
            window,
            graphics_builder: |w| Graphics::for_window(w, size, gpu_init),
        }
        .try_build()
        .context("failed to initialize graphics for window")?;

        Ok(entry)
    }

    fn redraw(&mut self) -> Result<AppControl> {
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else {
            return Ok(AppControl::Continue);
        };

        entry.with_mut(|fields| {
            let time = fields.clock.tick();
            let control = {
                let mut ctx = FrameCtx {
                    window: fields.window,
                    graphics: &mut *fields.graphics,
                    time,
                };
                app.on_frame(&mut ctx)
            };

            fields.window.pre_present_notify();
            fields.graphics.present();
            frame_outcome(control)
        })
    }
}

/// A frame whose screen image could not be acquired is dropped; the loop
/// keeps going. Every other error ends the run.
fn frame_outcome(result: Result<AppControl>) -> Result<AppControl> {
    match result {
        Err(err)
            if err
                .downcast_ref::<GraphicsError>()
                .is_some_and(GraphicsError::is_transient) =>
        {
            log::debug!("frame skipped: {err:#}");
            Ok(AppControl::Continue)
        }
        other => other,
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        let mut entry = match self.create_entry(event_loop) {
            Ok(entry) => entry,
            Err(err) => return self.fail(event_loop, err),
        };

        let setup = entry.with_graphics_mut(|graphics| self.app.setup(graphics));
        if let Err(err) = setup.context("app setup failed") {
            return self.fail(event_loop, err);
        }

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.app.on_window_event(&event) == AppControl::Exit {
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_graphics_mut(|g| g.resize(new_size.width, new_size.height));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let size = entry.with_window(|w| w.inner_size());
                    entry.with_graphics_mut(|g| g.resize(size.width, size.height));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => match self.redraw() {
                Ok(AppControl::Continue) => {}
                Ok(AppControl::Exit) => event_loop.exit(),
                Err(err) => self.fail(event_loop, err.context("frame failed")),
            },

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Release GPU resources while the event loop is still alive.
        self.entry = None;
        log::debug!("runtime exiting");
    }
}

fn physical_viewport(size: PhysicalSize<u32>) -> Viewport {
    Viewport::new(size.width, size.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipped_frames_continue() {
        for err in [wgpu::SurfaceError::Timeout, wgpu::SurfaceError::Other] {
            let result = Err(GraphicsError::FrameSkipped(err).into());
            assert_eq!(frame_outcome(result).unwrap(), AppControl::Continue);
        }
    }

    #[test]
    fn skipped_frames_continue_through_context() {
        let result: Result<AppControl> = Err(GraphicsError::FrameSkipped(wgpu::SurfaceError::Timeout))
            .context("drawing the scene");
        assert_eq!(frame_outcome(result).unwrap(), AppControl::Continue);
    }

    #[test]
    fn fatal_errors_end_the_run() {
        let result = Err(GraphicsError::Surface(wgpu::SurfaceError::OutOfMemory).into());
        assert!(frame_outcome(result).is_err());

        let result = Err(anyhow::anyhow!("app failed"));
        assert!(frame_outcome(result).is_err());
    }

    #[test]
    fn app_control_passes_through() {
        assert_eq!(frame_outcome(Ok(AppControl::Exit)).unwrap(), AppControl::Exit);
        assert_eq!(frame_outcome(Ok(AppControl::Continue)).unwrap(), AppControl::Continue);
    }
}
