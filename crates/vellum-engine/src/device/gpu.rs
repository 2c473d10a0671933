use anyhow::{Context, Result};

use crate::coords::Viewport;

use super::screen::{self, Screen};
use super::{GpuInit, ScreenFrame, SurfaceErrorAction};

/// Owns wgpu core objects and the screen.
///
/// This is the low-level drawing context:
/// - creates and stores Instance/Device/Queue
/// - creates and configures the screen (window swapchain or headless texture)
/// - acquires screen frames
pub struct Gpu<'w> {
    /// Kept alive for the surface.
    #[allow(dead_code)]
    instance: wgpu::Instance,
    device: wgpu::Device,
    queue: wgpu::Queue,
    screen: Screen<'w>,
}

impl<'w> Gpu<'w> {
    /// Creates a context presenting to `target` (a window or any other
    /// surface target), `size` being its drawable size in physical pixels.
    ///
    /// The surface lifetime `'w` must not outlive the window it was made from.
    pub async fn for_surface(
        target: impl Into<wgpu::SurfaceTarget<'w>>,
        size: Viewport,
        init: GpuInit,
    ) -> Result<Self> {
        anyhow::ensure!(!size.is_empty(), "surface has zero size");

        let instance = new_instance();
        let surface = instance
            .create_surface(target)
            .context("failed to create wgpu surface")?;

        let (adapter, device, queue) = request_device(&instance, Some(&surface), &init).await?;

        let caps = surface.get_capabilities(&adapter);
        let format = screen::choose_surface_format(&caps, init.prefer_srgb)
            .context("no supported surface formats")?;
        let alpha_mode = screen::choose_alpha_mode(&caps.alpha_modes, init.alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };
        surface.configure(&device, &config);

        log::info!(
            "GPU ready: {} ({:?}), surface {format:?} {alpha_mode:?} {}x{}",
            adapter.get_info().name,
            adapter.get_info().backend,
            size.width,
            size.height,
        );

        Ok(Self {
            instance,
            device,
            queue,
            screen: Screen::Window { surface, config },
        })
    }

    /// Creates a context whose screen is an offscreen texture of `size`.
    pub async fn headless(size: Viewport, init: GpuInit) -> Result<Gpu<'static>> {
        anyhow::ensure!(!size.is_empty(), "headless screen has zero size");

        let instance = new_instance();
        let (adapter, device, queue) = request_device(&instance, None, &init).await?;
        let texture = screen::headless_texture(&device, init.headless_format, size);

        log::info!(
            "GPU ready (headless): {} ({:?}), {:?} {}x{}",
            adapter.get_info().name,
            adapter.get_info().backend,
            init.headless_format,
            size.width,
            size.height,
        );

        Ok(Gpu {
            instance,
            device,
            queue,
            screen: Screen::Headless { texture, size },
        })
    }

    /// Color format shared by the screen, canvases and pipelines.
    pub fn color_format(&self) -> wgpu::TextureFormat {
        self.screen.format()
    }

    /// Current native pixel size of the screen.
    pub fn screen_size(&self) -> Viewport {
        self.screen.size()
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Reconfigures the screen after a resize.
    pub fn resize(&mut self, new_size: Viewport) {
        self.screen.resize(&self.device, new_size);
    }

    /// Acquires the next screen image.
    pub fn acquire_frame(&self) -> std::result::Result<ScreenFrame, wgpu::SurfaceError> {
        self.screen.acquire()
    }

    /// Converts a `SurfaceError` into a higher-level action.
    pub fn handle_surface_error(&self, err: &wgpu::SurfaceError) -> SurfaceErrorAction {
        self.screen.handle_error(&self.device, err)
    }
}

fn new_instance() -> wgpu::Instance {
    wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    })
}

async fn request_device(
    instance: &wgpu::Instance,
    compatible_surface: Option<&wgpu::Surface<'_>>,
    init: &GpuInit,
) -> Result<(wgpu::Adapter, wgpu::Device, wgpu::Queue)> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: init.power_preference,
            compatible_surface,
            force_fallback_adapter: false,
        })
        .await
        .context("failed to find a suitable GPU adapter")?;

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("vellum device"),
            required_features: init.required_features,
            required_limits: init.required_limits.clone(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        })
        .await
        .context("failed to create wgpu device/queue")?;

    Ok((adapter, device, queue))
}
