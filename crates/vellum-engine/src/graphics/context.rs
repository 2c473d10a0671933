use std::path::Path;

use crate::coords::{Quad, Viewport};
use crate::device::{Gpu, GpuInit, ScreenFrame, SurfaceErrorAction};
use crate::paint::{ClearColor, Color};
use crate::render::pipeline::{RectParams, RectPipeline, SpriteParams, SpritePipeline};
use crate::render::{self, DrawTarget, Orientation, RenderCtx};
use crate::texture::{Canvas, Image, SamplerCache, TextureResource};

use super::target::{TargetScope, TargetState};
use super::GraphicsError;

/// The render state: GPU context, both pipelines and the active target.
///
/// Every `clear`, `draw` and `rectangle` call records and submits its own
/// pass, so calls land in the target selected at the time of the call and in
/// call order.
///
/// Blending is sticky: sprites replace the target's pixels until the first
/// [`Graphics::rectangle`] call, and blend with straight alpha from then on.
pub struct Graphics<'w> {
    // Dropped before the surface it came from.
    frame: Option<ScreenFrame>,
    gpu: Gpu<'w>,
    sprites: SpritePipeline,
    rects: RectPipeline,
    samplers: SamplerCache,
    target: TargetState,
    color: Color,
    blend_enabled: bool,
}

impl<'w> Graphics<'w> {
    /// Builds the pipelines and sampler cache for `gpu` and selects the
    /// screen as the active target.
    pub fn new(gpu: Gpu<'w>) -> Self {
        let ctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.color_format());
        let sprites = SpritePipeline::new(&ctx);
        let rects = RectPipeline::new(&ctx);
        let samplers = SamplerCache::new(gpu.device());
        let target = TargetState::screen(gpu.screen_size());

        Self {
            frame: None,
            gpu,
            sprites,
            rects,
            samplers,
            target,
            color: Color::default(),
            blend_enabled: false,
        }
    }

    /// Creates a render state presenting to a window (or any surface target)
    /// whose drawable size is `size` physical pixels.
    pub fn for_window(
        window: impl Into<wgpu::SurfaceTarget<'w>>,
        size: Viewport,
        init: GpuInit,
    ) -> Result<Self, GraphicsError> {
        let gpu = pollster::block_on(Gpu::for_surface(window, size, init))
            .map_err(GraphicsError::context)?;
        Ok(Self::new(gpu))
    }

    pub fn gpu(&self) -> &Gpu<'w> {
        &self.gpu
    }

    pub fn color_format(&self) -> wgpu::TextureFormat {
        self.gpu.color_format()
    }

    // ── targets ───────────────────────────────────────────────────────────

    /// Selects the render target: `None` for the screen, or a canvas.
    ///
    /// Images cannot be rendered into; selecting one fails with
    /// [`GraphicsError::NotARenderTarget`] and leaves the state untouched.
    pub fn set_target(&mut self, target: Option<&TextureResource>) -> Result<(), GraphicsError> {
        match target {
            None => self.set_canvas(None),
            Some(TextureResource::Canvas(canvas)) => self.set_canvas(Some(canvas)),
            Some(TextureResource::Image(_)) => return Err(GraphicsError::NotARenderTarget),
        }
        Ok(())
    }

    /// Selects `canvas`, or the screen for `None`, and sets the viewport to
    /// its pixel size.
    pub fn set_canvas(&mut self, canvas: Option<&Canvas>) {
        self.target.select(canvas, self.gpu.screen_size());
        let v = self.target.viewport();
        match canvas {
            Some(_) => log::debug!("render target: canvas {}x{}", v.width, v.height),
            None => log::debug!("render target: screen {}x{}", v.width, v.height),
        }
    }

    /// Selects `canvas` until the returned guard drops, then restores the
    /// target that was active before.
    pub fn scoped_target(&mut self, canvas: &Canvas) -> TargetScope<'_, 'w> {
        let previous = self.target.active().cloned();
        self.set_canvas(Some(canvas));
        TargetScope::new(self, previous)
    }

    pub fn target(&self) -> &TargetState {
        &self.target
    }

    /// Active canvas, or `None` while drawing to the screen.
    pub fn active_target(&self) -> Option<&Canvas> {
        self.target.active()
    }

    /// Pixel size of the last selected target.
    pub fn viewport(&self) -> Viewport {
        self.target.viewport()
    }

    /// Current native pixel size of the screen.
    pub fn screen_size(&self) -> Viewport {
        self.gpu.screen_size()
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Clears the whole active target.
    pub fn clear(&mut self, color: ClearColor) -> Result<(), GraphicsError> {
        self.acquire_screen()?;
        let target = self.draw_target()?;
        render::clear(&self.render_ctx(), &target, color);
        Ok(())
    }

    pub fn clear_rgba(&mut self, r: f32, g: f32, b: f32, a: f32) -> Result<(), GraphicsError> {
        self.clear(ClearColor::new(r, g, b, a))
    }

    /// Draws the `quad` region of `texture` at `(x, y)` with size
    /// `width` × `height` in target pixels.
    ///
    /// Canvases are sampled with `v` inverted. Drawing the active canvas into
    /// itself fails with [`GraphicsError::FeedbackLoop`].
    pub fn draw(
        &mut self,
        texture: impl Into<TextureResource>,
        quad: Quad,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), GraphicsError> {
        let texture = texture.into();
        if let Some(canvas) = texture.as_canvas() {
            if self.target.is_active(canvas) {
                return Err(GraphicsError::FeedbackLoop);
            }
        }

        self.acquire_screen()?;
        let target = self.draw_target()?;
        let params = SpriteParams {
            x,
            y,
            width,
            height,
            quad,
            time_ms: 0.0,
            resolution: self.resolution(),
            flip: texture.flipped(),
        };
        log::trace!("draw {params:?} blend={}", self.blend_enabled);

        let sampler = self.samplers.get(texture.filter());
        self.sprites.render(
            &self.render_ctx(),
            &target,
            &params,
            texture.view(),
            sampler,
            self.blend_enabled,
        );
        Ok(())
    }

    /// Replaces the color used by [`Graphics::rectangle`].
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Fills a rectangle with the active color, alpha-blended.
    ///
    /// Also switches sprite drawing to blending for the rest of the state's
    /// life.
    pub fn rectangle(&mut self, x: f32, y: f32, width: f32, height: f32) -> Result<(), GraphicsError> {
        self.acquire_screen()?;
        if !self.blend_enabled {
            log::debug!("blending enabled");
            self.blend_enabled = true;
        }

        let target = self.draw_target()?;
        let params = RectParams {
            x,
            y,
            width,
            height,
            color: self.color,
            resolution: self.resolution(),
        };
        log::trace!("rectangle {params:?}");

        self.rects.render(&self.render_ctx(), &target, &params);
        Ok(())
    }

    /// Whether sprites are currently drawn with alpha blending.
    pub fn blend_enabled(&self) -> bool {
        self.blend_enabled
    }

    // ── resources ─────────────────────────────────────────────────────────

    /// Uploads tightly packed RGBA8 pixels, top row first.
    pub fn new_image(&self, pixels: &[u8], width: u32, height: u32) -> Result<Image, GraphicsError> {
        Image::from_rgba(
            self.gpu.device(),
            self.gpu.queue(),
            self.color_format(),
            pixels,
            width,
            height,
        )
    }

    /// Decodes an encoded image (PNG) from memory.
    pub fn new_image_from_bytes(&self, bytes: &[u8]) -> Result<Image, GraphicsError> {
        Image::from_bytes(self.gpu.device(), self.gpu.queue(), self.color_format(), bytes)
    }

    /// Decodes an image file.
    pub fn new_image_from_path(&self, path: impl AsRef<Path>) -> Result<Image, GraphicsError> {
        Image::from_path(self.gpu.device(), self.gpu.queue(), self.color_format(), path)
    }

    pub fn new_canvas(&self, width: u32, height: u32) -> Result<Canvas, GraphicsError> {
        Canvas::new(self.gpu.device(), self.color_format(), width, height)
    }

    /// Copies `canvas` to the CPU as RGBA8 rows, top row first.
    pub fn read_pixels(&self, canvas: &Canvas) -> Result<Vec<u8>, GraphicsError> {
        render::read_texture(
            &self.render_ctx(),
            &canvas.inner.texture,
            canvas.inner.size,
            Orientation::FramebufferSpace,
        )
    }

    // ── frame lifecycle ───────────────────────────────────────────────────

    /// Presents everything drawn to the screen since the last present.
    ///
    /// A no-op when nothing touched the screen, and for headless screens.
    pub fn present(&mut self) {
        if let Some(frame) = self.frame.take() {
            frame.present();
        }
    }

    /// Reconfigures the screen for a new pixel size.
    ///
    /// Zero sizes (minimized windows) are ignored. An unpresented screen
    /// frame is discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.frame = None;
        self.gpu.resize(Viewport::new(width, height));
        if self.target.active().is_none() {
            self.target.select(None, self.gpu.screen_size());
        }
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn render_ctx(&self) -> RenderCtx<'_> {
        RenderCtx::new(self.gpu.device(), self.gpu.queue(), self.gpu.color_format())
    }

    fn resolution(&self) -> Viewport {
        match self.target.active() {
            Some(canvas) => Viewport::new(canvas.width(), canvas.height()),
            None => self.gpu.screen_size(),
        }
    }

    /// Acquires the screen frame on first use while the screen is active.
    ///
    /// Timeouts and a surface still lost after one reconfigure come back as
    /// [`GraphicsError::FrameSkipped`].
    fn acquire_screen(&mut self) -> Result<(), GraphicsError> {
        if self.target.active().is_some() || self.frame.is_some() {
            return Ok(());
        }

        let frame = match self.gpu.acquire_frame() {
            Ok(frame) => frame,
            Err(err) => match self.gpu.handle_surface_error(&err) {
                SurfaceErrorAction::Reconfigured => self
                    .gpu
                    .acquire_frame()
                    .map_err(GraphicsError::acquire)?,
                SurfaceErrorAction::SkipFrame | SurfaceErrorAction::Fatal => {
                    return Err(GraphicsError::acquire(err));
                }
            },
        };
        self.frame = Some(frame);
        Ok(())
    }

    fn draw_target(&self) -> Result<DrawTarget<'_>, GraphicsError> {
        let orientation = self.target.orientation();
        let view = match self.target.active() {
            Some(canvas) => canvas.view(),
            None => self
                .frame
                .as_ref()
                .map(|frame| &frame.view)
                .ok_or(GraphicsError::Surface(wgpu::SurfaceError::Lost))?,
        };
        Ok(DrawTarget::new(view, orientation))
    }
}

impl Graphics<'static> {
    /// Creates a render state whose screen is an offscreen
    /// `width` × `height` texture.
    pub fn headless(width: u32, height: u32, init: GpuInit) -> Result<Self, GraphicsError> {
        let size = Viewport::new(width, height);
        if size.is_empty() {
            return Err(GraphicsError::InvalidSize { width, height });
        }
        let gpu = pollster::block_on(Gpu::headless(size, init)).map_err(GraphicsError::context)?;
        Ok(Self::new(gpu))
    }
}
