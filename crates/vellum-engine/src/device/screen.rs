use crate::coords::Viewport;

use super::{ScreenFrame, SurfaceErrorAction};

/// The visible drawing surface of a context.
///
/// `Window` wraps a configured swapchain surface. `Headless` is a plain
/// color texture of fixed size, used for tests and offscreen rendering; it
/// behaves like a window that never needs presenting.
pub enum Screen<'w> {
    Window {
        surface: wgpu::Surface<'w>,
        config: wgpu::SurfaceConfiguration,
    },
    Headless {
        texture: wgpu::Texture,
        size: Viewport,
    },
}

impl Screen<'_> {
    /// Native pixel size of the screen.
    pub fn size(&self) -> Viewport {
        match self {
            Screen::Window { config, .. } => Viewport::new(config.width, config.height),
            Screen::Headless { size, .. } => *size,
        }
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        match self {
            Screen::Window { config, .. } => config.format,
            Screen::Headless { texture, .. } => texture.format(),
        }
    }

    /// Reconfigures a window surface; headless screens keep their size.
    ///
    /// wgpu cannot configure a 0x0 surface, so zero sizes are ignored and the
    /// surface keeps its previous configuration until a real size arrives.
    pub fn resize(&mut self, device: &wgpu::Device, new_size: Viewport) {
        let Screen::Window { surface, config } = self else { return };
        if new_size.is_empty() {
            return;
        }
        config.width = new_size.width;
        config.height = new_size.height;
        surface.configure(device, config);
    }

    pub fn acquire(&self) -> Result<ScreenFrame, wgpu::SurfaceError> {
        match self {
            Screen::Window { surface, .. } => {
                let surface_texture = surface.get_current_texture()?;
                let view = surface_texture
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                Ok(ScreenFrame {
                    surface_texture: Some(surface_texture),
                    view,
                })
            }
            Screen::Headless { texture, .. } => Ok(ScreenFrame {
                surface_texture: None,
                view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
            }),
        }
    }

    /// Maps a surface error to an action, reconfiguring lost surfaces.
    pub fn handle_error(
        &self,
        device: &wgpu::Device,
        err: &wgpu::SurfaceError,
    ) -> SurfaceErrorAction {
        match self {
            Screen::Window { surface, config } => map_surface_error(surface, device, config, err),
            Screen::Headless { .. } => SurfaceErrorAction::Fatal,
        }
    }
}

pub(crate) fn headless_texture(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    size: Viewport,
) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("vellum headless screen"),
        size: wgpu::Extent3d {
            width: size.width.max(1),
            height: size.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    })
}

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let preferred = if prefer_srgb {
        [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ]
    } else {
        [wgpu::TextureFormat::Bgra8Unorm, wgpu::TextureFormat::Rgba8Unorm]
    };

    preferred
        .into_iter()
        .find(|f| caps.formats.contains(f))
        .or_else(|| caps.formats.first().copied())
}

/// Picks the requested alpha mode if supported, else a non-premultiplied
/// mode, else whatever the surface offers first.
pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    let fallbacks = [
        wgpu::CompositeAlphaMode::PostMultiplied,
        wgpu::CompositeAlphaMode::Inherit,
    ];
    requested
        .into_iter()
        .chain(fallbacks)
        .find(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    err: &wgpu::SurfaceError,
) -> SurfaceErrorAction {
    let action = SurfaceErrorAction::for_error(err);
    if action == SurfaceErrorAction::Reconfigured && config.width > 0 && config.height > 0 {
        log::warn!("surface {err:?}; reconfiguring");
        surface.configure(device, config);
    }
    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::CompositeAlphaMode as Mode;

    #[test]
    fn alpha_mode_honours_supported_request() {
        let supported = [Mode::Opaque, Mode::PreMultiplied];
        assert_eq!(choose_alpha_mode(&supported, Some(Mode::PreMultiplied)), Mode::PreMultiplied);
    }

    #[test]
    fn alpha_mode_prefers_non_premultiplied_fallback() {
        let supported = [Mode::Opaque, Mode::PostMultiplied];
        assert_eq!(choose_alpha_mode(&supported, Some(Mode::PreMultiplied)), Mode::PostMultiplied);
    }

    #[test]
    fn alpha_mode_falls_back_to_first_supported() {
        let supported = [Mode::Opaque];
        assert_eq!(choose_alpha_mode(&supported, None), Mode::Opaque);
        assert_eq!(choose_alpha_mode(&[], None), Mode::Auto);
    }
}
