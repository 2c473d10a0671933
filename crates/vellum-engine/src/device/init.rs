/// Initialization parameters for the GPU layer.
///
/// Add configuration flags only when a concrete platform or backend
/// requirement exists.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// Off by default: colors and image texels are written as given, with
    /// blending in gamma space.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior). FIFO is supported everywhere.
    pub present_mode: wgpu::PresentMode,

    /// Preferred compositing alpha mode for window surfaces.
    ///
    /// Defaults to `PostMultiplied`: the surface is composited as
    /// non-premultiplied alpha, matching the straight-alpha colors the
    /// pipelines write. Unsupported modes fall back to a supported one.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub power_preference: wgpu::PowerPreference,

    /// Required wgpu features. Keep empty for portability.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Frame latency hint for window surfaces.
    pub desired_maximum_frame_latency: u32,

    /// Color format of the offscreen screen used by headless contexts.
    pub headless_format: wgpu::TextureFormat,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: Some(wgpu::CompositeAlphaMode::PostMultiplied),
            power_preference: wgpu::PowerPreference::HighPerformance,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
            headless_format: wgpu::TextureFormat::Rgba8Unorm,
        }
    }
}

impl GpuInit {
    /// Settings for tests and offscreen tools: low power, downlevel limits.
    pub fn headless() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::LowPower,
            required_limits: wgpu::Limits::downlevel_defaults(),
            ..Self::default()
        }
    }
}
