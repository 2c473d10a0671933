/// Screen image acquired for the current frame.
///
/// Window surfaces hand out a `SurfaceTexture` that must be presented (or
/// dropped) before the next one can be acquired. Headless screens have no
/// surface texture and are never presented.
pub struct ScreenFrame {
    pub surface_texture: Option<wgpu::SurfaceTexture>,
    pub view: wgpu::TextureView,
}

impl ScreenFrame {
    /// Presents window frames; a no-op for headless ones.
    pub fn present(self) {
        drop(self.view);
        if let Some(surface_texture) = self.surface_texture {
            surface_texture.present();
        }
    }
}
