use bytemuck::{Pod, Zeroable};

use crate::coords::{Quad, Viewport};
use crate::render::{DrawTarget, Orientation, RenderCtx};

use super::common::{
    alpha_blend, quad_pipeline, submit_pass, uniform_binding_size, uniform_buffer, UnitQuad,
};

/// `time_ms` is uploaded in seconds.
pub const TIME_SCALE: f32 = 0.001;

/// One textured rectangle.
///
/// `x`, `y`, `width`, `height` are target pixels; `quad` selects the sampled
/// region of the source texture.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpriteParams {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub quad: Quad,
    pub time_ms: f32,
    pub resolution: Viewport,
    /// Inverts `v` when sampling (framebuffer-space sources).
    pub flip: bool,
}

impl SpriteParams {
    fn uniform(&self, orientation: Orientation) -> SpriteUniform {
        SpriteUniform {
            resolution: self.resolution.resolution(),
            offset: [self.x, self.y],
            size: [self.width, self.height],
            tex_offset: self.quad.offset(),
            tex_size: self.quad.size(),
            time: self.time_ms * TIME_SCALE,
            flip: self.flip as u32,
            target_flip: orientation.flag(),
            _pad: [0; 3],
        }
    }
}

/// Textured-quad renderer.
///
/// Holds a replace and an alpha-blended variant of the same program; the
/// caller picks one per draw.
pub struct SpritePipeline {
    replace: wgpu::RenderPipeline,
    blended: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    uniform: wgpu::Buffer,
    quad: UnitQuad,
}

impl SpritePipeline {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("vellum sprite shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("vellum sprite bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Uniform,
                                has_dynamic_offset: false,
                                min_binding_size: uniform_binding_size::<SpriteUniform>(),
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 2,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("vellum sprite pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let replace = quad_pipeline(
            ctx,
            "vellum sprite pipeline",
            &shader,
            &pipeline_layout,
            None,
        );
        let blended = quad_pipeline(
            ctx,
            "vellum sprite pipeline (blended)",
            &shader,
            &pipeline_layout,
            Some(alpha_blend()),
        );

        log::debug!("sprite pipeline ready ({:?})", ctx.color_format);

        Self {
            replace,
            blended,
            bind_group_layout,
            uniform: uniform_buffer::<SpriteUniform>(ctx.device, "vellum sprite ubo"),
            quad: UnitQuad::new(ctx.device, "vellum sprite"),
        }
    }

    /// Draws `texture` over `params` into `target` and submits.
    ///
    /// `blend` selects the alpha-blended variant; otherwise texels replace
    /// the target's pixels.
    pub fn render(
        &self,
        ctx: &RenderCtx<'_>,
        target: &DrawTarget<'_>,
        params: &SpriteParams,
        texture: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        blend: bool,
    ) {
        let u = params.uniform(target.orientation);
        ctx.queue.write_buffer(&self.uniform, 0, bytemuck::bytes_of(&u));

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vellum sprite bind group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.uniform.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(texture),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        let pipeline = if blend { &self.blended } else { &self.replace };

        submit_pass(ctx, target, "vellum sprite pass", params.resolution, |rpass| {
            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, &bind_group, &[]);
            self.quad.draw(rpass);
        });
    }
}

/// Mirrors `Sprite` in `sprite.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SpriteUniform {
    resolution: [f32; 2],
    offset: [f32; 2],
    size: [f32; 2],
    tex_offset: [f32; 2],
    tex_size: [f32; 2],
    time: f32,
    flip: u32,
    target_flip: u32,
    _pad: [u32; 3], // 16-byte struct size
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(flip: bool) -> SpriteParams {
        SpriteParams {
            x: 10.0,
            y: 20.0,
            width: 64.0,
            height: 32.0,
            quad: Quad::new(0.25, 0.25, 0.5, 0.5),
            time_ms: 0.0,
            resolution: Viewport::new(500, 400),
            flip,
        }
    }

    #[test]
    fn uniform_matches_wgsl_layout() {
        assert_eq!(std::mem::size_of::<SpriteUniform>(), 64);
        assert_eq!(std::mem::offset_of!(SpriteUniform, time), 40);
        assert_eq!(std::mem::offset_of!(SpriteUniform, flip), 44);
        assert_eq!(std::mem::offset_of!(SpriteUniform, target_flip), 48);
    }

    #[test]
    fn uniform_carries_geometry_and_quad() {
        let u = params(false).uniform(Orientation::ScreenSpace);
        assert_eq!(u.resolution, [500.0, 400.0]);
        assert_eq!(u.offset, [10.0, 20.0]);
        assert_eq!(u.size, [64.0, 32.0]);
        assert_eq!(u.tex_offset, [0.25, 0.25]);
        assert_eq!(u.tex_size, [0.5, 0.5]);
        assert_eq!(u.time, 0.0);
    }

    #[test]
    fn flip_flags_are_independent() {
        let u = params(true).uniform(Orientation::ScreenSpace);
        assert_eq!((u.flip, u.target_flip), (1, 0));
        let u = params(false).uniform(Orientation::FramebufferSpace);
        assert_eq!((u.flip, u.target_flip), (0, 1));
    }

    #[test]
    fn time_is_uploaded_in_seconds() {
        let mut p = params(false);
        p.time_ms = 1500.0;
        assert!((p.uniform(Orientation::ScreenSpace).time - 1.5).abs() < 1e-6);
    }
}
