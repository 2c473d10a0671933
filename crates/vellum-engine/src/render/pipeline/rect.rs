use bytemuck::{Pod, Zeroable};

use crate::coords::Viewport;
use crate::paint::Color;
use crate::render::{DrawTarget, Orientation, RenderCtx};

use super::common::{
    alpha_blend, quad_pipeline, submit_pass, uniform_binding_size, uniform_buffer, UnitQuad,
};

/// One flat-colored rectangle in target pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RectParams {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    pub resolution: Viewport,
}

impl RectParams {
    fn uniform(&self, orientation: Orientation) -> RectUniform {
        RectUniform {
            resolution: self.resolution.resolution(),
            offset: [self.x, self.y],
            size: [self.width, self.height],
            target_flip: orientation.flag(),
            _pad: 0,
            color: self.color.to_array(),
        }
    }
}

/// Solid rectangle renderer, always alpha-blended.
///
/// Color is straight (non-premultiplied) RGBA.
pub struct RectPipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform: wgpu::Buffer,
    quad: UnitQuad,
}

impl RectPipeline {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("vellum rect shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/rect.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("vellum rect bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: uniform_binding_size::<RectUniform>(),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("vellum rect pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = quad_pipeline(
            ctx,
            "vellum rect pipeline",
            &shader,
            &pipeline_layout,
            Some(alpha_blend()),
        );

        let uniform = uniform_buffer::<RectUniform>(ctx.device, "vellum rect ubo");

        // The uniform is the only binding, so one bind group serves every draw.
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vellum rect bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform.as_entire_binding(),
            }],
        });

        log::debug!("rect pipeline ready ({:?})", ctx.color_format);

        Self {
            pipeline,
            bind_group,
            uniform,
            quad: UnitQuad::new(ctx.device, "vellum rect"),
        }
    }

    /// Draws one rectangle into `target` and submits.
    pub fn render(&self, ctx: &RenderCtx<'_>, target: &DrawTarget<'_>, params: &RectParams) {
        let u = params.uniform(target.orientation);
        ctx.queue.write_buffer(&self.uniform, 0, bytemuck::bytes_of(&u));

        submit_pass(ctx, target, "vellum rect pass", params.resolution, |rpass| {
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            self.quad.draw(rpass);
        });
    }
}

/// Mirrors `Rect` in `rect.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RectUniform {
    resolution: [f32; 2],
    offset: [f32; 2],
    size: [f32; 2],
    target_flip: u32,
    _pad: u32,
    color: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_matches_wgsl_layout() {
        assert_eq!(std::mem::size_of::<RectUniform>(), 48);
        assert_eq!(std::mem::offset_of!(RectUniform, target_flip), 24);
        assert_eq!(std::mem::offset_of!(RectUniform, color), 32);
    }

    #[test]
    fn uniform_uses_given_color() {
        let params = RectParams {
            x: 0.0,
            y: 0.0,
            width: 500.0,
            height: 400.0,
            color: Color::new(1.0, 0.0, 0.0, 0.5),
            resolution: Viewport::new(500, 400),
        };
        let u = params.uniform(Orientation::FramebufferSpace);
        assert_eq!(u.color, [1.0, 0.0, 0.0, 0.5]);
        assert_eq!(u.target_flip, 1);
        assert_eq!(u.size, [500.0, 400.0]);
    }
}
