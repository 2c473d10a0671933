use crate::paint::ClearColor;

use super::{DrawTarget, RenderCtx};

/// Clears the whole color attachment of `target` and submits.
pub fn clear(ctx: &RenderCtx<'_>, target: &DrawTarget<'_>, color: ClearColor) {
    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("vellum clear encoder"),
        });

    // Pass dropped before the encoder is finished.
    {
        let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("vellum clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(color.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }

    ctx.queue.submit(std::iter::once(encoder.finish()));
}
