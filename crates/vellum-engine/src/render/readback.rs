use std::sync::mpsc;

use crate::coords::Viewport;
use crate::graphics::GraphicsError;

use super::{Orientation, RenderCtx};

/// Copies `texture` back to the CPU as tightly packed RGBA8 rows, top row
/// first in screen order.
///
/// Blocks until the GPU has finished every submitted command.
pub(crate) fn read_texture(
    ctx: &RenderCtx<'_>,
    texture: &wgpu::Texture,
    size: Viewport,
    orientation: Orientation,
) -> Result<Vec<u8>, GraphicsError> {
    let format = texture.format();
    if format.block_copy_size(None) != Some(4) {
        return Err(GraphicsError::Readback(format!(
            "unsupported format {format:?}"
        )));
    }

    let layout = RowLayout::new(size.width);
    let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("vellum readback buffer"),
        size: layout.padded as u64 * size.height as u64,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("vellum readback encoder"),
        });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(layout.padded),
                rows_per_image: Some(size.height),
            },
        },
        wgpu::Extent3d {
            width: size.width,
            height: size.height,
            depth_or_array_layers: 1,
        },
    );
    ctx.queue.submit(std::iter::once(encoder.finish()));

    let slice = buffer.slice(..);
    let (sender, receiver) = mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |res| {
        let _ = sender.send(res);
    });
    ctx.device
        .poll(wgpu::PollType::wait_indefinitely())
        .map_err(|e| GraphicsError::Readback(e.to_string()))?;
    receiver
        .recv()
        .map_err(|e| GraphicsError::Readback(e.to_string()))?
        .map_err(|e| GraphicsError::Readback(e.to_string()))?;

    let pixels = {
        let mapped = slice.get_mapped_range();
        unpack_rows(
            &mapped,
            layout,
            size.height,
            orientation == Orientation::FramebufferSpace,
            is_bgra(format),
        )
    };
    buffer.unmap();

    log::trace!("read back {}x{} pixels", size.width, size.height);
    Ok(pixels)
}

/// Unpadded and 256-byte aligned row sizes of a 4-byte-per-texel copy.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct RowLayout {
    tight: u32,
    padded: u32,
}

impl RowLayout {
    fn new(width: u32) -> Self {
        let tight = width * 4;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        Self {
            tight,
            padded: tight.div_ceil(align) * align,
        }
    }
}

fn is_bgra(format: wgpu::TextureFormat) -> bool {
    matches!(
        format,
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb
    )
}

/// Strips row padding, optionally reversing row order and swizzling BGRA.
fn unpack_rows(
    mapped: &[u8],
    layout: RowLayout,
    height: u32,
    bottom_up: bool,
    bgra: bool,
) -> Vec<u8> {
    let tight = layout.tight as usize;
    let padded = layout.padded as usize;
    let mut out = Vec::with_capacity(tight * height as usize);

    for row in 0..height as usize {
        let src_row = if bottom_up { height as usize - 1 - row } else { row };
        let start = src_row * padded;
        out.extend_from_slice(&mapped[start..start + tight]);
    }

    if bgra {
        for px in out.chunks_exact_mut(4) {
            px.swap(0, 2);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_padded_to_copy_alignment() {
        assert_eq!(RowLayout::new(64), RowLayout { tight: 256, padded: 256 });
        assert_eq!(RowLayout::new(500), RowLayout { tight: 2000, padded: 2048 });
        assert_eq!(RowLayout::new(1), RowLayout { tight: 4, padded: 256 });
    }

    #[test]
    fn unpack_strips_padding_and_reverses_bottom_up_rows() {
        let layout = RowLayout { tight: 4, padded: 8 };
        // Two 1-pixel rows, each followed by 4 padding bytes.
        let mapped = [1, 2, 3, 4, 0, 0, 0, 0, 5, 6, 7, 8, 0, 0, 0, 0];

        assert_eq!(
            unpack_rows(&mapped, layout, 2, false, false),
            vec![1, 2, 3, 4, 5, 6, 7, 8]
        );
        assert_eq!(
            unpack_rows(&mapped, layout, 2, true, false),
            vec![5, 6, 7, 8, 1, 2, 3, 4]
        );
    }

    #[test]
    fn unpack_swizzles_bgra() {
        let layout = RowLayout { tight: 4, padded: 4 };
        let bgra = [0x00, 0x00, 0xff, 0x80];
        assert_eq!(
            unpack_rows(&bgra, layout, 1, false, true),
            vec![0xff, 0x00, 0x00, 0x80]
        );
    }
}
