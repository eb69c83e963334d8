//! Texture readback
//!
//! Copies a color texture into a staging buffer and maps it on the CPU.

use crate::context::WgpuContext;
use crate::core::texture::{to_texel_order, Texture2D};
use crate::error::{Error, Result};

/// Bytes per row of a `width`-pixel RGBA8 copy, padded to the copy alignment.
pub fn padded_bytes_per_row(width: u32) -> u32 {
    wgpu::util::align_to(width * 4, wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
}

/// Read `texture` back as tightly packed RGBA8 rows. Blocks until the copy
/// has finished.
pub fn read_texture_rgba8(ctx: &WgpuContext, texture: &Texture2D) -> Result<Vec<u8>> {
    let (width, height) = texture.size();
    let padded = padded_bytes_per_row(width);
    let size = padded as u64 * height as u64;

    let staging = ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("texture readback staging"),
        size,
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let mut encoder = ctx.create_encoder(Some("texture readback"));
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture: &texture.texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded),
                rows_per_image: Some(height),
            },
        },
        texture.size,
    );
    ctx.submit([encoder.finish()]);

    let slice = staging.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    ctx.device
        .poll(wgpu::PollType::wait_indefinitely())
        .map_err(poll_error)?;
    rx.recv()
        .map_err(|_| Error::Initialization("device lost during readback".into()))??;

    let data = slice.get_mapped_range();
    let row_bytes = (width * 4) as usize;
    let mut pixels = Vec::with_capacity(row_bytes * height as usize);
    for row in data.chunks(padded as usize) {
        pixels.extend_from_slice(&row[..row_bytes]);
    }
    drop(data);
    staging.unmap();
    staging.destroy();

    Ok(to_texel_order(&pixels, texture.format()).into_owned())
}

fn poll_error(error: wgpu::PollError) -> Error {
    Error::Initialization(format!("device poll failed during readback: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_bytes_per_row() {
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
        assert_eq!(padded_bytes_per_row(1), 256);
    }

    #[test]
    fn test_poll_failure_becomes_initialization_error() {
        let err = poll_error(wgpu::PollError::Timeout);
        assert!(matches!(err, Error::Initialization(message) if message.contains("readback")));
    }
}
