use std::{path::Path, sync::mpsc};

use image::{ImageBuffer, Rgba};
use vello::wgpu;

use crate::{
  Error, Result,
  render::{GpuHandle, RenderConfig},
};

/// Rows copied out of a texture must start on this many bytes.
fn padded_row_bytes(width: u32) -> u32 {
  let unpadded = 4 * width;
  let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
  unpadded.div_ceil(align) * align
}

/// Drops the per-row padding wgpu adds to texture copies.
fn unpad_rows(data: &[u8], width: u32, height: u32, padded: u32) -> Vec<u8> {
  let row = (4 * width) as usize;
  data.chunks(padded as usize).take(height as usize).flat_map(|r| &r[..row]).copied().collect()
}

pub(crate) fn save_png(handle: &GpuHandle, config: RenderConfig, path: &Path) -> Result<()> {
  let padded = padded_row_bytes(config.width);

  let buffer = handle.device.create_buffer(&wgpu::BufferDescriptor {
    label:              Some("Output Buffer"),
    size:               u64::from(padded) * u64::from(config.height),
    usage:              wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
    mapped_at_creation: false,
  });

  let mut encoder = handle.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
    label: Some("texture_buffer_copy_encoder"),
  });

  encoder.copy_texture_to_buffer(
    wgpu::TexelCopyTextureInfo {
      texture:   &handle.texture,
      mip_level: 0,
      origin:    wgpu::Origin3d::ZERO,
      aspect:    wgpu::TextureAspect::All,
    },
    wgpu::TexelCopyBufferInfo {
      buffer: &buffer,
      layout: wgpu::TexelCopyBufferLayout {
        offset:         0,
        bytes_per_row:  Some(padded),
        rows_per_image: Some(config.height),
      },
    },
    config.extent_3d(),
  );

  handle.queue.submit(std::iter::once(encoder.finish()));

  let slice = buffer.slice(..);
  let (tx, rx) = mpsc::channel();
  slice.map_async(wgpu::MapMode::Read, move |result| {
    let _ = tx.send(result);
  });
  handle.device.poll(wgpu::PollType::Wait).map_err(|e| Error::Readback(e.to_string()))?;
  rx.recv()
    .map_err(|e| Error::Readback(e.to_string()))?
    .map_err(|e| Error::Readback(e.to_string()))?;

  let pixels = unpad_rows(&slice.get_mapped_range(), config.width, config.height, padded);
  buffer.unmap();

  let image = ImageBuffer::<Rgba<u8>, _>::from_raw(config.width, config.height, pixels)
    .ok_or_else(|| Error::Readback("pixel buffer does not match the texture size".into()))?;
  image.save(path)?;
  Ok(())
}
