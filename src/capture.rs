//! Frame read-back for golden image tests.
//!
//! With the `integration-tests` feature the frame is rendered into a
//! [`FrameCapture`] texture instead of the swapchain, copied into a mappable
//! buffer and handed to [`Demo::validate_frame`](crate::flow::Demo::validate_frame)
//! as an RGBA image.

use anyhow::Context as _;
use instant::Duration;

pub enum ImageTestResult {
    Passed,
    Waiting,
    Failed,
}

/// Row pitch of the read-back buffer. Texture copies need rows aligned to 256 bytes.
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Drop the per-row padding of a read-back buffer.
pub fn unpad_rows(data: &[u8], width: u32, height: u32, padded_bytes_per_row: u32) -> Vec<u8> {
    let row = (width * 4) as usize;
    data.chunks(padded_bytes_per_row as usize)
        .take(height as usize)
        .flat_map(|chunk| &chunk[..row])
        .copied()
        .collect()
}

pub fn bgra_to_rgba(pixels: &mut [u8]) {
    for pixel in pixels.chunks_exact_mut(4) {
        pixel.swap(0, 2);
    }
}

pub(crate) struct FrameCapture {
    texture: wgpu::Texture,
    buffer: wgpu::Buffer,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
}

impl FrameCapture {
    pub(crate) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Golden Image Test Output Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::COPY_SRC | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Golden Image Test Output Buffer"),
            size: (padded_bytes_per_row(width) * height) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });
        Self {
            texture,
            buffer,
            format,
            width,
            height,
        }
    }

    pub(crate) fn view(&self) -> wgpu::TextureView {
        self.texture
            .create_view(&wgpu::TextureViewDescriptor::default())
    }

    pub(crate) fn copy_to_buffer(&self, encoder: &mut wgpu::CommandEncoder) {
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &self.buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row(self.width)),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Wait for the copy and decode the buffer. Call after the encoder was submitted.
    pub(crate) fn read(
        &self,
        async_runtime: &tokio::runtime::Runtime,
        device: &wgpu::Device,
    ) -> anyhow::Result<image::RgbaImage> {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let buffer_slice = self.buffer.slice(..);
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        device.poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: Some(Duration::from_secs(3)),
        })?;
        async_runtime
            .block_on(rx)
            .context("The buffer mapping was cancelled")??;

        let mut pixels = {
            let data = buffer_slice.get_mapped_range();
            unpad_rows(&data, self.width, self.height, padded_bytes_per_row(self.width))
        };
        self.buffer.unmap();

        if matches!(
            self.format,
            wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb
        ) {
            bgra_to_rgba(&mut pixels);
        }
        image::RgbaImage::from_raw(self.width, self.height, pixels)
            .context("Read-back buffer is smaller than the frame")
    }
}
