//! Geometry living on the GPU.

use wgpu::util::DeviceExt;

/// Number of whole vertices of `stride` bytes that fit into `byte_len` bytes.
pub fn vertex_count(byte_len: u64, stride: u64) -> u32 {
    if stride == 0 {
        return 0;
    }
    (byte_len / stride) as u32
}

/// A vertex buffer, optionally indexed, that is drawn in one call.
///
/// The vertex buffer holds exactly `num_vertices * stride` bytes.
#[derive(Debug)]
pub struct GpuMesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub num_vertices: u32,
    pub stride: u64,
    pub index_buffer: Option<wgpu::Buffer>,
    pub num_indices: u32,
}

impl GpuMesh {
    pub fn new<V: bytemuck::Pod>(device: &wgpu::Device, name: &str, vertices: &[V]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let stride = std::mem::size_of::<V>() as u64;
        debug_assert_eq!(vertex_buffer.size(), stride * vertices.len() as u64);

        Self {
            name: name.to_string(),
            num_vertices: vertex_count(vertex_buffer.size(), stride),
            vertex_buffer,
            stride,
            index_buffer: None,
            num_indices: 0,
        }
    }

    pub fn with_indices(mut self, device: &wgpu::Device, indices: &[u16]) -> Self {
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", self.name)),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        self.index_buffer = Some(index_buffer);
        self.num_indices = indices.len() as u32;
        self
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        match &self.index_buffer {
            Some(indices) => {
                render_pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..self.num_indices, 0, 0..1);
            }
            None => render_pass.draw(0..self.num_vertices, 0..1),
        }
    }
}
