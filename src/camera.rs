//! Projection, view and the per-frame camera uniform.

use cgmath::{Deg, Matrix4};
use wgpu::util::DeviceExt;

use crate::{config::RenderConfig, math::Transform};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    aspect: f32,
    fov_y: Deg<f32>,
    z_near: f32,
    z_far: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, fov_y: Deg<f32>, z_near: f32, z_far: f32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            fov_y,
            z_near,
            z_far,
        }
    }

    pub fn from_config(width: u32, height: u32, config: &RenderConfig) -> Self {
        Self::new(
            width,
            height,
            Deg(config.fov_y_degrees),
            config.z_near,
            config.z_far,
        )
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Transform {
        Transform::perspective(self.fov_y, self.aspect, self.z_near, self.z_far)
    }
}

/// A camera that looks down -Z from a fixed distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View {
    pub distance: f32,
}

impl View {
    pub fn new(distance: f32) -> Self {
        Self { distance }
    }

    pub fn calc_matrix(&self) -> Transform {
        Transform::identity().translate(0.0, 0.0, -self.distance)
    }
}

/// Uniform block shared by every shader that takes a transform.
///
/// `model` is uploaded next to the combined matrix so shaders can rotate normals.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub mvp: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        let identity: [[f32; 4]; 4] = Transform::identity().into();
        Self {
            mvp: identity,
            model: identity,
        }
    }

    pub fn update(&mut self, model: Transform, view: &View, projection: &Projection) {
        let mvp = projection.calc_matrix() * view.calc_matrix() * model;
        self.mvp = mvp.into();
        self.model = model.into();
    }

    pub fn mvp(&self) -> Matrix4<f32> {
        self.mvp.into()
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct CameraResources {
    pub view: View,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    pub fn new(device: &wgpu::Device, view: View) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::new()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("camera_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        Self {
            view,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn upload(&self, queue: &wgpu::Queue, uniform: &CameraUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[*uniform]));
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use cgmath::{Point3, Transform as _};

    use super::*;

    #[test]
    fn resize_updates_aspect_and_ignores_zero_sizes() {
        let mut projection = Projection::new(800, 600, Deg(60.0), 100.0, 1000.0);
        assert_relative_eq!(projection.aspect(), 800.0 / 600.0);
        projection.resize(1000, 500);
        assert_relative_eq!(projection.aspect(), 2.0);
        projection.resize(0, 500);
        assert_relative_eq!(projection.aspect(), 2.0);
    }

    #[test]
    fn origin_projects_into_the_visible_depth_range() {
        let projection = Projection::new(800, 600, Deg(60.0), 100.0, 1000.0);
        let mut uniform = CameraUniform::new();
        uniform.update(Transform::identity(), &View::new(500.0), &projection);
        let clip = uniform.mvp().transform_point(Point3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(clip.x, 0.0);
        assert_relative_eq!(clip.y, 0.0);
        assert!(clip.z > 0.0 && clip.z < 1.0);
    }

    #[test]
    fn uniform_layout_is_two_column_major_matrices() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 128);
        let uniform = CameraUniform::new();
        assert_eq!(uniform.mvp[3], [0.0, 0.0, 0.0, 1.0]);
    }
}
