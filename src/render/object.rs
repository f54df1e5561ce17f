// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4};

use crate::gpu::buffers;
use crate::gpu::pipeline;
use crate::gpu::texture::GpuTexture;

/// Per-draw uniform. Must match `Object` in `common/object.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuObject {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub specular_color: [f32; 3],
    pub shininess: f32,
    pub use_specular_map: u32,
    pub _pad: [u32; 3],
}

impl GpuObject {
    pub fn new(model: Mat4, specular_color: [f32; 3], shininess: f32, use_specular_map: bool) -> Self {
        let normal = Mat3::from_mat4(model).inverse().transpose();
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: Mat4::from_mat3(normal).to_cols_array_2d(),
            specular_color,
            shininess,
            use_specular_map: use_specular_map as u32,
            _pad: [0; 3],
        }
    }

    /// Only the transform changes frame to frame.
    pub fn with_model(self, model: Mat4) -> Self {
        Self::new(
            model,
            self.specular_color,
            self.shininess,
            self.use_specular_map != 0,
        )
    }
}

pub fn object_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("object layout"),
        entries: &[pipeline::uniform_entry(0)],
    })
}

/// Diffuse + specular texture pairs, group 2 of the mesh pipeline.
pub fn material_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let d2 = wgpu::TextureViewDimension::D2;
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("material layout"),
        entries: &[
            pipeline::texture_entry(0, d2),
            pipeline::sampler_entry(1),
            pipeline::texture_entry(2, d2),
            pipeline::sampler_entry(3),
        ],
    })
}

/// A uniform buffer with its bind group.
pub struct ObjectBinding {
    pub uniform: GpuObject,
    buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl ObjectBinding {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniform: GpuObject,
        label: &str,
    ) -> Self {
        let buffer = buffers::create_uniform_buffer(device, &uniform, label);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self {
            uniform,
            buffer,
            bind_group,
        }
    }

    pub fn set_model(&mut self, queue: &wgpu::Queue, model: Mat4) {
        let next = self.uniform.with_model(model);
        if next != self.uniform {
            self.uniform = next;
            buffers::update_uniform_buffer(queue, &self.buffer, &self.uniform);
        }
    }
}

pub fn create_material(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    diffuse: &GpuTexture,
    specular: &GpuTexture,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&diffuse.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&diffuse.sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(&specular.view),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::Sampler(&specular.sampler),
            },
        ],
    })
}
