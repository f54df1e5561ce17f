// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use bytemuck::{Pod, Zeroable};

use crate::gpu::buffers;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SkyVertex {
    pub position: [f32; 3],
}

impl SkyVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

// (normal, u axis, v axis) per face; corners are normal/2 ± u/2 ± v/2.
const CUBE_FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([0.0, 0.0, -1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
];

const QUAD_CORNERS: [[f32; 2]; 6] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [1.0, 1.0],
    [0.0, 1.0],
    [0.0, 0.0],
];

/// Unit cube centred on the origin, 36 non-indexed vertices.
pub fn cube_vertices() -> Vec<MeshVertex> {
    let mut vertices = Vec::with_capacity(36);
    for (normal, u_axis, v_axis) in CUBE_FACES {
        for [u, v] in QUAD_CORNERS {
            let position = std::array::from_fn(|i| {
                0.5 * normal[i] + (u - 0.5) * u_axis[i] + (v - 0.5) * v_axis[i]
            });
            vertices.push(MeshVertex {
                position,
                normal,
                uv: [u, v],
            });
        }
    }
    vertices
}

/// Cube spanning [-1, 1] used as the sky box; positions double as sample directions.
pub fn skybox_vertices() -> Vec<SkyVertex> {
    cube_vertices()
        .into_iter()
        .map(|v| SkyVertex {
            position: v.position.map(|c| c * 2.0),
        })
        .collect()
}

/// Vertex buffer plus optional index buffer.
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: Option<wgpu::Buffer>,
    pub count: u32,
}

impl GpuMesh {
    pub fn from_vertices<T: Pod>(device: &wgpu::Device, vertices: &[T], label: &str) -> Self {
        Self {
            vertex_buffer: buffers::create_vertex_buffer(device, vertices, label),
            index_buffer: None,
            count: vertices.len() as u32,
        }
    }

    pub fn indexed(
        device: &wgpu::Device,
        vertices: &[MeshVertex],
        indices: &[u32],
        label: &str,
    ) -> Self {
        Self {
            vertex_buffer: buffers::create_vertex_buffer(device, vertices, label),
            index_buffer: Some(buffers::create_index_buffer(
                device,
                indices,
                &format!("{label} indices"),
            )),
            count: indices.len() as u32,
        }
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        match &self.index_buffer {
            Some(indices) => {
                pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..self.count, 0, 0..1);
            }
            None => pass.draw(0..self.count, 0..1),
        }
    }
}
