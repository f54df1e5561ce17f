// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use super::mesh::GpuMesh;

/// One mesh draw. Group 0 (camera + lights) is bound once per pass; these
/// fill groups 1 and up.
pub struct DrawCall<'a> {
    pub pipeline: &'a wgpu::RenderPipeline,
    pub bind_groups: Vec<&'a wgpu::BindGroup>,
    pub mesh: &'a GpuMesh,
}

/// Whether a wireframe-flagged object is rasterised as lines this frame.
pub fn draws_as_lines(object_wireframe: bool, wireframe_enabled: bool, supported: bool) -> bool {
    object_wireframe && wireframe_enabled && supported
}

pub fn record_scene_pass(
    encoder: &mut wgpu::CommandEncoder,
    color_view: &wgpu::TextureView,
    depth_view: &wgpu::TextureView,
    clear_color: [f64; 3],
    frame_bind_group: &wgpu::BindGroup,
    draws: &[DrawCall],
) {
    let [r, g, b] = clear_color;
    let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("scene pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a: 1.0 }),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
    });

    pass.set_bind_group(0, Some(frame_bind_group), &[]);
    let mut current: Option<&wgpu::RenderPipeline> = None;
    for draw in draws {
        if !current.is_some_and(|p| std::ptr::eq(p, draw.pipeline)) {
            pass.set_pipeline(draw.pipeline);
            current = Some(draw.pipeline);
        }
        for (i, bg) in draw.bind_groups.iter().enumerate() {
            pass.set_bind_group(i as u32 + 1, Some(*bg), &[]);
        }
        draw.mesh.draw(&mut pass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_mode_needs_all_three() {
        assert!(draws_as_lines(true, true, true));
        assert!(!draws_as_lines(true, false, true));
        assert!(!draws_as_lines(true, true, false));
        assert!(!draws_as_lines(false, true, true));
    }
}
