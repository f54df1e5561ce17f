// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Instant;

use glam::{Mat4, Vec3};

use crate::constants::CLEAR_COLOR;
use crate::gpu::buffers;
use crate::render::frame::{self, DrawCall};
use crate::render::lights::{self, GpuLights};

use super::state::AppState;

impl AppState {
    pub fn update_and_render(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        let t = (now - self.start_time).as_secs_f32();

        self.controller.update(&mut self.camera, dt);
        self.controller.apply_mouse_look(&mut self.camera);
        self.controller.apply_scroll(&mut self.camera);
        self.update_uniforms(t);

        let output = match self.gpu.surface.get_current_texture() {
            Ok(tex) => tex,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.resize(self.gpu.width(), self.gpu.height());
                return;
            }
            Err(e) => {
                log::error!("Surface error: {e}");
                return;
            }
        };
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });

        let draws = self.draw_list();
        frame::record_scene_pass(
            &mut encoder,
            &surface_view,
            &self.gpu.depth_view,
            CLEAR_COLOR,
            &self.frame_bind_group,
            &draws,
        );

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    fn update_uniforms(&mut self, t: f32) {
        let queue = &self.gpu.queue;
        let gpu_camera = self.camera.to_gpu(self.gpu.width(), self.gpu.height());
        buffers::update_uniform_buffer(queue, &self.camera_buffer, &gpu_camera);
        buffers::update_uniform_buffer(queue, &self.lights_buffer, &GpuLights::at_time(t));

        let pushed = self.pusher.as_mut().map(|p| {
            p.update();
            p.position()
        });
        for obj in &mut self.objects {
            let model = match pushed {
                Some(xz) if obj.pushable => {
                    let y = obj.transform.position[1];
                    obj.transform.matrix_at(Vec3::new(xz.x, y, xz.y), t)
                }
                _ => obj.transform.matrix(t),
            };
            obj.object.set_model(queue, model);
        }

        let lamp_model = Mat4::from_translation(lights::point_light_position(t))
            * Mat4::from_scale(Vec3::splat(self.lamp.scale));
        self.lamp.object.set_model(queue, lamp_model);
    }

    /// Objects first, then the lamp, then the sky so it only fills what's left.
    fn draw_list(&self) -> Vec<DrawCall<'_>> {
        let pipelines = &self.pipelines;
        let mut draws = Vec::new();

        for obj in &self.objects {
            let lines = frame::draws_as_lines(
                obj.wireframe,
                self.wireframe,
                pipelines.wireframe.is_some(),
            );
            let pipeline = match &pipelines.wireframe {
                Some(wire) if lines => wire,
                _ => &pipelines.mesh,
            };
            for part in obj.parts.iter() {
                draws.push(DrawCall {
                    pipeline,
                    bind_groups: vec![&obj.object.bind_group, &part.material],
                    mesh: &part.mesh,
                });
            }
        }

        for part in self.lamp.parts.iter() {
            draws.push(DrawCall {
                pipeline: &pipelines.lamp,
                bind_groups: vec![&self.lamp.object.bind_group],
                mesh: &part.mesh,
            });
        }

        if let Some(sky) = &self.skybox {
            draws.push(DrawCall {
                pipeline: &pipelines.skybox,
                bind_groups: vec![&sky.bind_group],
                mesh: &sky.mesh,
            });
        }
        draws
    }
}
