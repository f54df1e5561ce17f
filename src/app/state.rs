// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use glam::Vec3;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window};

use super::assets::{AssetCache, ModelPart};
use crate::camera::{Camera, CameraController};
use crate::gpu::buffers;
use crate::gpu::context::GpuContext;
use crate::gpu::pipeline::{self, DepthMode, RenderPipelineDesc};
use crate::gpu::texture::{GpuTexture, WgpuBackend};
use crate::render::lights::GpuLights;
use crate::render::mesh::{self, GpuMesh, MeshVertex, SkyVertex};
use crate::render::object::{self, GpuObject, ObjectBinding};
use crate::scene::pusher::CubePusher;
use crate::scene::scene::{Scene, TransformConfig};
use crate::shaders::composer::{LAMP_SHADER, MESH_SHADER, SKYBOX_SHADER, ShaderComposer};
use crate::texture;

pub struct Pipelines {
    pub mesh: wgpu::RenderPipeline,
    /// `None` when the adapter can't rasterise lines.
    pub wireframe: Option<wgpu::RenderPipeline>,
    pub lamp: wgpu::RenderPipeline,
    pub skybox: wgpu::RenderPipeline,
}

/// A model or cube placed in the scene.
pub struct SceneObject {
    pub parts: Rc<Vec<ModelPart>>,
    pub object: ObjectBinding,
    pub transform: TransformConfig,
    pub wireframe: bool,
    pub pushable: bool,
}

pub struct Skybox {
    pub mesh: GpuMesh,
    pub bind_group: wgpu::BindGroup,
    _texture: GpuTexture,
}

pub struct Lamp {
    pub parts: Rc<Vec<ModelPart>>,
    pub object: ObjectBinding,
    pub scale: f32,
}

pub struct AppState {
    pub window: Arc<Window>,
    pub gpu: GpuContext,
    pub pipelines: Pipelines,
    pub frame_bind_group: wgpu::BindGroup,
    pub camera_buffer: wgpu::Buffer,
    pub lights_buffer: wgpu::Buffer,
    pub objects: Vec<SceneObject>,
    pub lamp: Lamp,
    pub skybox: Option<Skybox>,
    pub camera: Camera,
    pub controller: CameraController,
    pub pusher: Option<CubePusher>,
    /// Draw wireframe-flagged models as lines (O turns it off, P back on).
    pub wireframe: bool,
    pub start_time: Instant,
    pub last_frame: Instant,
}

impl AppState {
    pub fn new(event_loop: &ActiveEventLoop, scene_path: &Option<String>) -> Result<Self> {
        let scene = match scene_path {
            Some(path) => crate::scene::loader::load_scene(Path::new(path))?,
            None => crate::scene::loader::default_scene(),
        };

        let mut attrs = Window::default_attributes()
            .with_title(scene.window.title.clone())
            .with_inner_size(PhysicalSize::new(scene.window.width, scene.window.height));
        if scene.window.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        let window = Arc::new(event_loop.create_window(attrs)?);
        let gpu = GpuContext::new(window.clone())?;

        let camera = camera_from_scene(&scene);
        let controller = CameraController::default();

        // Frame-wide bindings: camera (0) and lights (1).
        let camera_buffer = buffers::create_uniform_buffer(
            &gpu.device,
            &camera.to_gpu(gpu.width(), gpu.height()),
            "camera",
        );
        let lights_buffer =
            buffers::create_uniform_buffer(&gpu.device, &GpuLights::at_time(0.0), "lights");
        let frame_layout = gpu
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("frame layout"),
                entries: &[pipeline::uniform_entry(0), pipeline::uniform_entry(1)],
            });
        let frame_bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame"),
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lights_buffer.as_entire_binding(),
                },
            ],
        });

        let object_layout = object::object_layout(&gpu.device);
        let material_layout = object::material_layout(&gpu.device);
        let sky_layout = gpu
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("skybox layout"),
                entries: &[
                    pipeline::texture_entry(0, wgpu::TextureViewDimension::Cube),
                    pipeline::sampler_entry(1),
                ],
            });

        let composer = ShaderComposer::with_overrides(&ShaderComposer::shader_dir())?;
        let pipelines = create_pipelines(
            &gpu,
            &composer,
            &frame_layout,
            &object_layout,
            &material_layout,
            &sky_layout,
        )?;

        let mut assets = AssetCache::new(&gpu.device, &gpu.queue);
        let objects = build_objects(&gpu, &scene, &mut assets, &object_layout, &material_layout);
        let lamp = build_lamp(&gpu, &scene, &mut assets, &object_layout, &material_layout);
        let skybox = scene
            .skybox
            .as_ref()
            .and_then(|faces| build_skybox(&gpu, faces, &sky_layout));

        let pusher = objects
            .iter()
            .any(|o| o.pushable)
            .then(|| CubePusher::new(&scene.pusher));

        let now = Instant::now();
        let mut state = Self {
            window,
            gpu,
            pipelines,
            frame_bind_group,
            camera_buffer,
            lights_buffer,
            objects,
            lamp,
            skybox,
            camera,
            controller,
            pusher,
            wireframe: true,
            start_time: now,
            last_frame: now,
        };
        state.capture_mouse(true);
        Ok(state)
    }

    pub fn capture_mouse(&mut self, captured: bool) {
        if self.controller.set_mouse_captured(captured) {
            self.set_cursor_grabbed(captured);
        }
    }

    pub fn set_cursor_grabbed(&self, grabbed: bool) {
        use winit::window::CursorGrabMode;
        self.window.set_cursor_visible(!grabbed);
        if grabbed {
            // Locked = true pointer lock; not supported on X11, where Confined
            // at least keeps the cursor inside the window.
            if self.window.set_cursor_grab(CursorGrabMode::Locked).is_err() {
                let _ = self.window.set_cursor_grab(CursorGrabMode::Confined);
            }
        } else {
            let _ = self.window.set_cursor_grab(CursorGrabMode::None);
        }
    }

    pub fn handle_resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.gpu.resize(size.width, size.height);
    }
}

fn camera_from_scene(scene: &Scene) -> Camera {
    let config = &scene.camera;
    let mut camera = Camera::new(Vec3::from(config.position), Vec3::Y, config.yaw, config.pitch);
    camera.movement_speed = config.speed;
    camera.mouse_sensitivity = CameraController::sensitivity_override().unwrap_or(config.sensitivity);
    camera
}

fn create_pipelines(
    gpu: &GpuContext,
    composer: &ShaderComposer,
    frame_layout: &wgpu::BindGroupLayout,
    object_layout: &wgpu::BindGroupLayout,
    material_layout: &wgpu::BindGroupLayout,
    sky_layout: &wgpu::BindGroupLayout,
) -> Result<Pipelines> {
    let device = &gpu.device;
    let format = gpu.surface_format();
    let mesh_src = composer.compose(MESH_SHADER)?;
    let mesh_layouts = [frame_layout, object_layout, material_layout];
    let mesh_vertex = [MeshVertex::layout()];

    let mesh_desc = |polygon_mode: wgpu::PolygonMode| RenderPipelineDesc {
        label: match polygon_mode {
            wgpu::PolygonMode::Line => "mesh wireframe",
            _ => "mesh",
        },
        shader_source: &mesh_src,
        bind_group_layouts: &mesh_layouts,
        vertex_buffers: &mesh_vertex,
        target_format: format,
        depth: DepthMode::OPAQUE,
        polygon_mode,
    };

    let mesh = pipeline::create_render_pipeline(device, &mesh_desc(wgpu::PolygonMode::Fill))?;
    let wireframe = if gpu.supports_wireframe {
        Some(pipeline::create_render_pipeline(
            device,
            &mesh_desc(wgpu::PolygonMode::Line),
        )?)
    } else {
        None
    };

    let lamp_src = composer.compose(LAMP_SHADER)?;
    let lamp = pipeline::create_render_pipeline(
        device,
        &RenderPipelineDesc {
            label: "lamp",
            shader_source: &lamp_src,
            bind_group_layouts: &[frame_layout, object_layout],
            vertex_buffers: &mesh_vertex,
            target_format: format,
            depth: DepthMode::OPAQUE,
            polygon_mode: wgpu::PolygonMode::Fill,
        },
    )?;

    let sky_src = composer.compose(SKYBOX_SHADER)?;
    let skybox = pipeline::create_render_pipeline(
        device,
        &RenderPipelineDesc {
            label: "skybox",
            shader_source: &sky_src,
            bind_group_layouts: &[frame_layout, sky_layout],
            vertex_buffers: &[SkyVertex::layout()],
            target_format: format,
            depth: DepthMode::SKYBOX,
            polygon_mode: wgpu::PolygonMode::Fill,
        },
    )?;

    Ok(Pipelines {
        mesh,
        wireframe,
        lamp,
        skybox,
    })
}

fn build_objects(
    gpu: &GpuContext,
    scene: &Scene,
    assets: &mut AssetCache,
    object_layout: &wgpu::BindGroupLayout,
    material_layout: &wgpu::BindGroupLayout,
) -> Vec<SceneObject> {
    let (device, queue) = (&gpu.device, &gpu.queue);
    let mut objects = Vec::new();

    for model in &scene.models {
        let parts = match assets.model(
            device,
            queue,
            material_layout,
            Path::new(&model.path),
            model.diffuse.as_deref().map(Path::new),
        ) {
            Ok(parts) => parts,
            Err(e) => {
                log::warn!("Skipping model '{}': {e:#}", model.name);
                continue;
            }
        };
        if model.wireframe && !gpu.supports_wireframe {
            log::warn!("Model '{}' will be drawn filled: no line rasterisation", model.name);
        }
        let uniform = GpuObject::new(model.transform.matrix(0.0), [0.0; 3], model.shininess, true);
        objects.push(SceneObject {
            parts,
            object: ObjectBinding::new(device, object_layout, uniform, &model.name),
            transform: model.transform.clone(),
            wireframe: model.wireframe,
            pushable: false,
        });
    }

    let cube_vertices = mesh::cube_vertices();
    for cube in &scene.cubes {
        let diffuse = assets.texture(device, queue, Path::new(&cube.diffuse));
        let specular = match &cube.specular {
            Some(path) => assets.texture(device, queue, Path::new(path)),
            None => assets.no_specular(),
        };
        let part = ModelPart {
            mesh: GpuMesh::from_vertices(device, &cube_vertices, &cube.name),
            material: object::create_material(device, material_layout, &diffuse, &specular, &cube.name),
        };
        let uniform = GpuObject::new(
            cube.transform.matrix(0.0),
            cube.specular_color,
            cube.shininess,
            cube.specular.is_some(),
        );
        objects.push(SceneObject {
            parts: Rc::new(vec![part]),
            object: ObjectBinding::new(device, object_layout, uniform, &cube.name),
            transform: cube.transform.clone(),
            wireframe: false,
            pushable: cube.pushable,
        });
    }

    log::info!("Scene ready: {} objects", objects.len());
    objects
}

fn build_lamp(
    gpu: &GpuContext,
    scene: &Scene,
    assets: &mut AssetCache,
    object_layout: &wgpu::BindGroupLayout,
    material_layout: &wgpu::BindGroupLayout,
) -> Lamp {
    let (device, queue) = (&gpu.device, &gpu.queue);
    let sphere = scene.lamp.mesh.as_ref().and_then(|path| {
        assets
            .model(device, queue, material_layout, Path::new(path), None)
            .inspect_err(|e| log::warn!("Lamp mesh unavailable, using a cube: {e:#}"))
            .ok()
    });
    let parts = sphere.unwrap_or_else(|| {
        // The lamp shader ignores materials; any texture satisfies the layout.
        let flat = assets.no_specular();
        Rc::new(vec![ModelPart {
            mesh: GpuMesh::from_vertices(device, &mesh::cube_vertices(), "lamp"),
            material: object::create_material(device, material_layout, &flat, &flat, "lamp"),
        }])
    });
    let uniform = GpuObject::new(glam::Mat4::IDENTITY, [0.0; 3], 1.0, false);
    Lamp {
        parts,
        object: ObjectBinding::new(device, object_layout, uniform, "lamp"),
        scale: scene.lamp.scale,
    }
}

fn build_skybox(
    gpu: &GpuContext,
    faces: &[String; 6],
    layout: &wgpu::BindGroupLayout,
) -> Option<Skybox> {
    let mut backend = WgpuBackend::new(&gpu.device, &gpu.queue);
    let loaded = match texture::load_cubemap(&mut backend, faces).context("Skybox disabled") {
        Ok(loaded) => loaded,
        Err(e) => {
            log::warn!("{e:#}");
            return None;
        }
    };
    let handle = loaded.cubemap.handle;
    let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("skybox"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&handle.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&handle.sampler),
            },
        ],
    });
    Some(Skybox {
        mesh: GpuMesh::from_vertices(&gpu.device, &mesh::skybox_vertices(), "skybox"),
        bind_group,
        _texture: handle,
    })
}
