use anyhow::Result;
use std::sync::Arc;
use winit::window::Window;

use super::buffers;

pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub adapter: wgpu::Adapter,
    pub depth_texture: wgpu::Texture,
    pub depth_view: wgpu::TextureView,
    /// Whether line polygon mode is available for wireframe draws.
    pub supports_wireframe: bool,
}

impl GpuContext {
    pub fn new(window: Arc<Window>) -> Result<Self> {
        // Plain raster work: any backend will do, GL included.
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| anyhow::anyhow!("No suitable GPU adapter found."))?;

        let info = adapter.get_info();
        log::info!("Using GPU: {} (backend: {:?})", info.name, info.backend);

        let supports_wireframe = adapter
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE);
        if !supports_wireframe {
            log::warn!("Adapter lacks POLYGON_MODE_LINE; wireframe models will be drawn filled");
        }
        let required_features = if supports_wireframe {
            wgpu::Features::POLYGON_MODE_LINE
        } else {
            wgpu::Features::empty()
        };

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Scene Viewer Device"),
                required_features,
                required_limits: adapter.limits(),
                ..Default::default()
            },
            None,
        ))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        // Textures are uploaded as linear Unorm, so present through a non-sRGB
        // surface to keep the colours the images were authored with.
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let (depth_texture, depth_view) = buffers::create_depth_texture(
            &device,
            surface_config.width,
            surface_config.height,
            "depth",
        );

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            adapter,
            depth_texture,
            depth_view,
            supports_wireframe,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.surface_config.width = width;
            self.surface_config.height = height;
            self.surface.configure(&self.device, &self.surface_config);
            let (texture, view) = buffers::create_depth_texture(&self.device, width, height, "depth");
            self.depth_texture = texture;
            self.depth_view = view;
        }
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    pub fn width(&self) -> u32 {
        self.surface_config.width
    }

    pub fn height(&self) -> u32 {
        self.surface_config.height
    }
}
