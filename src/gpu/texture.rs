// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::borrow::Cow;

use crate::texture::{ChannelFormat, FilterMode, SamplerSettings, TextureBackend, WrapMode};
use crate::texture::mipmap::MipLevel;

/// A texture resident on the GPU, ready to bind.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

/// Uploads through a wgpu device/queue pair.
///
/// wgpu has no 3-channel formats, so RGB data is widened to RGBA8 with opaque
/// alpha; single-channel data uses R8.
pub struct WgpuBackend<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
}

impl<'a> WgpuBackend<'a> {
    pub fn new(device: &'a wgpu::Device, queue: &'a wgpu::Queue) -> Self {
        Self { device, queue }
    }

    fn create_sampler(&self, label: &str, settings: &SamplerSettings) -> wgpu::Sampler {
        self.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: address_mode(settings.wrap_u),
            address_mode_v: address_mode(settings.wrap_v),
            address_mode_w: address_mode(settings.wrap_w),
            mag_filter: filter_mode(settings.mag_filter),
            min_filter: filter_mode(settings.min_filter),
            mipmap_filter: settings
                .mipmap_filter
                .map_or(wgpu::FilterMode::Nearest, filter_mode),
            ..Default::default()
        })
    }
}

impl TextureBackend for WgpuBackend<'_> {
    type Handle = GpuTexture;

    fn max_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    fn upload_texture(
        &mut self,
        label: &str,
        format: ChannelFormat,
        levels: &[MipLevel],
        sampler: &SamplerSettings,
    ) -> GpuTexture {
        let (width, height) = levels.first().map_or((1, 1), |l| (l.width, l.height));
        let (gpu_format, bytes_per_texel) = match format {
            ChannelFormat::Red => (wgpu::TextureFormat::R8Unorm, 1),
            ChannelFormat::Rgb | ChannelFormat::Rgba => (wgpu::TextureFormat::Rgba8Unorm, 4),
        };

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: levels.len().max(1) as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: gpu_format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (mip, level) in levels.iter().enumerate() {
            let data = match format {
                ChannelFormat::Rgb => Cow::Owned(rgb_to_rgba(&level.pixels)),
                _ => Cow::Borrowed(level.pixels.as_slice()),
            };
            self.queue.write_texture(
                wgpu::ImageCopyTexture {
                    texture: &texture,
                    mip_level: mip as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &data,
                wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(level.width * bytes_per_texel),
                    rows_per_image: Some(level.height),
                },
                wgpu::Extent3d {
                    width: level.width,
                    height: level.height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = self.create_sampler(label, sampler);
        GpuTexture {
            texture,
            view,
            sampler,
        }
    }

    fn upload_cubemap(
        &mut self,
        label: &str,
        edge: u32,
        faces: [Option<&[u8]>; 6],
        sampler: &SamplerSettings,
    ) -> GpuTexture {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: edge,
                height: edge,
                depth_or_array_layers: 6,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        // Layer order matches the face order: +X, -X, +Y, -Y, +Z, -Z.
        for (layer, face) in faces.iter().enumerate() {
            let Some(rgb) = face else {
                continue;
            };
            self.queue.write_texture(
                wgpu::ImageCopyTexture {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: layer as u32,
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                &rgb_to_rgba(rgb),
                wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(edge * 4),
                    rows_per_image: Some(edge),
                },
                wgpu::Extent3d {
                    width: edge,
                    height: edge,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some(label),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });
        let sampler = self.create_sampler(label, sampler);
        GpuTexture {
            texture,
            view,
            sampler,
        }
    }
}

fn address_mode(mode: WrapMode) -> wgpu::AddressMode {
    match mode {
        WrapMode::Repeat => wgpu::AddressMode::Repeat,
        WrapMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
    }
}

fn filter_mode(mode: FilterMode) -> wgpu::FilterMode {
    match mode {
        FilterMode::Nearest => wgpu::FilterMode::Nearest,
        FilterMode::Linear => wgpu::FilterMode::Linear,
    }
}

/// Widen packed RGB to RGBA with alpha = 255.
pub fn rgb_to_rgba(rgb: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
    for c in rgb.chunks_exact(3) {
        rgba.extend_from_slice(&[c[0], c[1], c[2], 255]);
    }
    rgba
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_rgba() {
        assert_eq!(
            rgb_to_rgba(&[1, 2, 3, 4, 5, 6]),
            vec![1, 2, 3, 255, 4, 5, 6, 255]
        );
        assert!(rgb_to_rgba(&[]).is_empty());
    }

    #[test]
    fn test_sampler_mapping() {
        assert_eq!(address_mode(WrapMode::Repeat), wgpu::AddressMode::Repeat);
        assert_eq!(
            address_mode(WrapMode::ClampToEdge),
            wgpu::AddressMode::ClampToEdge
        );
        assert_eq!(filter_mode(FilterMode::Linear), wgpu::FilterMode::Linear);
    }
}
