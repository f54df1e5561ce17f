//! In-memory texture backend for unit tests (no GPU required).
//!
//! Records every upload so tests can read back exactly what a real backend
//! would have received.

use super::backend::{SamplerSettings, TextureBackend};
use super::decode::ChannelFormat;
use super::mipmap::MipLevel;

#[derive(Debug)]
pub struct MemoryTexture {
    pub label: String,
    pub format: ChannelFormat,
    pub levels: Vec<MipLevel>,
    pub sampler: SamplerSettings,
}

#[derive(Debug)]
pub struct MemoryCubemap {
    pub label: String,
    pub edge: u32,
    pub faces: [Option<Vec<u8>>; 6],
    pub sampler: SamplerSettings,
}

#[derive(Debug)]
pub struct MemoryBackend {
    pub textures: Vec<MemoryTexture>,
    pub cubemaps: Vec<MemoryCubemap>,
    max_dimension: u32,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::with_max_dimension(8192)
    }
}

impl MemoryBackend {
    pub fn with_max_dimension(max_dimension: u32) -> Self {
        Self {
            textures: Vec::new(),
            cubemaps: Vec::new(),
            max_dimension,
        }
    }
}

impl TextureBackend for MemoryBackend {
    /// Index into `textures` or `cubemaps`.
    type Handle = usize;

    fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    fn upload_texture(
        &mut self,
        label: &str,
        format: ChannelFormat,
        levels: &[MipLevel],
        sampler: &SamplerSettings,
    ) -> usize {
        self.textures.push(MemoryTexture {
            label: label.to_string(),
            format,
            levels: levels.to_vec(),
            sampler: *sampler,
        });
        self.textures.len() - 1
    }

    fn upload_cubemap(
        &mut self,
        label: &str,
        edge: u32,
        faces: [Option<&[u8]>; 6],
        sampler: &SamplerSettings,
    ) -> usize {
        self.cubemaps.push(MemoryCubemap {
            label: label.to_string(),
            edge,
            faces: faces.map(|f| f.map(<[u8]>::to_vec)),
            sampler: *sampler,
        });
        self.cubemaps.len() - 1
    }
}
