use super::decode::ChannelFormat;
use super::mipmap::MipLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
    ClampToEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
    Linear,
}

/// Backend-neutral sampler state recorded alongside each texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerSettings {
    pub wrap_u: WrapMode,
    pub wrap_v: WrapMode,
    pub wrap_w: WrapMode,
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
    /// `None` when the texture has a single level.
    pub mipmap_filter: Option<FilterMode>,
}

impl SamplerSettings {
    /// Repeat on both axes, trilinear minification, linear magnification.
    pub const TEXTURE_2D: Self = Self {
        wrap_u: WrapMode::Repeat,
        wrap_v: WrapMode::Repeat,
        wrap_w: WrapMode::Repeat,
        min_filter: FilterMode::Linear,
        mag_filter: FilterMode::Linear,
        mipmap_filter: Some(FilterMode::Linear),
    };

    /// Clamp-to-edge on all three axes, linear, no mips.
    pub const CUBEMAP: Self = Self {
        wrap_u: WrapMode::ClampToEdge,
        wrap_v: WrapMode::ClampToEdge,
        wrap_w: WrapMode::ClampToEdge,
        min_filter: FilterMode::Linear,
        mag_filter: FilterMode::Linear,
        mipmap_filter: None,
    };
}

/// Something that can turn decoded pixels into a GPU-resident texture.
///
/// The loaders in this module do all decoding and validation; a backend only
/// allocates and uploads.
pub trait TextureBackend {
    type Handle;

    /// Largest width or height accepted for a 2D texture or cubemap face.
    fn max_dimension(&self) -> u32;

    /// Upload a 2D texture. `levels[0]` is the full-size image.
    fn upload_texture(
        &mut self,
        label: &str,
        format: ChannelFormat,
        levels: &[MipLevel],
        sampler: &SamplerSettings,
    ) -> Self::Handle;

    /// Upload a cubemap with `edge`-sized square faces of packed RGB bytes,
    /// in +X, -X, +Y, -Y, +Z, -Z order. `None` faces are left as allocated.
    fn upload_cubemap(
        &mut self,
        label: &str,
        edge: u32,
        faces: [Option<&[u8]>; 6],
        sampler: &SamplerSettings,
    ) -> Self::Handle;
}
