use std::path::PathBuf;

/// Error type for texture and cubemap loading.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("Failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Unsupported channel count {channels} in {}", path.display())]
    UnsupportedChannelCount { path: PathBuf, channels: u8 },

    #[error("Image {} has no pixels", path.display())]
    Empty { path: PathBuf },

    #[error("Image {} is {width}x{height}, larger than the {max} texel limit", path.display())]
    TooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max: u32,
    },

    #[error("Cubemap face {} is {width}x{height}, expected {expected}x{expected}", path.display())]
    FaceSize {
        path: PathBuf,
        expected: u32,
        width: u32,
        height: u32,
    },

    #[error("Cubemap face {} holds {actual} bytes, RGB upload needs {expected}", path.display())]
    ShortFaceData {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("None of the six cubemap faces could be loaded")]
    NoCubemapFaces,
}
