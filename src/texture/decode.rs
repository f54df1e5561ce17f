use std::path::{Path, PathBuf};

use super::error::TextureError;

/// Pixel layout of an uploaded texture, inferred from the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelFormat {
    Red,
    Rgb,
    Rgba,
}

impl ChannelFormat {
    /// 1 -> Red, 3 -> Rgb, 4 -> Rgba. Anything else (notably grey+alpha) is rejected.
    pub fn from_channels(path: &Path, channels: u8) -> Result<Self, TextureError> {
        match channels {
            1 => Ok(Self::Red),
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            _ => Err(TextureError::UnsupportedChannelCount {
                path: path.to_path_buf(),
                channels,
            }),
        }
    }

    pub fn channels(self) -> u8 {
        match self {
            Self::Red => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// An image decoded to tightly packed 8-bit samples in its native channel count.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn format(&self) -> Result<ChannelFormat, TextureError> {
        ChannelFormat::from_channels(&self.path, self.channels)
    }
}

/// Decode an image file, keeping its channel count and narrowing samples to 8 bits.
pub fn decode(path: &Path) -> Result<DecodedImage, TextureError> {
    let img = image::open(path).map_err(|source| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(TextureError::Empty {
            path: path.to_path_buf(),
        });
    }

    let channels = img.color().channel_count();
    let pixels = match channels {
        1 => img.into_luma8().into_raw(),
        2 => img.into_luma_alpha8().into_raw(),
        3 => img.into_rgb8().into_raw(),
        _ => img.into_rgba8().into_raw(),
    };

    Ok(DecodedImage {
        path: path.to_path_buf(),
        width,
        height,
        channels,
        pixels,
    })
}
