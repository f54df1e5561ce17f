// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use super::backend::{SamplerSettings, TextureBackend};
use super::decode::{self, ChannelFormat, DecodedImage};
use super::error::TextureError;
use super::mipmap::{self, MipLevel};

/// Cubemap faces in upload order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// A loaded 2D texture and the state it was uploaded with.
#[derive(Debug)]
pub struct TextureDescriptor<H> {
    pub handle: H,
    pub width: u32,
    pub height: u32,
    pub format: ChannelFormat,
    pub mip_levels: u32,
    pub sampler: SamplerSettings,
}

/// A loaded cubemap. Faces are always uploaded as packed RGB.
#[derive(Debug)]
pub struct CubemapDescriptor<H> {
    pub handle: H,
    pub edge: u32,
    /// Indexed by [`CubeFace::index`].
    pub faces_loaded: [bool; 6],
    pub sampler: SamplerSettings,
}

impl<H> CubemapDescriptor<H> {
    pub fn format(&self) -> ChannelFormat {
        ChannelFormat::Rgb
    }
}

#[derive(Debug)]
pub struct FaceFailure {
    pub face: CubeFace,
    pub error: TextureError,
}

/// A cubemap plus the faces that could not be loaded.
#[derive(Debug)]
pub struct LoadedCubemap<H> {
    pub cubemap: CubemapDescriptor<H>,
    pub failures: Vec<FaceFailure>,
}

/// Decode `path`, build its mip chain and upload it with repeat wrapping and
/// trilinear filtering.
pub fn load_texture<B: TextureBackend>(
    backend: &mut B,
    path: impl AsRef<Path>,
) -> Result<TextureDescriptor<B::Handle>, TextureError> {
    let path = path.as_ref();
    let result = decode::decode(path).and_then(|image| {
        let format = image.format()?;
        check_size(&image, backend.max_dimension())?;
        Ok((image, format))
    });
    let (image, format) = result.inspect_err(|e| log::warn!("Texture failed to load: {e}"))?;

    let (width, height) = (image.width, image.height);
    let levels = mipmap::generate(format, width, height, image.pixels);
    let sampler = SamplerSettings::TEXTURE_2D;
    let label = path.to_string_lossy();
    let handle = backend.upload_texture(&label, format, &levels, &sampler);

    log::info!(
        "Loaded texture '{}' ({width}x{height}, {format:?}, {} mips)",
        path.display(),
        levels.len()
    );

    Ok(TextureDescriptor {
        handle,
        width,
        height,
        format,
        mip_levels: levels.len() as u32,
        sampler,
    })
}

/// Load six faces in +X, -X, +Y, -Y, +Z, -Z order. The order is not checked:
/// a swapped path silently lands on the wrong face.
///
/// Each face is uploaded as RGB whatever its decoded channel count, by reading
/// the first `edge * edge * 3` decoded bytes as RGB triples. Faces that fail
/// are logged and skipped; only an all-failed cubemap is an error.
pub fn load_cubemap<B: TextureBackend, P: AsRef<Path>>(
    backend: &mut B,
    faces: &[P; 6],
) -> Result<LoadedCubemap<B::Handle>, TextureError> {
    let max = backend.max_dimension();
    let mut edge = None;
    let mut data: [Option<Vec<u8>>; 6] = Default::default();
    let mut failures = Vec::new();

    for (face, path) in CubeFace::ALL.into_iter().zip(faces) {
        let path = path.as_ref();
        match decode::decode(path).and_then(|image| face_bytes(image, &mut edge, max)) {
            Ok(bytes) => data[face.index()] = Some(bytes),
            Err(error) => {
                log::warn!("Cubemap face {face:?} failed to load: {error}");
                failures.push(FaceFailure { face, error });
            }
        }
    }

    let Some(edge) = edge else {
        return Err(TextureError::NoCubemapFaces);
    };

    let faces_loaded = std::array::from_fn(|i| data[i].is_some());
    let uploads = std::array::from_fn(|i| data[i].as_deref());
    let sampler = SamplerSettings::CUBEMAP;
    let label = faces[0].as_ref().to_string_lossy();
    let handle = backend.upload_cubemap(&label, edge, uploads, &sampler);

    log::info!(
        "Loaded cubemap '{label}' ({edge}x{edge}, {}/6 faces)",
        6 - failures.len()
    );

    Ok(LoadedCubemap {
        cubemap: CubemapDescriptor {
            handle,
            edge,
            faces_loaded,
            sampler,
        },
        failures,
    })
}

/// A 1x1 texture so rendering can continue when a load fails.
pub fn placeholder<B: TextureBackend>(
    backend: &mut B,
    label: &str,
    rgba: [u8; 4],
) -> TextureDescriptor<B::Handle> {
    let levels = [MipLevel {
        width: 1,
        height: 1,
        pixels: rgba.to_vec(),
    }];
    let sampler = SamplerSettings::TEXTURE_2D;
    let handle = backend.upload_texture(label, ChannelFormat::Rgba, &levels, &sampler);
    TextureDescriptor {
        handle,
        width: 1,
        height: 1,
        format: ChannelFormat::Rgba,
        mip_levels: 1,
        sampler,
    }
}

fn check_size(image: &DecodedImage, max: u32) -> Result<(), TextureError> {
    if image.width > max || image.height > max {
        return Err(TextureError::TooLarge {
            path: image.path.clone(),
            width: image.width,
            height: image.height,
            max,
        });
    }
    Ok(())
}

/// Validate a decoded face against the cubemap edge (set by the first good
/// face) and reinterpret its bytes as packed RGB.
fn face_bytes(image: DecodedImage, edge: &mut Option<u32>, max: u32) -> Result<Vec<u8>, TextureError> {
    check_size(&image, max)?;
    let expected = edge.unwrap_or(image.width);
    if image.width != expected || image.height != expected {
        return Err(TextureError::FaceSize {
            path: image.path,
            expected,
            width: image.width,
            height: image.height,
        });
    }

    let needed = (expected as usize) * (expected as usize) * 3;
    if image.pixels.len() < needed {
        return Err(TextureError::ShortFaceData {
            path: image.path,
            expected: needed,
            actual: image.pixels.len(),
        });
    }

    *edge = Some(expected);
    let mut bytes = image.pixels;
    bytes.truncate(needed);
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::texture::backend::{FilterMode, WrapMode};
    use crate::texture::memory::MemoryBackend;
    use crate::texture::test_images::{TempDir, write_gray, write_gray_alpha, write_rgb, write_rgba};

    const MARKERS: [[u8; 3]; 6] = [
        [255, 0, 0],
        [0, 255, 0],
        [0, 0, 255],
        [255, 255, 0],
        [0, 255, 255],
        [255, 0, 255],
    ];

    fn marker_faces(dir: &TempDir, edge: u32) -> [PathBuf; 6] {
        std::array::from_fn(|i| write_rgb(dir, &format!("face{i}.png"), edge, edge, MARKERS[i]))
    }

    #[test]
    fn test_load_rgb_texture() {
        let dir = TempDir::new("load_rgb");
        let path = write_rgb(&dir, "tile.png", 2, 2, [10, 20, 30]);
        let mut backend = MemoryBackend::default();

        let tex = load_texture(&mut backend, &path).unwrap();
        assert_eq!((tex.width, tex.height), (2, 2));
        assert_eq!(tex.format, ChannelFormat::Rgb);
        assert_eq!(tex.mip_levels, 2);

        let stored = &backend.textures[tex.handle];
        assert!(stored.label.ends_with("tile.png"));
        assert_eq!(stored.format, ChannelFormat::Rgb);
        assert_eq!(stored.levels[0].pixels, [10, 20, 30].repeat(4));
        assert_eq!(stored.levels[1].pixels, vec![10, 20, 30]);
    }

    #[test]
    fn test_texture_sampler_state() {
        let dir = TempDir::new("load_sampler");
        let path = write_rgba(&dir, "tile.png", 4, 4, [1, 2, 3, 4]);
        let mut backend = MemoryBackend::default();

        let tex = load_texture(&mut backend, &path).unwrap();
        assert_eq!(tex.format, ChannelFormat::Rgba);
        assert_eq!(tex.sampler.wrap_u, WrapMode::Repeat);
        assert_eq!(tex.sampler.wrap_v, WrapMode::Repeat);
        assert_eq!(tex.sampler.min_filter, FilterMode::Linear);
        assert_eq!(tex.sampler.mipmap_filter, Some(FilterMode::Linear));
        assert_eq!(tex.sampler.mag_filter, FilterMode::Linear);
    }

    #[test]
    fn test_single_channel_texture() {
        let dir = TempDir::new("load_red");
        let path = write_gray(&dir, "mask.png", 2, 2, 77);
        let mut backend = MemoryBackend::default();
        let tex = load_texture(&mut backend, &path).unwrap();
        assert_eq!(tex.format, ChannelFormat::Red);
        assert_eq!(backend.textures[tex.handle].levels[0].pixels, vec![77; 4]);
    }

    #[test]
    fn test_missing_texture_is_error_not_upload() {
        let mut backend = MemoryBackend::default();
        let err = load_texture(&mut backend, "missing/texture.png").unwrap_err();
        assert!(matches!(err, TextureError::Decode { .. }));
        assert!(backend.textures.is_empty());

        // The caller can keep going with a placeholder.
        let fallback = placeholder(&mut backend, "fallback", [128, 128, 128, 255]);
        assert_eq!((fallback.width, fallback.height), (1, 1));
        assert_eq!(backend.textures[fallback.handle].levels[0].pixels, vec![128, 128, 128, 255]);
    }

    #[test]
    fn test_two_channel_texture_rejected() {
        let dir = TempDir::new("load_la");
        let path = write_gray_alpha(&dir, "la.png", 2, 2);
        let mut backend = MemoryBackend::default();
        let err = load_texture(&mut backend, &path).unwrap_err();
        assert!(matches!(err, TextureError::UnsupportedChannelCount { channels: 2, .. }));
        assert!(backend.textures.is_empty());
    }

    #[test]
    fn test_oversized_texture_rejected() {
        let dir = TempDir::new("load_large");
        let path = write_rgb(&dir, "wide.png", 8, 2, [0, 0, 0]);
        let mut backend = MemoryBackend::with_max_dimension(4);
        let err = load_texture(&mut backend, &path).unwrap_err();
        assert!(matches!(err, TextureError::TooLarge { width: 8, max: 4, .. }));
    }

    #[test]
    fn test_cubemap_face_order() {
        let dir = TempDir::new("cube_order");
        let faces = marker_faces(&dir, 2);
        let mut backend = MemoryBackend::default();

        let loaded = load_cubemap(&mut backend, &faces).unwrap();
        assert!(loaded.failures.is_empty());
        assert_eq!(loaded.cubemap.edge, 2);
        assert_eq!(loaded.cubemap.faces_loaded, [true; 6]);
        assert_eq!(loaded.cubemap.format(), ChannelFormat::Rgb);

        let stored = &backend.cubemaps[loaded.cubemap.handle];
        assert!(stored.label.ends_with("face0.png"));
        assert_eq!(stored.edge, 2);
        for face in CubeFace::ALL {
            let bytes = stored.faces[face.index()].as_ref().unwrap();
            assert_eq!(&bytes[..3], &MARKERS[face.index()], "wrong content on {face:?}");
        }
    }

    #[test]
    fn test_cubemap_sampler_state() {
        let dir = TempDir::new("cube_sampler");
        let faces = marker_faces(&dir, 1);
        let mut backend = MemoryBackend::default();
        let loaded = load_cubemap(&mut backend, &faces).unwrap();
        assert_eq!(loaded.cubemap.sampler, SamplerSettings::CUBEMAP);
        assert_eq!(loaded.cubemap.sampler.wrap_w, WrapMode::ClampToEdge);
    }

    #[test]
    fn test_cubemap_missing_face_loads_others() {
        let dir = TempDir::new("cube_missing");
        let mut faces = marker_faces(&dir, 2);
        faces[CubeFace::PositiveY.index()] = dir.path().join("gone.png");
        let mut backend = MemoryBackend::default();

        let loaded = load_cubemap(&mut backend, &faces).unwrap();
        assert_eq!(loaded.failures.len(), 1);
        assert_eq!(loaded.failures[0].face, CubeFace::PositiveY);
        assert!(matches!(loaded.failures[0].error, TextureError::Decode { .. }));

        let stored = &backend.cubemaps[loaded.cubemap.handle];
        for face in CubeFace::ALL {
            let present = stored.faces[face.index()].is_some();
            assert_eq!(present, face != CubeFace::PositiveY);
            assert_eq!(loaded.cubemap.faces_loaded[face.index()], present);
        }
    }

    #[test]
    fn test_cubemap_first_face_missing_uses_next_for_edge() {
        let dir = TempDir::new("cube_first_missing");
        let mut faces = marker_faces(&dir, 2);
        faces[0] = dir.path().join("gone.png");
        let mut backend = MemoryBackend::default();
        let loaded = load_cubemap(&mut backend, &faces).unwrap();
        assert_eq!(loaded.cubemap.edge, 2);
        assert_eq!(loaded.failures.len(), 1);
    }

    #[test]
    fn test_cubemap_mismatched_face_rejected() {
        let dir = TempDir::new("cube_mismatch");
        let mut faces = marker_faces(&dir, 2);
        faces[4] = write_rgb(&dir, "big.png", 4, 4, [1, 1, 1]);
        let mut backend = MemoryBackend::default();

        let loaded = load_cubemap(&mut backend, &faces).unwrap();
        assert_eq!(loaded.failures.len(), 1);
        assert_eq!(loaded.failures[0].face, CubeFace::PositiveZ);
        assert!(matches!(
            loaded.failures[0].error,
            TextureError::FaceSize { expected: 2, width: 4, .. }
        ));
    }

    #[test]
    fn test_cubemap_non_square_face_rejected() {
        let dir = TempDir::new("cube_nonsquare");
        let mut faces = marker_faces(&dir, 2);
        faces[0] = write_rgb(&dir, "wide.png", 4, 2, [1, 1, 1]);
        let mut backend = MemoryBackend::default();

        let loaded = load_cubemap(&mut backend, &faces).unwrap();
        assert_eq!(loaded.cubemap.edge, 2);
        assert_eq!(loaded.failures[0].face, CubeFace::PositiveX);
    }

    #[test]
    fn test_cubemap_rgba_face_reinterpreted_as_rgb() {
        let dir = TempDir::new("cube_rgba");
        let mut faces = marker_faces(&dir, 2);
        faces[1] = write_rgba(&dir, "alpha.png", 2, 2, [10, 20, 30, 40]);
        let mut backend = MemoryBackend::default();

        let loaded = load_cubemap(&mut backend, &faces).unwrap();
        assert!(loaded.failures.is_empty());
        let bytes = backend.cubemaps[loaded.cubemap.handle].faces[1].clone().unwrap();
        // First 12 bytes of RGBA data read as four RGB texels.
        assert_eq!(bytes, vec![10, 20, 30, 40, 10, 20, 30, 40, 10, 20, 30, 40]);
    }

    #[test]
    fn test_cubemap_gray_face_too_short() {
        let dir = TempDir::new("cube_gray");
        let mut faces = marker_faces(&dir, 2);
        faces[3] = write_gray(&dir, "gray.png", 2, 2, 5);
        let mut backend = MemoryBackend::default();

        let loaded = load_cubemap(&mut backend, &faces).unwrap();
        assert!(matches!(
            loaded.failures[0].error,
            TextureError::ShortFaceData { expected: 12, actual: 4, .. }
        ));
    }

    #[test]
    fn test_cubemap_all_faces_missing() {
        let faces: [&str; 6] = ["a.png", "b.png", "c.png", "d.png", "e.png", "f.png"];
        let mut backend = MemoryBackend::default();
        let err = load_cubemap(&mut backend, &faces).unwrap_err();
        assert!(matches!(err, TextureError::NoCubemapFaces));
        assert!(backend.cubemaps.is_empty());
    }
}
