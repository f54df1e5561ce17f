//! Small PNG fixtures written to a per-test temporary directory.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use image::{GrayAlphaImage, GrayImage, LumaA, RgbImage, RgbaImage};

static NEXT_DIR: AtomicU32 = AtomicU32::new(0);

/// Removed (with its contents) on drop.
pub struct TempDir(PathBuf);

impl TempDir {
    pub fn new(name: &str) -> Self {
        let n = NEXT_DIR.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "scene_viewer_{name}_{}_{n}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

pub fn write_rgb(dir: &TempDir, name: &str, width: u32, height: u32, rgb: [u8; 3]) -> PathBuf {
    let path = dir.path().join(name);
    RgbImage::from_pixel(width, height, image::Rgb(rgb))
        .save(&path)
        .unwrap();
    path
}

pub fn write_rgba(dir: &TempDir, name: &str, width: u32, height: u32, rgba: [u8; 4]) -> PathBuf {
    let path = dir.path().join(name);
    RgbaImage::from_pixel(width, height, image::Rgba(rgba))
        .save(&path)
        .unwrap();
    path
}

pub fn write_gray(dir: &TempDir, name: &str, width: u32, height: u32, value: u8) -> PathBuf {
    let path = dir.path().join(name);
    GrayImage::from_pixel(width, height, image::Luma([value]))
        .save(&path)
        .unwrap();
    path
}

pub fn write_gray_alpha(dir: &TempDir, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.path().join(name);
    GrayAlphaImage::from_pixel(width, height, LumaA([90, 200]))
        .save(&path)
        .unwrap();
    path
}
