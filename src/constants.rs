// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

// Window defaults
pub const DEFAULT_WINDOW_TITLE: &str = "GPS";
pub const DEFAULT_WINDOW_WIDTH: u32 = 1920;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 1080;

// Camera defaults
pub const DEFAULT_CAMERA_POSITION: [f32; 3] = [0.0, 0.0, 3.0];
pub const CAMERA_DEFAULT_YAW: f32 = -90.0;
pub const CAMERA_DEFAULT_PITCH: f32 = 0.0;
pub const CAMERA_DEFAULT_SPEED: f32 = 2.5;
pub const CAMERA_DEFAULT_SENSITIVITY: f32 = 0.1;
pub const CAMERA_DEFAULT_ZOOM: f32 = 45.0;
/// Inclusive pitch bound in degrees: pitch stays within [-89, 89].
pub const CAMERA_PITCH_CLAMP: f32 = 89.0;
pub const CAMERA_ZOOM_MIN: f32 = 1.0;
pub const CAMERA_ZOOM_MAX: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

// Camera controller
pub const CAMERA_TIME_SCALE: f32 = 2.0;
pub const MOUSE_SENS_ENV: &str = "SCENE_VIEWER_MOUSE_SENS";
// Pixels per scroll "line" when the platform reports pixel deltas.
pub const SCROLL_PIXELS_PER_LINE: f32 = 40.0;

// Rendering
pub const CLEAR_COLOR: [f64; 3] = [0.05, 0.05, 0.05];
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
pub const DEFAULT_SHININESS: f32 = 32.0;
pub const DEFAULT_SPECULAR_COLOR: [f32; 3] = [0.4, 0.5, 0.4];
pub const PLACEHOLDER_COLOR: [u8; 4] = [128, 128, 128, 255];
pub const NO_SPECULAR_COLOR: [u8; 4] = [0, 0, 0, 255];

// Lights
pub const POINT_LIGHT_ORBIT_RADIUS: f32 = 2.0;
pub const POINT_LIGHT_HEIGHT: f32 = 1.5;
pub const POINT_LIGHT_ATTENUATION: [f32; 3] = [1.0, 0.09, 0.032]; // constant, linear, quadratic
pub const DIRECTIONAL_LIGHT_DIRECTION: [f32; 3] = [-0.2, -1.0, -0.3];
pub const LAMP_SCALE: f32 = 0.5;

// Pushable cube
pub const PUSH_STEP: f32 = 0.05;
pub const PUSH_RESET: [f32; 2] = [-2.0, 0.0];

// Default asset locations
pub const SKYBOX_DIR: &str = "textures/skybox";
pub const OBJECTS_DIR: &str = "objects";
pub const TEXTURES_DIR: &str = "textures";

/// Resolve a data-file path: check next to the executable first, then macOS bundle, then CWD.
pub fn resolve_data_path(relative: &str) -> PathBuf {
    if let Ok(exe) = std::env::current_exe()
        && let Some(dir) = exe.parent()
    {
        let candidates = [
            // Portable archives, Windows installer, AppImage
            dir.join(relative),
            // macOS .app bundle: Contents/MacOS/../Resources/<relative>
            dir.join("../Resources").join(relative),
        ];
        for path in &candidates {
            if path.exists() {
                return path.clone();
            }
        }
    }
    PathBuf::from(relative)
}

/// Resolve a relative resource path using multiple strategies:
/// 1. Return as-is if the path already exists
/// 2. Try relative to the scene file's directory
/// 3. Try via `resolve_data_path()` (next to executable / macOS bundle)
/// 4. Fall back to the original path unchanged
pub fn resolve_resource_path(scene_dir: &Path, relative: &str) -> String {
    if Path::new(relative).exists() {
        return relative.to_string();
    }
    let scene_relative = scene_dir.join(relative);
    if scene_relative.exists() {
        return scene_relative.to_string_lossy().into_owned();
    }
    let data = resolve_data_path(relative);
    if data.exists() {
        return data.to_string_lossy().into_owned();
    }
    // Let the loader report the missing file.
    relative.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_resource_left_unchanged() {
        let dir = std::env::temp_dir();
        assert_eq!(
            resolve_resource_path(&dir, "definitely/not/here.png"),
            "definitely/not/here.png"
        );
    }

    #[test]
    fn test_resource_resolved_against_scene_dir() {
        let dir = std::env::temp_dir().join(format!("scene_viewer_resolve_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("face.png"), b"x").unwrap();

        let resolved = resolve_resource_path(&dir, "face.png");
        assert_eq!(Path::new(&resolved), dir.join("face.png"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
