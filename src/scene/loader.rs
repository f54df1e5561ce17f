// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::scene::Scene;
use crate::constants::resolve_resource_path;

pub fn load_scene(path: &Path) -> Result<Scene> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene file: {}", path.display()))?;

    let mut scene: Scene = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON scene file: {}", path.display()))?,
        _ => serde_yml::from_str(&contents)
            .with_context(|| format!("Failed to parse YAML scene file: {}", path.display()))?,
    };

    // Resolve relative texture / model paths so scenes work from any CWD.
    let scene_dir = path.parent().unwrap_or(Path::new("."));
    resolve_paths(&mut scene, scene_dir);

    log::info!(
        "Loaded scene {}: {} models, {} cubes",
        path.display(),
        scene.models.len(),
        scene.cubes.len()
    );

    Ok(scene)
}

/// The built-in scene with asset paths resolved like a scene file in the CWD.
pub fn default_scene() -> Scene {
    let mut scene = Scene::default();
    resolve_paths(&mut scene, Path::new("."));
    scene
}

pub fn resolve_paths(scene: &mut Scene, scene_dir: &Path) {
    for path in scene.asset_paths_mut() {
        *path = resolve_resource_path(scene_dir, path.as_str());
    }
}
