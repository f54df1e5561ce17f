// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Result;

use crate::constants::{NO_SPECULAR_COLOR, PLACEHOLDER_COLOR};
use crate::gpu::texture::{GpuTexture, WgpuBackend};
use crate::model::obj_loader;
use crate::render::mesh::GpuMesh;
use crate::render::object;
use crate::texture;

/// One drawable piece of a model: geometry plus its material bind group.
pub struct ModelPart {
    pub mesh: GpuMesh,
    pub material: wgpu::BindGroup,
}

/// Textures and models shared between scene entries, keyed by path.
///
/// A texture that fails to load is replaced by a flat placeholder; the failure
/// is logged once by the loader and the path is remembered so it isn't retried.
pub struct AssetCache {
    textures: HashMap<PathBuf, Rc<GpuTexture>>,
    models: HashMap<(PathBuf, Option<PathBuf>), Rc<Vec<ModelPart>>>,
    placeholder: Rc<GpuTexture>,
    black: Rc<GpuTexture>,
}

impl AssetCache {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let mut backend = WgpuBackend::new(device, queue);
        let placeholder = texture::placeholder(&mut backend, "placeholder", PLACEHOLDER_COLOR);
        let black = texture::placeholder(&mut backend, "no specular", NO_SPECULAR_COLOR);
        Self {
            textures: HashMap::new(),
            models: HashMap::new(),
            placeholder: Rc::new(placeholder.handle),
            black: Rc::new(black.handle),
        }
    }

    /// Stand-in specular map for materials that use a constant colour.
    pub fn no_specular(&self) -> Rc<GpuTexture> {
        self.black.clone()
    }

    pub fn texture(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) -> Rc<GpuTexture> {
        if let Some(tex) = self.textures.get(path) {
            return tex.clone();
        }
        let mut backend = WgpuBackend::new(device, queue);
        let tex = match texture::load_texture(&mut backend, path) {
            Ok(desc) => Rc::new(desc.handle),
            Err(_) => self.placeholder.clone(),
        };
        self.textures.insert(path.to_path_buf(), tex.clone());
        tex
    }

    /// Load an OBJ once per (path, diffuse override) pair.
    pub fn model(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        material_layout: &wgpu::BindGroupLayout,
        path: &Path,
        diffuse_override: Option<&Path>,
    ) -> Result<Rc<Vec<ModelPart>>> {
        let key = (path.to_path_buf(), diffuse_override.map(Path::to_path_buf));
        if let Some(parts) = self.models.get(&key) {
            return Ok(parts.clone());
        }

        let meshes = obj_loader::load_obj(path)?;
        let mut parts = Vec::with_capacity(meshes.len());
        for mesh in meshes {
            let diffuse = match diffuse_override.or(mesh.diffuse.as_deref()) {
                Some(p) => self.texture(device, queue, p),
                None => self.placeholder.clone(),
            };
            let specular = match mesh.specular.as_deref() {
                Some(p) => self.texture(device, queue, p),
                None => self.black.clone(),
            };
            let label = format!("{} / {}", path.display(), mesh.name);
            parts.push(ModelPart {
                mesh: GpuMesh::indexed(device, &mesh.vertices, &mesh.indices, &label),
                material: object::create_material(
                    device,
                    material_layout,
                    &diffuse,
                    &specular,
                    &label,
                ),
            });
        }

        let parts = Rc::new(parts);
        self.models.insert(key, parts.clone());
        Ok(parts)
    }
}
