use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glam::Vec3;

use crate::render::mesh::MeshVertex;

/// One OBJ object/group with its material's texture maps.
#[derive(Debug, Clone)]
pub struct ObjMesh {
    pub name: String,
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub diffuse: Option<PathBuf>,
    pub specular: Option<PathBuf>,
}

pub fn load_obj(path: &Path) -> Result<Vec<ObjMesh>> {
    let (models, materials) = tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS)
        .with_context(|| format!("Failed to load OBJ: {}", path.display()))?;

    // A missing .mtl only costs the texture maps.
    let materials = materials.unwrap_or_else(|e| {
        log::warn!("No materials for {}: {e}", path.display());
        Vec::new()
    });
    let base_dir = path.parent().unwrap_or(Path::new("."));

    let mut meshes = Vec::with_capacity(models.len());
    for model in models {
        let mesh = model.mesh;
        if mesh.indices.is_empty() {
            continue;
        }
        let material = mesh.material_id.and_then(|id| materials.get(id));
        let texture = |name: Option<&String>| {
            name.filter(|n| !n.is_empty())
                .map(|n| base_dir.join(n.replace('\\', "/")))
        };

        meshes.push(ObjMesh {
            name: model.name,
            vertices: build_vertices(&mesh.positions, &mesh.normals, &mesh.texcoords, &mesh.indices),
            diffuse: material.and_then(|m| texture(m.diffuse_texture.as_ref())),
            specular: material.and_then(|m| texture(m.specular_texture.as_ref())),
            indices: mesh.indices,
        });
    }

    let triangles: usize = meshes.iter().map(|m| m.indices.len() / 3).sum();
    log::info!(
        "Loaded OBJ '{}': {} meshes, {} triangles",
        path.display(),
        meshes.len(),
        triangles
    );
    Ok(meshes)
}

/// Interleave single-index OBJ attributes.
///
/// Texture v is flipped (OBJ puts v = 0 at the bottom of the image). Meshes
/// without normals get smooth normals averaged from their faces.
pub fn build_vertices(
    positions: &[f32],
    normals: &[f32],
    texcoords: &[f32],
    indices: &[u32],
) -> Vec<MeshVertex> {
    let count = positions.len() / 3;
    let computed;
    let normals = if normals.len() == positions.len() {
        normals
    } else {
        computed = smooth_normals(positions, indices);
        computed.as_slice()
    };

    (0..count)
        .map(|i| MeshVertex {
            position: [positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]],
            normal: [normals[i * 3], normals[i * 3 + 1], normals[i * 3 + 2]],
            uv: if texcoords.len() >= (i + 1) * 2 {
                [texcoords[i * 2], 1.0 - texcoords[i * 2 + 1]]
            } else {
                [0.0, 0.0]
            },
        })
        .collect()
}

fn smooth_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let read = |i: u32| {
        let i = i as usize * 3;
        Vec3::new(positions[i], positions[i + 1], positions[i + 2])
    };
    let mut acc = vec![Vec3::ZERO; positions.len() / 3];
    for tri in indices.chunks_exact(3) {
        // Area-weighted: the cross product is not normalised.
        let n = (read(tri[1]) - read(tri[0])).cross(read(tri[2]) - read(tri[0]));
        for &i in tri {
            acc[i as usize] += n;
        }
    }
    acc.into_iter()
        .flat_map(|n| n.normalize_or_zero().to_array())
        .collect()
}
