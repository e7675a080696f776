use anyhow::{bail, Context, Result};
use glam::{Mat3, Mat4, Vec3};
use std::path::Path;

use crate::math::AABB;
use crate::types::Vertex;

/// Triangle mesh flattened into world space of the glTF scene
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub bounds: AABB,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Loads a .gltf or .glb file into a single indexed triangle mesh
pub fn load_mesh(path: impl AsRef<Path>) -> Result<MeshData> {
    let path = path.as_ref();
    log::debug!("Loading glTF file: {}", path.display());

    let (document, buffers, _images) = gltf::import(path)
        .with_context(|| format!("Failed to load glTF file: {}", path.display()))?;

    extract_mesh(&document, &buffers)
        .with_context(|| format!("No usable geometry in {}", path.display()))
}

/// Same as [`load_mesh`] for an in-memory document with embedded buffers
pub fn load_mesh_from_slice(bytes: &[u8]) -> Result<MeshData> {
    let (document, buffers, _images) =
        gltf::import_slice(bytes).context("Failed to parse glTF document")?;
    extract_mesh(&document, &buffers)
}

fn extract_mesh(document: &gltf::Document, buffers: &[gltf::buffer::Data]) -> Result<MeshData> {
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .context("glTF document has no scenes")?;

    let mut mesh = MeshData::default();
    for node in scene.nodes() {
        process_node(&node, buffers, &Mat4::IDENTITY, &mut mesh)?;
    }

    if mesh.indices.is_empty() {
        bail!("glTF scene contains no triangle primitives");
    }

    log::debug!(
        "glTF mesh: {} vertices, {} triangles",
        mesh.vertices.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Recursively processes glTF nodes
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    mesh: &mut MeshData,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(node_mesh) = node.mesh() {
        process_mesh(&node_mesh, buffers, &global_transform, mesh)?;
    }

    for child in node.children() {
        process_node(&child, buffers, &global_transform, mesh)?;
    }

    Ok(())
}

fn process_mesh(
    node_mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: &Mat4,
    mesh: &mut MeshData,
) -> Result<()> {
    let normal_matrix = Mat3::from_mat4(*transform).inverse().transpose();

    for primitive in node_mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!(
                "Skipping {:?} primitive in mesh {:?}",
                primitive.mode(),
                node_mesh.name()
            );
            continue;
        }

        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d.0[..]));

        let positions: Vec<Vec3> = reader
            .read_positions()
            .context("Mesh primitive has no positions")?
            .map(|p| transform.transform_point3(Vec3::from_array(p)))
            .collect();

        if positions.is_empty() {
            continue;
        }

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };
        let indices: Vec<u32> = indices
            .chunks_exact(3)
            .filter(|tri| tri.iter().all(|&i| (i as usize) < positions.len()))
            .flatten()
            .copied()
            .collect();

        let normals: Vec<Vec3> = match reader.read_normals() {
            Some(normals) => normals
                .map(|n| (normal_matrix * Vec3::from_array(n)).normalize_or_zero())
                .collect(),
            None => compute_normals(&positions, &indices),
        };

        let base = mesh.vertices.len() as u32;
        for (i, position) in positions.iter().enumerate() {
            let normal = normals.get(i).copied().unwrap_or(Vec3::Y);
            mesh.vertices
                .push(Vertex::new(position.to_array(), normal.to_array()));
            mesh.bounds.include(*position);
        }
        mesh.indices.extend(indices.iter().map(|i| base + i));
    }

    Ok(())
}

/// Area-weighted smooth vertex normals
pub fn compute_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        // Cross product length is twice the triangle area
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    normals
        .into_iter()
        .map(|n| {
            let n = n.normalize_or_zero();
            if n == Vec3::ZERO {
                Vec3::Y
            } else {
                n
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_normals_single_triangle() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let normals = compute_normals(&positions, &[0, 1, 2]);
        for n in normals {
            assert!((n - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn test_unreferenced_vertex_gets_up_normal() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE];
        let normals = compute_normals(&positions, &[0, 1, 2]);
        assert_eq!(normals[3], Vec3::Y);
    }

    #[test]
    fn test_missing_file_fails() {
        assert!(load_mesh("does/not/exist.glb").is_err());
    }
}
