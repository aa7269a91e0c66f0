use std::io::{BufReader, Cursor};
use std::path::Path;

use cgmath::{InnerSpace, Vector3};

use crate::{
    data_structures::{mesh::GpuMesh, vertex::MeshVertex},
    error::{DemoError, Result},
    resources::load_string,
};

/// A triangle soup: three vertices per triangle, no index buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub num_triangles: u32,
}

impl MeshData {
    pub fn byte_len(&self) -> u64 {
        (self.vertices.len() * std::mem::size_of::<MeshVertex>()) as u64
    }

    /// Positions only, nine floats per triangle.
    pub fn positions(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.position).collect()
    }

    pub fn upload(&self, device: &wgpu::Device, name: &str) -> GpuMesh {
        GpuMesh::new(device, name, &self.vertices)
    }
}

/**
 * Load an OBJ file from the data directory and flatten its first mesh.
 *
 * Faces are triangulated on import. Material libraries are optional: a missing or
 * broken `.mtl` is only logged since the demos shade without materials.
 */
pub async fn load_obj(data_dir: &Path, file_name: &str) -> Result<MeshData> {
    let obj_text = load_string(data_dir, file_name).await?;
    let mut obj_reader = BufReader::new(Cursor::new(obj_text));
    let mtl_dir = data_dir.to_path_buf();

    let (models, materials) = tobj::load_obj_buf_async(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |p| {
            let mtl_dir = mtl_dir.clone();
            async move {
                match load_string(&mtl_dir, &p).await {
                    Ok(mat_text) => tobj::load_mtl_buf(&mut BufReader::new(Cursor::new(mat_text))),
                    Err(e) => {
                        log::warn!("{e}");
                        Err(tobj::LoadError::OpenFileFailed)
                    }
                }
            }
        },
    )
    .await
    .map_err(|source| DemoError::MeshImport {
        file: file_name.to_string(),
        source,
    })?;

    if let Err(e) = materials {
        log::warn!("Materials of {file_name} are ignored: {e}");
    }
    if models.len() > 1 {
        log::info!(
            "{file_name} contains {} meshes, only the first one is used",
            models.len()
        );
    }

    flatten_first_mesh(file_name, &models)
}

/// Expand the indexed faces of the first mesh into one vertex per triangle corner.
pub fn flatten_first_mesh(file_name: &str, models: &[tobj::Model]) -> Result<MeshData> {
    let mesh = match models.first() {
        Some(model) if !model.mesh.indices.is_empty() => &model.mesh,
        _ => {
            return Err(DemoError::EmptyMesh {
                file: file_name.to_string(),
            });
        }
    };

    let position = |index: u32| -> Result<Vector3<f32>> {
        let i = index as usize * 3;
        mesh.positions
            .get(i..i + 3)
            .map(|p| Vector3::new(p[0], p[1], p[2]))
            .ok_or_else(|| DemoError::MalformedMesh {
                file: file_name.to_string(),
                index,
            })
    };

    let mut vertices = Vec::with_capacity(mesh.indices.len());
    for face in mesh.indices.chunks_exact(3) {
        let corners = [position(face[0])?, position(face[1])?, position(face[2])?];
        let normal = face_normal(corners[0], corners[1], corners[2]);
        vertices.extend(corners.into_iter().map(|corner| MeshVertex {
            position: corner.into(),
            normal: normal.into(),
        }));
    }

    let num_triangles = (vertices.len() / 3) as u32;
    Ok(MeshData {
        vertices,
        num_triangles,
    })
}

/// Counter-clockwise winding gives the outward normal. Degenerate faces get a zero normal.
fn face_normal(a: Vector3<f32>, b: Vector3<f32>, c: Vector3<f32>) -> Vector3<f32> {
    let n = (b - a).cross(c - a);
    if n.magnitude2() == 0.0 {
        n
    } else {
        n.normalize()
    }
}
