//! Growth-only accumulator for one half of a slice.

use crate::errors::SliceError;
use crate::mesh::Mesh;
use crate::triangle::Triangle;
use nalgebra::{Point3, Vector2, Vector3};

use crate::float_types::Real;

/// Accumulates whole triangles for one resulting half-mesh.
///
/// Appends are flat and unindexed: every triangle contributes three
/// fresh entries to the parallel arrays even when its positions exactly
/// match earlier ones. A buffer is created fresh per slice, populated
/// exclusively by the slicer, and consumed by [`MeshBuffer::finalize`].
#[derive(Debug, Default)]
pub struct MeshBuffer {
    positions: Vec<Point3<Real>>,
    normals: Vec<Vector3<Real>>,
    uvs: Vec<Vector2<Real>>,
    sub_meshes: Vec<Vec<u32>>,
}

impl MeshBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Append one triangle: three vertex records onto the parallel
    /// arrays and three new sequential indices onto the list for
    /// `triangle.sub_mesh`, growing the list collection when the
    /// sub-mesh index is past the current count. Always succeeds.
    pub fn append(&mut self, triangle: &Triangle) {
        let base = self.positions.len();

        for vertex in &triangle.vertices {
            self.positions.push(vertex.pos);
            self.normals.push(vertex.normal);
            self.uvs.push(vertex.uv);
        }

        if self.sub_meshes.len() < triangle.sub_mesh + 1 {
            self.sub_meshes.resize_with(triangle.sub_mesh + 1, Vec::new);
        }

        let indices = &mut self.sub_meshes[triangle.sub_mesh];
        for offset in 0..3u32 {
            indices.push(base as u32 + offset);
        }
    }

    /// Convert the accumulated data into an immutable [`Mesh`].
    ///
    /// Fails only when the vertex count no longer fits the host index
    /// width; at gameplay scale this is not expected.
    pub fn finalize(self) -> Result<Mesh, SliceError> {
        if self.positions.len() > u32::MAX as usize {
            return Err(SliceError::IndexLimitExceeded {
                vertices: self.positions.len(),
            });
        }
        Ok(Mesh::new(
            self.positions,
            self.normals,
            self.uvs,
            self.sub_meshes,
        ))
    }
}
