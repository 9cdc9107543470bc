//! The triangle record that slicing consumes and emits.

use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::vertex::Vertex;
use nalgebra::Vector3;

/// Exactly three vertex records plus the sub-mesh (material group) the
/// triangle belongs to.
///
/// Triangles are freshly constructed per emission site and immutable
/// afterwards except for the in-place winding flip, so no aliasing
/// hazards arise from the `&mut self` flip routines.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
    pub sub_mesh: usize,
}

impl Triangle {
    pub const fn new(vertices: [Vertex; 3], sub_mesh: usize) -> Self {
        Triangle { vertices, sub_mesh }
    }

    /// Gather one triangle out of a mesh's parallel attribute arrays.
    ///
    /// The indices must already be validated against the mesh (the
    /// slicer calls [`Mesh::validate`] before traversal).
    pub fn from_mesh(mesh: &Mesh, sub_mesh: usize, indices: [u32; 3]) -> Self {
        let gather = |i: u32| {
            let i = i as usize;
            Vertex::new(mesh.positions[i], mesh.normals[i], mesh.uvs[i])
        };
        Triangle {
            vertices: [gather(indices[0]), gather(indices[1]), gather(indices[2])],
            sub_mesh,
        }
    }

    /// The (unnormalized) geometric normal `cross(v1 - v0, v2 - v0)`.
    pub fn geometric_normal(&self) -> Vector3<Real> {
        let [a, b, c] = &self.vertices;
        (b.pos - a.pos).cross(&(c.pos - a.pos))
    }

    /// Swap vertices 1 and 2 in place, reversing the winding order.
    /// Positions, normals and uvs move together.
    pub fn flip_winding(&mut self) {
        self.vertices.swap(1, 2);
    }

    /// Flip the winding when it disagrees with the stored vertex normal,
    /// i.e. when `dot(cross(v1 - v0, v2 - v0), v0.normal) < 0`.
    ///
    /// Applied to every emitted triangle, split or whole, wall or cap,
    /// so outward-facing surfaces survive slicing without backface
    /// artifacts. Degenerate (zero-area) triangles are left untouched.
    pub fn correct_winding(&mut self) -> bool {
        let agreement: Real = self.geometric_normal().dot(&self.vertices[0].normal);
        if agreement < 0.0 {
            self.flip_winding();
            true
        } else {
            false
        }
    }
}
