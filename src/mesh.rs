//! `Mesh` struct: the source and result type of a slice operation.

use crate::errors::SliceError;
use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use nalgebra::{Point3, Vector2, Vector3};
use std::sync::OnceLock;

/// A renderable triangle mesh stored as parallel attribute arrays plus
/// one flat index list per sub-mesh (material group).
///
/// Index `i` describes one vertex across `positions`, `normals` and
/// `uvs`; each sub-mesh list holds triples of indices into them. The
/// same shape serves as slicer input (a candidate's mesh) and slicer
/// output (a finalized buffer), and is read-only in both roles.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub positions: Vec<Point3<Real>>,
    pub normals: Vec<Vector3<Real>>,
    pub uvs: Vec<Vector2<Real>>,
    pub sub_meshes: Vec<Vec<u32>>,

    /// Lazily calculated AABB that spans `positions`.
    pub bounding_box: OnceLock<Aabb>,
}

impl Mesh {
    pub fn new(
        positions: Vec<Point3<Real>>,
        normals: Vec<Vector3<Real>>,
        uvs: Vec<Vector2<Real>>,
        sub_meshes: Vec<Vec<u32>>,
    ) -> Self {
        Mesh {
            positions,
            normals,
            uvs,
            sub_meshes,
            bounding_box: OnceLock::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn sub_mesh_count(&self) -> usize {
        self.sub_meshes.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.sub_meshes.iter().map(|list| list.len() / 3).sum()
    }

    /// Enforce the structural invariants: parallel arrays of equal
    /// length, index lists in multiples of 3, every index in range.
    ///
    /// Violations are programming/data errors, fatal to the slice call
    /// that detects them; nothing is ever silently truncated.
    pub fn validate(&self) -> Result<(), SliceError> {
        if self.normals.len() != self.positions.len() || self.uvs.len() != self.positions.len()
        {
            return Err(SliceError::AttributeLengthMismatch {
                positions: self.positions.len(),
                normals: self.normals.len(),
                uvs: self.uvs.len(),
            });
        }
        for (sub_mesh, list) in self.sub_meshes.iter().enumerate() {
            if list.len() % 3 != 0 {
                return Err(SliceError::RaggedIndexList {
                    sub_mesh,
                    len: list.len(),
                });
            }
            for &index in list {
                if index as usize >= self.positions.len() {
                    return Err(SliceError::IndexOutOfRange {
                        sub_mesh,
                        index: index as usize,
                        len: self.positions.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Local-space AABB over all vertex positions, cached after the
    /// first call. An empty mesh yields a trivial AABB at the origin.
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);

            for p in &self.positions {
                mins.x = mins.x.min(p.x);
                mins.y = mins.y.min(p.y);
                mins.z = mins.z.min(p.z);

                maxs.x = maxs.x.max(p.x);
                maxs.y = maxs.y.max(p.y);
                maxs.z = maxs.z.max(p.z);
            }

            if mins.x > maxs.x {
                return Aabb::new(Point3::origin(), Point3::origin());
            }
            Aabb::new(mins, maxs)
        })
    }

    /// An axis-aligned cube centered at the origin with edge length
    /// `size`: 24 vertices, 12 triangles, one sub-mesh, outward per-face
    /// normals and per-face uvs. Handy as a slicing target in demos and
    /// tests.
    pub fn cube(size: Real) -> Self {
        let h = size * 0.5;
        let mut mesh = Mesh::default();
        mesh.sub_meshes.push(Vec::new());

        // (face normal, 4 corners counter-clockwise seen from outside)
        let faces: [(Vector3<Real>, [Point3<Real>; 4]); 6] = [
            (
                Vector3::x(),
                [
                    Point3::new(h, -h, -h),
                    Point3::new(h, h, -h),
                    Point3::new(h, h, h),
                    Point3::new(h, -h, h),
                ],
            ),
            (
                -Vector3::x(),
                [
                    Point3::new(-h, -h, h),
                    Point3::new(-h, h, h),
                    Point3::new(-h, h, -h),
                    Point3::new(-h, -h, -h),
                ],
            ),
            (
                Vector3::y(),
                [
                    Point3::new(-h, h, -h),
                    Point3::new(-h, h, h),
                    Point3::new(h, h, h),
                    Point3::new(h, h, -h),
                ],
            ),
            (
                -Vector3::y(),
                [
                    Point3::new(-h, -h, -h),
                    Point3::new(h, -h, -h),
                    Point3::new(h, -h, h),
                    Point3::new(-h, -h, h),
                ],
            ),
            (
                Vector3::z(),
                [
                    Point3::new(-h, -h, h),
                    Point3::new(h, -h, h),
                    Point3::new(h, h, h),
                    Point3::new(-h, h, h),
                ],
            ),
            (
                -Vector3::z(),
                [
                    Point3::new(-h, -h, -h),
                    Point3::new(-h, h, -h),
                    Point3::new(h, h, -h),
                    Point3::new(h, -h, -h),
                ],
            ),
        ];

        let face_uvs = [
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(0.0, 1.0),
        ];

        for (normal, corners) in faces {
            let base = mesh.positions.len() as u32;
            for (corner, uv) in corners.iter().zip(face_uvs) {
                mesh.positions.push(*corner);
                mesh.normals.push(normal);
                mesh.uvs.push(uv);
            }
            mesh.sub_meshes[0]
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }
}
