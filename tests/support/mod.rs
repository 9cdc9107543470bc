//! Test support library
//! Provides various helper functions & utilities for tests.

#![allow(dead_code)]

use meshcleave::float_types::Real;
use meshcleave::mesh::Mesh;
use nalgebra::{Point3, Vector2, Vector3};

pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// A mesh holding a single triangle in one sub-mesh, all normals +Z.
pub fn single_triangle(a: Point3<Real>, b: Point3<Real>, c: Point3<Real>) -> Mesh {
    Mesh::new(
        vec![a, b, c],
        vec![Vector3::z(), Vector3::z(), Vector3::z()],
        vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(0.5, 1.0),
        ],
        vec![vec![0, 1, 2]],
    )
}

/// Iterate the triangles of one sub-mesh as position triples.
pub fn triangles_of(mesh: &Mesh, sub_mesh: usize) -> Vec<[Point3<Real>; 3]> {
    mesh.sub_meshes[sub_mesh]
        .chunks_exact(3)
        .map(|chunk| {
            [
                mesh.positions[chunk[0] as usize],
                mesh.positions[chunk[1] as usize],
                mesh.positions[chunk[2] as usize],
            ]
        })
        .collect()
}

/// The smallest winding agreement `dot(cross(v1-v0, v2-v0), n0)` over
/// every triangle of every sub-mesh. Non-negative (within tolerance)
/// means no triangle faces against its own vertex normal.
pub fn min_winding_agreement(mesh: &Mesh) -> Real {
    let mut min = Real::MAX;
    for list in &mesh.sub_meshes {
        for chunk in list.chunks_exact(3) {
            let [a, b, c] = [
                mesh.positions[chunk[0] as usize],
                mesh.positions[chunk[1] as usize],
                mesh.positions[chunk[2] as usize],
            ];
            let normal = mesh.normals[chunk[0] as usize];
            let agreement = (b - a).cross(&(c - a)).dot(&normal);
            if agreement < min {
                min = agreement;
            }
        }
    }
    min
}

/// Summed area of every triangle in one sub-mesh.
pub fn sub_mesh_area(mesh: &Mesh, sub_mesh: usize) -> Real {
    mesh.sub_meshes[sub_mesh]
        .chunks_exact(3)
        .map(|chunk| {
            let [a, b, c] = [
                mesh.positions[chunk[0] as usize],
                mesh.positions[chunk[1] as usize],
                mesh.positions[chunk[2] as usize],
            ];
            0.5 * (b - a).cross(&(c - a)).norm()
        })
        .sum()
}

/// All vertex positions referenced by one sub-mesh, sorted so two
/// buffers can be compared as multisets.
pub fn sorted_positions(mesh: &Mesh, sub_mesh: usize) -> Vec<[Real; 3]> {
    let mut out: Vec<[Real; 3]> = mesh.sub_meshes[sub_mesh]
        .iter()
        .map(|&i| {
            let p = mesh.positions[i as usize];
            [p.x, p.y, p.z]
        })
        .collect();
    out.sort_by(|a, b| a.partial_cmp(b).unwrap());
    out
}
