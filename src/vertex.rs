//! Struct and functions for working with `Vertex`s from which triangles are composed.

use crate::float_types::Real;
use nalgebra::{Point3, Vector2, Vector3};

/// A vertex attribute record: position, normal and texture coordinate.
///
/// Vertices are always copied by value; no vertex is ever shared by
/// reference across triangles in a slicer output.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
    pub uv: Vector2<Real>,
}

impl Vertex {
    /// Create a new [`Vertex`].
    ///
    /// * `pos`    – the position in model space
    /// * `normal` – (optionally non-unit) normal; it is copied verbatim,
    ///   so make sure it is oriented the way the winding test expects it
    pub const fn new(pos: Point3<Real>, normal: Vector3<Real>, uv: Vector2<Real>) -> Self {
        Vertex { pos, normal, uv }
    }

    /// Flip vertex normal
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Return the barycentric linear interpolation between `self` (`t = 0`)
    /// and `other` (`t = 1`).
    ///
    /// Normals and uvs are linearly interpolated as well.
    pub fn interpolate(&self, other: &Vertex, t: Real) -> Vertex {
        // For positions (Point3): p(t) = p0 + t * (p1 - p0)
        let new_pos = self.pos + (other.pos - self.pos) * t;

        // For normals / uvs (vectors): v(t) = v0 + t * (v1 - v0)
        let new_normal = self.normal + (other.normal - self.normal) * t;
        let new_uv = self.uv + (other.uv - self.uv) * t;
        Vertex::new(new_pos, new_normal, new_uv)
    }
}
