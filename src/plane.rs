//! The cutting plane and its half-space tests.

use crate::errors::SliceError;
use crate::float_types::{Real, tolerance};
use nalgebra::{Matrix4, Point3, Vector3};

/// An unbounded plane in the local space of the mesh being cut, stored
/// as a unit normal and an offset, so that `normal · p = w` for points
/// `p` on the plane.
///
/// `signed_distance(p) >= 0` is the **positive** half-space.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    normal: Vector3<Real>,
    w: Real,
}

impl Plane {
    /// Build a plane from a (not necessarily unit) normal and an offset
    /// along it. Fails when the normal is too short to normalize.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Result<Self, SliceError> {
        let norm = normal.norm();
        if norm <= tolerance() {
            return Err(SliceError::DegeneratePlane);
        }
        Ok(Plane {
            normal: normal / norm,
            w: w / norm,
        })
    }

    /// Build a plane passing through `point` with the given normal.
    pub fn from_normal_and_point(
        normal: Vector3<Real>,
        point: Point3<Real>,
    ) -> Result<Self, SliceError> {
        let norm = normal.norm();
        if norm <= tolerance() {
            return Err(SliceError::DegeneratePlane);
        }
        let unit = normal / norm;
        Ok(Plane {
            normal: unit,
            w: unit.dot(&point.coords),
        })
    }

    /// Re-express a world-space plane (position + normal) in the local
    /// space of a candidate with world transform `world_transform`.
    ///
    /// The position is mapped through the inverse transform; the normal,
    /// being covariant, is mapped through the transpose of the forward
    /// linear part, which stays correct under non-uniform scale.
    pub fn to_local(
        world_transform: &Matrix4<Real>,
        world_pos: &Point3<Real>,
        world_normal: &Vector3<Real>,
    ) -> Result<Self, SliceError> {
        let inverse = world_transform
            .try_inverse()
            .ok_or(SliceError::NonInvertibleTransform)?;
        let local_pos = inverse.transform_point(world_pos);
        let local_normal =
            world_transform.fixed_view::<3, 3>(0, 0).transpose() * world_normal;
        Self::from_normal_and_point(local_normal, local_pos)
    }

    /// The unit normal of the plane.
    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    /// The offset (distance from origin along the normal).
    pub const fn offset(&self) -> Real {
        self.w
    }

    /// Signed distance of `point` to the plane: `normal · p - w`.
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Whether `point` lies in the positive half-space (`>= 0`).
    /// On-plane points count as positive, matching the classification
    /// used by the slicer.
    pub fn is_above(&self, point: &Point3<Real>) -> bool {
        self.signed_distance(point) >= 0.0
    }

    /// Flip the plane in place (reverse normal and offset).
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Return a flipped copy of this plane.
    pub fn flipped(&self) -> Self {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }
}
