//! The boundary with the hosting scene: candidate discovery, object
//! materialization and destruction.
//!
//! The slicer never touches the scene graph or the physics world
//! directly; everything it needs from them crosses this trait.

use crate::float_types::Real;
use crate::mesh::Mesh;
use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};

/// One material slot, parallel to a sub-mesh index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

/// A mesh-bearing scene object eligible for slicing: its mesh (local
/// space), its world transform, and one material per sub-mesh.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub mesh: Mesh,
    pub transform: Matrix4<Real>,
    pub materials: Vec<MaterialId>,
}

impl Candidate {
    pub fn new(mesh: Mesh, transform: Matrix4<Real>, materials: Vec<MaterialId>) -> Self {
        Candidate {
            mesh,
            transform,
            materials,
        }
    }
}

/// What the hosting engine must provide for a full slice pass.
///
/// `find_candidates` is an oriented-box overlap query (the cutting
/// tool's volume in its current pose) restricted by a layer mask;
/// `instantiate` creates a physical/renderable entity from a finalized
/// mesh, optionally applying a one-shot linear impulse; `destroy`
/// removes the original once both halves exist.
pub trait SliceHost {
    type Handle;

    fn find_candidates(
        &self,
        position: &Point3<Real>,
        half_extents: &Vector3<Real>,
        rotation: &UnitQuaternion<Real>,
        layer_mask: u32,
    ) -> Vec<(Self::Handle, Candidate)>;

    fn instantiate(
        &mut self,
        mesh: Mesh,
        transform: Matrix4<Real>,
        materials: Vec<MaterialId>,
        impulse: Vector3<Real>,
    ) -> Self::Handle;

    fn destroy(&mut self, handle: Self::Handle);
}
