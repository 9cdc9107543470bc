//! Runtime **plane slicing** of triangulated surface meshes: given an
//! arbitrary mesh and a cutting plane, produce two closed, renderable
//! sub-meshes for the two halves of the original geometry, with a
//! synthesized cap surface filling the exposed cross-section.
//!
//! The kernel is [`slicer::slice_mesh`]: it classifies every triangle
//! against the plane, splits boundary-crossing triangles with attribute
//! interpolation, corrects winding so both halves stay outward-facing,
//! and fan-triangulates the cut loop into a cap under a dedicated
//! sub-mesh index (so the cut face can carry its own material).
//!
//! Output meshes are flat/unindexed: vertices are always copied per
//! triangle, never welded. This keeps the clip logic simple at the cost
//! of larger buffers.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod vertex;
pub mod plane;
pub mod triangle;
pub mod mesh;
pub mod buffer;
pub mod slicer;
pub mod event;
pub mod host;
pub mod shake;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use buffer::MeshBuffer;
pub use errors::SliceError;
pub use mesh::Mesh;
pub use plane::Plane;
pub use slicer::{SliceOutput, Slicer, slice_mesh};
pub use triangle::Triangle;
pub use vertex::Vertex;
