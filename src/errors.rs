//! Slice-time errors

/// Everything that can abort a slice call or a buffer finalize.
///
/// Structural variants indicate malformed input data (a programming or
/// asset error) and are raised before any triangle is processed.
/// Geometric degeneracies inside the kernel are *not* errors: they are
/// handled locally by skipping the malformed piece.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SliceError {
    /// A sub-mesh index list references a vertex past the end of the
    /// attribute arrays.
    #[error("index {index} out of range in sub-mesh {sub_mesh} (vertex count = {len})")]
    IndexOutOfRange {
        sub_mesh: usize,
        index: usize,
        len: usize,
    },

    /// The parallel attribute arrays disagree in length.
    #[error(
        "attribute array lengths differ: {positions} positions, {normals} normals, {uvs} uvs"
    )]
    AttributeLengthMismatch {
        positions: usize,
        normals: usize,
        uvs: usize,
    },

    /// A sub-mesh index list length is not a multiple of 3.
    #[error("sub-mesh {sub_mesh} index list length {len} is not a multiple of 3")]
    RaggedIndexList { sub_mesh: usize, len: usize },

    /// A finalized mesh would exceed the host index width (u32).
    #[error("vertex count {vertices} exceeds the u32 index limit")]
    IndexLimitExceeded { vertices: usize },

    /// A cutting plane was given a zero (or near-zero) normal.
    #[error("cutting plane normal is zero or near-zero")]
    DegeneratePlane,

    /// A candidate's world transform cannot be inverted, so the plane
    /// cannot be re-expressed in its local space.
    #[error("candidate transform is not invertible")]
    NonInvertibleTransform,
}
