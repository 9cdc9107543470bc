//! The slicing algorithm proper: triangle classification, splitting and
//! cap synthesis.

use crate::buffer::MeshBuffer;
use crate::errors::SliceError;
use crate::event::{SliceEvents, SubscriberId};
use crate::float_types::{EPSILON, Real, tolerance};
use crate::host::{Candidate, MaterialId, SliceHost};
use crate::mesh::Mesh;
use crate::plane::Plane;
use crate::triangle::Triangle;
use crate::vertex::Vertex;
use nalgebra::{Point3, UnitQuaternion, Vector2, Vector3};
use tracing::{debug, warn};

/// The two finalized halves of a slice. `positive` is the half on the
/// side the plane normal points toward (`signed_distance >= 0`).
#[derive(Debug)]
pub struct SliceOutput {
    pub positive: Mesh,
    pub negative: Mesh,
    /// Number of cut vertices produced while splitting, two per split
    /// triangle. Zero means the plane never crossed a triangle and no
    /// cap was generated.
    pub cut_vertex_count: usize,
}

impl SliceOutput {
    /// Whether the plane actually separated the mesh into two non-empty
    /// halves.
    pub fn is_separated(&self) -> bool {
        self.positive.vertex_count() > 0 && self.negative.vertex_count() > 0
    }
}

/// Split `mesh` with `plane` (both in the mesh's local space) into two
/// closed half-meshes, capping the exposed cross-section.
///
/// Pure and deterministic: a fresh pair of buffers and a fresh
/// intersection list per call, no side effects, no retry semantics.
/// Structural defects in the input abort the call; geometric
/// degeneracies inside a single triangle are skipped locally so one bad
/// triangle cannot abort the whole slice.
///
/// The cap is a triangle fan around the centroid of the cut vertices,
/// walked in emission order two entries at a time. That fixed pairing
/// closes the fan only for a single convex intersection loop, which is
/// the supported target; concave or multi-loop cuts are out of scope.
pub fn slice_mesh(mesh: &Mesh, plane: &Plane) -> Result<SliceOutput, SliceError> {
    mesh.validate()?;

    let mut positive = MeshBuffer::new();
    let mut negative = MeshBuffer::new();
    let mut cut_vertices: Vec<Vertex> = Vec::new();
    let mut split_count = 0usize;
    let mut skipped = 0usize;

    for (sub_mesh, indices) in mesh.sub_meshes.iter().enumerate() {
        for chunk in indices.chunks_exact(3) {
            let triangle = Triangle::from_mesh(mesh, sub_mesh, [chunk[0], chunk[1], chunk[2]]);

            let above = [
                plane.is_above(&triangle.vertices[0].pos),
                plane.is_above(&triangle.vertices[1].pos),
                plane.is_above(&triangle.vertices[2].pos),
            ];

            if above[0] == above[1] && above[0] == above[2] {
                // Wholly on one side; copy straight through.
                let buffer = if above[0] { &mut positive } else { &mut negative };
                emit(buffer, triangle);
            } else {
                split_count += 1;
                if !split_triangle(
                    plane,
                    triangle,
                    above,
                    &mut positive,
                    &mut negative,
                    &mut cut_vertices,
                ) {
                    skipped += 1;
                }
            }
        }
    }

    if !cut_vertices.is_empty() {
        build_cap(
            plane,
            &cut_vertices,
            mesh.sub_mesh_count(),
            &mut positive,
            &mut negative,
        );
    }

    debug!(
        triangles = mesh.triangle_count(),
        split = split_count,
        skipped_degenerate = skipped,
        cut_vertices = cut_vertices.len(),
        positive_vertices = positive.vertex_count(),
        negative_vertices = negative.vertex_count(),
        "slice complete"
    );

    Ok(SliceOutput {
        positive: positive.finalize()?,
        negative: negative.finalize()?,
        cut_vertex_count: cut_vertices.len(),
    })
}

/// Winding-correct and append.
fn emit(buffer: &mut MeshBuffer, mut triangle: Triangle) {
    triangle.correct_winding();
    buffer.append(&triangle);
}

/// Split one boundary-crossing triangle 2-against-1.
///
/// A plane can only separate a triangle's vertices two against one (the
/// 3-against-0 case copies straight through), so partition into a
/// two-vertex majority and a single minority vertex, cut the two edges
/// running toward the minority, and emit two triangles on the majority
/// side plus one on the minority side. The two cut vertices are pushed
/// onto the shared intersection list, L before R, for cap generation.
///
/// Returns `false` when a cut-edge intersection is degenerate (edge
/// parallel to the plane, or the hit parameter off the segment); in that
/// case nothing is emitted for this triangle rather than emitting a
/// NaN/garbage vertex.
fn split_triangle(
    plane: &Plane,
    triangle: Triangle,
    above: [bool; 3],
    positive: &mut MeshBuffer,
    negative: &mut MeshBuffer,
    cut_vertices: &mut Vec<Vertex>,
) -> bool {
    let majority_above = above.iter().filter(|side| **side).count() == 2;

    let mut majority: Vec<&Vertex> = Vec::with_capacity(2);
    let mut minority: Option<&Vertex> = None;
    for (vertex, side) in triangle.vertices.iter().zip(above) {
        if side == majority_above {
            majority.push(vertex);
        } else {
            minority = Some(vertex);
        }
    }
    // The mixed-sign precondition guarantees exactly 2 + 1.
    let minority = minority.unwrap_or(&triangle.vertices[0]);

    let (Some(left), Some(right)) = (
        edge_intersection(plane, majority[0], minority),
        edge_intersection(plane, majority[1], minority),
    ) else {
        warn!(
            sub_mesh = triangle.sub_mesh,
            "degenerate plane-edge intersection, dropping split triangle"
        );
        return false;
    };

    let (majority_buffer, minority_buffer) = if majority_above {
        (positive, negative)
    } else {
        (negative, positive)
    };

    let sub_mesh = triangle.sub_mesh;
    emit(
        majority_buffer,
        Triangle::new(
            [majority[0].clone(), left.clone(), right.clone()],
            sub_mesh,
        ),
    );
    emit(
        majority_buffer,
        Triangle::new(
            [majority[0].clone(), majority[1].clone(), right.clone()],
            sub_mesh,
        ),
    );
    emit(
        minority_buffer,
        Triangle::new([minority.clone(), left.clone(), right.clone()], sub_mesh),
    );

    cut_vertices.push(left);
    cut_vertices.push(right);
    true
}

/// Intersect the segment `start -> end` with the plane, interpolating
/// normal and uv by the fractional hit distance. `None` when the
/// segment is (near-)parallel to the plane or the hit lies off the
/// segment.
fn edge_intersection(plane: &Plane, start: &Vertex, end: &Vertex) -> Option<Vertex> {
    let direction = end.pos - start.pos;
    let denominator = plane.normal().dot(&direction);
    if denominator.abs() <= tolerance() {
        return None;
    }
    let t = -plane.signed_distance(&start.pos) / denominator;
    if !(-EPSILON..=1.0 + EPSILON).contains(&t) {
        return None;
    }
    Some(start.interpolate(end, t))
}

/// Fan-triangulate the cut loop around its centroid into both buffers,
/// under a dedicated sub-mesh index one past the source's last.
///
/// The caps are mirror images: the positive half looks into its own
/// interior along `-plane.normal`, the negative half along
/// `+plane.normal`. Cap uvs are a fixed placeholder since the cut face
/// is expected to use a flat material.
fn build_cap(
    plane: &Plane,
    cut_vertices: &[Vertex],
    cap_sub_mesh: usize,
    positive: &mut MeshBuffer,
    negative: &mut MeshBuffer,
) {
    let centroid = cut_vertices
        .iter()
        .fold(Vector3::zeros(), |acc, v| acc + v.pos.coords)
        / cut_vertices.len() as Real;
    let centroid = Point3::from(centroid);
    let cap_uv = Vector2::zeros();

    let n = cut_vertices.len();
    for i in (0..n).step_by(2) {
        let a = cut_vertices[i].pos;
        let b = cut_vertices[(i + 1) % n].pos;

        for (buffer, normal) in [(&mut *positive, -plane.normal()), (negative, plane.normal())]
        {
            emit(
                buffer,
                Triangle::new(
                    [
                        Vertex::new(a, normal, cap_uv),
                        Vertex::new(b, normal, cap_uv),
                        Vertex::new(centroid, normal, cap_uv),
                    ],
                    cap_sub_mesh,
                ),
            );
        }
    }
}

/// Stateful front end over [`slice_mesh`]: owns the slice-completed
/// observer list and the impulse used to push the two halves apart when
/// driving a [`SliceHost`].
pub struct Slicer {
    events: SliceEvents,
    separation_impulse: Real,
}

impl Default for Slicer {
    fn default() -> Self {
        Self::new()
    }
}

impl Slicer {
    pub fn new() -> Self {
        Slicer {
            events: SliceEvents::new(),
            separation_impulse: 0.0,
        }
    }

    /// Magnitude of the one-shot impulse applied along `±plane normal`
    /// to the materialized halves, to visually separate them.
    pub fn with_separation_impulse(mut self, impulse: Real) -> Self {
        self.separation_impulse = impulse;
        self
    }

    /// Attach a slice-completed handler (no payload).
    pub fn on_slice(&mut self, handler: impl FnMut() + 'static) -> SubscriberId {
        self.events.subscribe(handler)
    }

    /// Detach a previously attached handler.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Slice one candidate with a world-space plane. The plane is
    /// re-expressed in the candidate's local space first; subscribers
    /// are notified synchronously after the slice completes.
    ///
    /// Materialization and destruction stay with the caller.
    pub fn slice(
        &mut self,
        candidate: &Candidate,
        plane_pos_world: &Point3<Real>,
        plane_normal_world: &Vector3<Real>,
    ) -> Result<SliceOutput, SliceError> {
        let plane = Plane::to_local(&candidate.transform, plane_pos_world, plane_normal_world)?;
        let output = slice_mesh(&candidate.mesh, &plane)?;
        self.events.notify();
        Ok(output)
    }

    /// Full slice pass against a host scene: query candidates
    /// overlapping the cutting tool's oriented box, slice each, then
    /// materialize both halves at the original transform (inheriting
    /// the original material list, plus `cap_material` when a cap
    /// sub-mesh was created), apply the separation impulse, and destroy
    /// the original.
    ///
    /// Candidates the plane misses (one empty half, no cut vertices)
    /// are left untouched. Zero candidates is a no-op.
    #[allow(clippy::too_many_arguments)]
    pub fn slice_scene<H: SliceHost>(
        &mut self,
        host: &mut H,
        plane_pos_world: &Point3<Real>,
        plane_normal_world: &Vector3<Real>,
        half_extents: &Vector3<Real>,
        rotation: &UnitQuaternion<Real>,
        layer_mask: u32,
        cap_material: MaterialId,
    ) -> Result<Vec<(H::Handle, H::Handle)>, SliceError> {
        let candidates =
            host.find_candidates(plane_pos_world, half_extents, rotation, layer_mask);
        debug!(candidates = candidates.len(), "slice pass");

        let mut halves = Vec::new();
        for (handle, candidate) in candidates {
            let plane =
                Plane::to_local(&candidate.transform, plane_pos_world, plane_normal_world)?;
            let output = slice_mesh(&candidate.mesh, &plane)?;

            if !output.is_separated() {
                debug!("plane missed candidate, leaving it unsliced");
                continue;
            }

            let mut materials = candidate.materials.clone();
            if output.positive.sub_mesh_count() > candidate.mesh.sub_mesh_count() {
                materials.push(cap_material);
            }

            let impulse = plane_normal_world * self.separation_impulse;
            let positive_handle = host.instantiate(
                output.positive,
                candidate.transform,
                materials.clone(),
                impulse,
            );
            let negative_handle =
                host.instantiate(output.negative, candidate.transform, materials, -impulse);
            host.destroy(handle);

            self.events.notify();
            halves.push((positive_handle, negative_handle));
        }
        Ok(halves)
    }
}

impl std::fmt::Debug for Slicer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slicer")
            .field("events", &self.events)
            .field("separation_impulse", &self.separation_impulse)
            .finish()
    }
}
