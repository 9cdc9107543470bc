use std::cell::RefCell;
use std::rc::Rc;

use meshcleave::float_types::Real;
use meshcleave::host::{Candidate, MaterialId, SliceHost};
use meshcleave::mesh::Mesh;
use meshcleave::slicer::Slicer;
use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};

/// Minimal in-memory scene standing in for the engine side.
#[derive(Default)]
struct TestHost {
    candidates: Vec<Candidate>,
    spawned: Vec<(Mesh, Vec<MaterialId>, Vector3<Real>)>,
    destroyed: Vec<usize>,
}

impl SliceHost for TestHost {
    type Handle = usize;

    fn find_candidates(
        &self,
        _position: &Point3<Real>,
        _half_extents: &Vector3<Real>,
        _rotation: &UnitQuaternion<Real>,
        _layer_mask: u32,
    ) -> Vec<(usize, Candidate)> {
        self.candidates.iter().cloned().enumerate().collect()
    }

    fn instantiate(
        &mut self,
        mesh: Mesh,
        _transform: Matrix4<Real>,
        materials: Vec<MaterialId>,
        impulse: Vector3<Real>,
    ) -> usize {
        self.spawned.push((mesh, materials, impulse));
        self.spawned.len() - 1
    }

    fn destroy(&mut self, handle: usize) {
        self.destroyed.push(handle);
    }
}

fn cube_host() -> TestHost {
    TestHost {
        candidates: vec![Candidate::new(
            Mesh::cube(1.0),
            Matrix4::identity(),
            vec![MaterialId(7)],
        )],
        ..Default::default()
    }
}

#[test]
fn slice_scene_materializes_both_halves_and_destroys_original() {
    let mut host = cube_host();
    let mut slicer = Slicer::new().with_separation_impulse(3.0);

    let halves = slicer
        .slice_scene(
            &mut host,
            &Point3::origin(),
            &Vector3::y(),
            &Vector3::new(2.0, 0.1, 2.0),
            &UnitQuaternion::identity(),
            1,
            MaterialId(99),
        )
        .unwrap();

    assert_eq!(halves.len(), 1);
    assert_eq!(host.spawned.len(), 2);
    assert_eq!(host.destroyed, vec![0]);

    // Inherited materials plus the dedicated cap material.
    for (mesh, materials, _) in &host.spawned {
        assert_eq!(materials, &vec![MaterialId(7), MaterialId(99)]);
        assert_eq!(mesh.sub_mesh_count(), 2);
    }

    // Halves are pushed apart along opposite plane normals.
    let (_, _, first_impulse) = &host.spawned[0];
    let (_, _, second_impulse) = &host.spawned[1];
    assert_eq!(*first_impulse, Vector3::new(0.0, 3.0, 0.0));
    assert_eq!(*second_impulse, Vector3::new(0.0, -3.0, 0.0));
}

#[test]
fn slice_scene_leaves_missed_candidates_alone() {
    let mut host = cube_host();
    let mut slicer = Slicer::new();

    // The plane passes above the cube entirely.
    let halves = slicer
        .slice_scene(
            &mut host,
            &Point3::new(0.0, 2.0, 0.0),
            &Vector3::y(),
            &Vector3::new(2.0, 0.1, 2.0),
            &UnitQuaternion::identity(),
            1,
            MaterialId(99),
        )
        .unwrap();

    assert!(halves.is_empty());
    assert!(host.spawned.is_empty());
    assert!(host.destroyed.is_empty());
}

#[test]
fn slice_notifies_subscribers_until_detached() {
    let candidate = Candidate::new(Mesh::cube(1.0), Matrix4::identity(), vec![MaterialId(0)]);
    let mut slicer = Slicer::new();

    let count = Rc::new(RefCell::new(0usize));
    let seen = Rc::clone(&count);
    let id = slicer.on_slice(move || *seen.borrow_mut() += 1);

    slicer
        .slice(&candidate, &Point3::origin(), &Vector3::y())
        .unwrap();
    assert_eq!(*count.borrow(), 1);

    assert!(slicer.unsubscribe(id));
    assert!(!slicer.unsubscribe(id));

    slicer
        .slice(&candidate, &Point3::origin(), &Vector3::y())
        .unwrap();
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn multiple_subscribers_fire_in_subscription_order() {
    let candidate = Candidate::new(Mesh::cube(1.0), Matrix4::identity(), vec![MaterialId(0)]);
    let mut slicer = Slicer::new();

    let order = Rc::new(RefCell::new(Vec::new()));
    for tag in ["first", "second"] {
        let order = Rc::clone(&order);
        slicer.on_slice(move || order.borrow_mut().push(tag));
    }

    slicer
        .slice(&candidate, &Point3::origin(), &Vector3::y())
        .unwrap();
    assert_eq!(*order.borrow(), vec!["first", "second"]);
}
