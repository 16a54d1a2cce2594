use jello::{EdgeSet, PhysicsError, TriangleMesh, Vec3};

fn cube() -> TriangleMesh<f64> {
    TriangleMesh::cuboid(Vec3::zero(), Vec3::splat(0.5))
}

#[test]
fn cube_surface_has_eighteen_springs() {
    let mesh = cube();
    let edges = EdgeSet::from_faces(mesh.positions(), mesh.faces(), 150.0, None).unwrap();
    // 12 box edges plus one diagonal per side.
    assert_eq!(edges.len(), 18);
    assert_eq!(edges.support_count(), 0);
    assert!(edges.contains(0, 1));
    assert!(edges.contains(1, 0));
    assert!(!edges.contains(0, 7));
}

#[test]
fn rest_lengths_come_from_template() {
    let mesh = cube();
    let edges = EdgeSet::from_faces(mesh.positions(), mesh.faces(), 150.0, None).unwrap();
    for edge in edges.edges() {
        let length = mesh.positions()[edge.v0].distance(mesh.positions()[edge.v1]);
        assert!((edge.rest_length - length).abs() < 1e-12);
        assert!(edge.tension(mesh.positions()[edge.v0], mesh.positions()[edge.v1]).abs() < 1e-9);
        assert_eq!(edge.stiffness, 150.0);
    }
}

#[test]
fn support_modulus_one_connects_every_pair() {
    let mesh = cube();
    let edges = EdgeSet::from_faces(mesh.positions(), mesh.faces(), 150.0, Some(1)).unwrap();
    assert_eq!(edges.len(), 28);
    assert_eq!(edges.support_count(), 10);
    assert!(edges.contains(0, 7));
}

#[test]
fn support_modulus_two_skips_odd_pairs() {
    let mesh = cube();
    let edges = EdgeSet::from_faces(mesh.positions(), mesh.faces(), 150.0, Some(2)).unwrap();
    // Only the +x side diagonal 3-5 joins two odd vertices.
    assert_eq!(edges.support_count(), 9);
    assert_eq!(edges.len(), 27);
    assert!(!edges.contains(3, 5));
}

#[test]
fn support_modulus_zero_is_rejected() {
    let mesh = cube();
    let err = EdgeSet::from_faces(mesh.positions(), mesh.faces(), 150.0, Some(0)).unwrap_err();
    assert_eq!(err, PhysicsError::InvalidSupportModulus);
}

#[test]
fn malformed_faces_are_rejected() {
    let positions = vec![Vec3::<f64>::zero(); 3];
    assert_eq!(
        EdgeSet::from_faces(&positions, &[0, 1], 1.0, None).unwrap_err(),
        PhysicsError::MalformedFaceList { len: 2 }
    );
    assert_eq!(
        EdgeSet::from_faces(&positions, &[0, 1, 5], 1.0, None).unwrap_err(),
        PhysicsError::VertexOutOfBounds { index: 5, count: 3 }
    );
    assert_eq!(
        EdgeSet::from_faces(&positions, &[0, 1, 2], -1.0, None).unwrap_err(),
        PhysicsError::InvalidStiffness
    );
}

#[test]
fn shared_sides_become_one_spring() {
    let positions = vec![
        Vec3::new(0.0f64, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
    ];
    let edges = EdgeSet::from_faces(&positions, &[0, 1, 2, 1, 3, 2], 10.0, None).unwrap();
    assert_eq!(edges.len(), 5);
    assert!(edges.contains(1, 2));
}
