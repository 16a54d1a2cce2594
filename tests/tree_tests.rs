use std::collections::BTreeSet;

use jello::{Aabb, CollisionTree, Node, TriangleMesh, Vec3};

/// Small triangles scattered on a 3D lattice so the tree has several levels.
fn scattered_mesh() -> TriangleMesh<f64> {
    let mut positions = Vec::new();
    let mut faces = Vec::new();
    for i in 0..5 {
        for j in 0..4 {
            for k in 0..3 {
                let base = Vec3::new(i as f64 * 1.3, j as f64 * 0.7 - 1.0, k as f64 * 2.1);
                let start = positions.len();
                positions.push(base);
                positions.push(base + Vec3::new(0.2, 0.05, 0.0));
                positions.push(base + Vec3::new(0.0, 0.1, 0.15));
                faces.extend_from_slice(&[start, start + 1, start + 2]);
            }
        }
    }
    TriangleMesh::new(positions, faces).unwrap()
}

fn volume_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

fn check_tiling(node: &Node<f64>) {
    let parent = node.bounds();
    let octants: Vec<Aabb<f64>> = (0..8).map(|key| parent.octant(key & 1, (key >> 1) & 1, key >> 2)).collect();

    let total: f64 = octants.iter().map(Aabb::volume).sum();
    assert!(volume_close(total, parent.volume()), "octants cover {} of {}", total, parent.volume());

    for (a, oa) in octants.iter().enumerate() {
        for ob in octants.iter().skip(a + 1) {
            let lo = oa.min.max(ob.min);
            let hi = oa.max.min(ob.max);
            let overlap = (hi.x - lo.x).max(0.0) * (hi.y - lo.y).max(0.0) * (hi.z - lo.z).max(0.0);
            assert_eq!(overlap, 0.0, "octants {:?} and {:?} overlap", oa, ob);
        }
    }

    for child in node.children() {
        assert!(
            octants.iter().any(|o| o == child.bounds()),
            "child box {:?} is not an octant of {:?}",
            child.bounds(),
            parent
        );
        check_tiling(child);
    }
}

fn collect_faces(node: &Node<f64>, out: &mut Vec<usize>) {
    out.extend_from_slice(node.faces());
    for child in node.children() {
        collect_faces(child, out);
    }
}

#[test]
fn single_triangle_is_a_leaf() {
    // The far vertex makes the box huge; it is not referenced by any face.
    let positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.1, 0.0, 0.0),
        Vec3::new(0.0, 0.1, 0.0),
        Vec3::new(100.0, 100.0, 100.0),
    ];
    let faces = vec![0, 1, 2];
    let tree = CollisionTree::build(&positions, &faces);

    let root = tree.root();
    assert!(root.is_leaf());
    assert_eq!(root.faces(), &[0]);
    assert_eq!(root.bounds().max, Vec3::new(100.0, 100.0, 100.0));
    assert_eq!(tree.node_count(), 1);
}

#[test]
fn children_tile_their_parent() {
    let mesh = scattered_mesh();
    let tree = CollisionTree::build(mesh.positions(), mesh.faces());
    assert!(tree.depth() >= 2, "expected a multi-level tree, depth {}", tree.depth());
    check_tiling(tree.root());
}

#[test]
fn every_face_is_stored() {
    let mesh = scattered_mesh();
    let tree = CollisionTree::build(mesh.positions(), mesh.faces());

    let mut stored = Vec::new();
    collect_faces(tree.root(), &mut stored);
    assert_eq!(stored.len(), tree.face_reference_count());

    let stored: BTreeSet<usize> = stored.into_iter().collect();
    let expected: BTreeSet<usize> = mesh.face_starts().collect();
    assert_eq!(stored, expected);
}

#[test]
fn boundary_triangle_goes_to_both_octants() {
    let positions = vec![
        // Lies in the plane x = 1, the split between the low and high x halves.
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 0.5, 0.0),
        Vec3::new(1.0, 0.0, 0.5),
        // Far corner.
        Vec3::new(2.0, 2.0, 2.0),
        Vec3::new(1.8, 2.0, 2.0),
        Vec3::new(2.0, 1.8, 2.0),
        // Unreferenced; pulls the root box down to the origin.
        Vec3::new(0.0, 0.0, 0.0),
    ];
    let faces = vec![0, 1, 2, 3, 4, 5];
    let tree = CollisionTree::build(&positions, &faces);

    let holders = tree.root().children().iter().filter(|c| c.faces().contains(&0)).count();
    assert_eq!(holders, 2);
    assert_eq!(tree.face_reference_count(), 3);
}

#[test]
fn straddling_triangle_stays_at_node() {
    let positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 2.0, 2.0),
        Vec3::new(2.0, 2.0, 2.0),
        Vec3::new(1.8, 2.0, 2.0),
        Vec3::new(2.0, 1.8, 2.0),
    ];
    let faces = vec![0, 1, 2, 3, 4, 5];
    let tree = CollisionTree::build(&positions, &faces);
    assert_eq!(tree.root().faces(), &[0]);
    assert_eq!(tree.root().children().len(), 1);
    assert_eq!(tree.root().children()[0].faces(), &[3]);
}

#[test]
fn depth_limit_stops_degenerate_recursion() {
    // Two point-sized triangles never separate; only the depth cap ends the split.
    let positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(10.0, 10.0, 10.0),
    ];
    let faces = vec![0, 0, 0, 0, 0, 0];
    let tree = CollisionTree::build_with_max_depth(&positions, &faces, 5);

    assert_eq!(tree.max_depth(), 5);
    assert_eq!(tree.depth(), 5);

    let mut node = tree.root();
    while let Some(child) = node.children().first() {
        node = child;
    }
    assert_eq!(node.faces(), &[0, 3]);
}

#[test]
fn zero_depth_keeps_everything_at_root() {
    let mesh = scattered_mesh();
    let tree = CollisionTree::build_with_max_depth(mesh.positions(), mesh.faces(), 0);
    assert!(tree.root().is_leaf());
    assert_eq!(tree.root().faces().len(), mesh.face_count());
}

#[test]
fn flat_floor_copies_faces_into_both_vertical_halves() {
    let floor = TriangleMesh::grid(Vec3::new(0.0f64, 0.0, 0.0), 4, 4, 1.0);
    let tree = CollisionTree::build(floor.positions(), floor.faces());

    // Low and high y halves are the same zero-thickness box.
    let root = tree.root();
    assert_eq!(root.children().len(), 8);
    assert_eq!(root.children()[0].bounds(), root.children()[2].bounds());
    assert_eq!(root.children()[0].faces(), root.children()[2].faces());
    assert!(tree.face_reference_count() >= 2 * floor.face_count());
}
