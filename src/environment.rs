//! Static collision geometry: a triangle mesh and the octree built over it.

use crate::float::Float;
use crate::mesh::TriangleMesh;
use crate::plane::Plane;
use crate::tree::{CollisionTree, DEFAULT_MAX_DEPTH};
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Read-only surroundings a body collides with.
#[derive(Clone, Debug)]
pub struct Environment<F: Float> {
    mesh: TriangleMesh<F>,
    tree: CollisionTree<F>,
}

impl<F: Float> Environment<F> {
    /// Index `mesh` with [`DEFAULT_MAX_DEPTH`].
    pub fn new(mesh: TriangleMesh<F>) -> Self {
        Self::with_max_depth(mesh, DEFAULT_MAX_DEPTH)
    }

    /// Index `mesh` with an explicit tree depth limit.
    pub fn with_max_depth(mesh: TriangleMesh<F>, max_depth: usize) -> Self {
        let tree = CollisionTree::build_with_max_depth(mesh.positions(), mesh.faces(), max_depth);
        Environment { mesh, tree }
    }

    /// No surfaces at all; bodies fall freely.
    pub fn empty() -> Self {
        Self::new(TriangleMesh::empty())
    }

    /// The static mesh.
    pub fn mesh(&self) -> &TriangleMesh<F> { &self.mesh }

    /// The octree built over the mesh.
    pub fn tree(&self) -> &CollisionTree<F> { &self.tree }

    /// Faces the segment `start -> end` collides with; may repeat a face.
    pub fn query(&self, start: Vec3<F>, end: Vec3<F>, cushion: F) -> AllocVec<usize> {
        self.tree.detect_collision(self.mesh.positions(), self.mesh.faces(), start, end, cushion)
    }

    /// Like [`query`](Self::query), appending to `hits`.
    pub fn query_into(&self, start: Vec3<F>, end: Vec3<F>, cushion: F, hits: &mut AllocVec<usize>) {
        self.tree
            .detect_collision_into(self.mesh.positions(), self.mesh.faces(), start, end, cushion, hits);
    }

    /// Plane of the face starting at `face`.
    pub fn plane(&self, face: usize) -> Plane<F> {
        self.mesh.plane(face)
    }
}
