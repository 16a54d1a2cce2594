//! Springs between vertices and the spring topology of a deformable mesh.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::vec::Vec3;
use alloc::collections::BTreeSet;
use alloc::vec::Vec as AllocVec;

/// Canonical identity of an unordered vertex pair.
pub type EdgeKey = (usize, usize);

/// A Hooke spring between vertices `v0` and `v1`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge<F: Float> {
    pub v0: usize,
    pub v1: usize,
    pub rest_length: F,
    pub stiffness: F,
}

impl<F: Float> Edge<F> {
    /// Create a spring with an explicit rest length.
    pub fn new(v0: usize, v1: usize, rest_length: F, stiffness: F) -> Self {
        Edge { v0, v1, rest_length, stiffness }
    }

    /// Spring whose rest length is the current distance between its ends.
    pub fn from_positions(v0: usize, v1: usize, positions: &[Vec3<F>], stiffness: F) -> Self {
        let rest_length = positions[v0].distance(positions[v1]);
        Edge { v0, v1, rest_length, stiffness }
    }

    /// `(min, max)` of the two vertex indices.
    pub fn key(&self) -> EdgeKey {
        edge_key(self.v0, self.v1)
    }

    /// Signed force magnitude `k * (length - rest)`: positive when stretched.
    pub fn tension(&self, a: Vec3<F>, b: Vec3<F>) -> F {
        self.stiffness * (a.distance(b) - self.rest_length)
    }

    /// Force on `v0` when it sits at `a` and `v1` at `b`. The force on `v1`
    /// is the negation.
    pub fn force(&self, a: Vec3<F>, b: Vec3<F>) -> Vec3<F> {
        let delta = b - a;
        let length = delta.length();
        if length.is_near_zero(F::from_f32(1e-10)) {
            return Vec3::zero();
        }
        delta.scale(self.stiffness * (length - self.rest_length) / length)
    }
}

/// Canonical `(min, max)` key of the pair `a`, `b`.
pub fn edge_key(a: usize, b: usize) -> EdgeKey {
    if a < b { (a, b) } else { (b, a) }
}

/// The springs of one deformable body, unique per unordered vertex pair.
#[derive(Clone, Debug, Default)]
pub struct EdgeSet<F: Float> {
    edges: AllocVec<Edge<F>>,
    keys: BTreeSet<EdgeKey>,
    support_count: usize,
}

impl<F: Float> EdgeSet<F> {
    /// Create an empty topology.
    pub fn new() -> Self {
        EdgeSet { edges: AllocVec::new(), keys: BTreeSet::new(), support_count: 0 }
    }

    /// Spring topology of a triangle mesh.
    ///
    /// Every triangle side becomes a spring (shared sides once). With
    /// `support_modulus = Some(m)`, each ordered vertex pair `(i, j)` with
    /// `i != j` and `j % m == 0` that is not yet connected gets an extra
    /// support spring through the body's interior. Rest lengths are the
    /// distances in `positions`.
    pub fn from_faces(
        positions: &[Vec3<F>],
        faces: &[usize],
        stiffness: F,
        support_modulus: Option<usize>,
    ) -> Result<Self, PhysicsError> {
        if !(stiffness >= F::zero() && stiffness.is_finite()) {
            return Err(PhysicsError::InvalidStiffness);
        }
        if faces.len() % 3 != 0 {
            return Err(PhysicsError::MalformedFaceList { len: faces.len() });
        }
        let count = positions.len();
        if let Some(&index) = faces.iter().find(|&&i| i >= count) {
            return Err(PhysicsError::VertexOutOfBounds { index, count });
        }

        let mut set = Self::new();
        for tri in faces.chunks_exact(3) {
            let (a, b, c) = (tri[0], tri[1], tri[2]);
            set.insert(Edge::from_positions(a, b, positions, stiffness));
            set.insert(Edge::from_positions(a, c, positions, stiffness));
            set.insert(Edge::from_positions(b, c, positions, stiffness));
        }
        let face_springs = set.len();

        if let Some(modulus) = support_modulus {
            if modulus == 0 {
                return Err(PhysicsError::InvalidSupportModulus);
            }
            for i in 0..count {
                for j in (0..count).step_by(modulus) {
                    if i != j && set.insert(Edge::from_positions(i, j, positions, stiffness)) {
                        set.support_count += 1;
                    }
                }
            }
        }

        tracing::debug!(
            vertices = count,
            face_springs,
            support_springs = set.support_count,
            "built spring topology"
        );
        Ok(set)
    }

    /// Add `edge` unless its vertex pair is already connected. Returns whether
    /// it was added.
    pub fn insert(&mut self, edge: Edge<F>) -> bool {
        if self.keys.insert(edge.key()) {
            self.edges.push(edge);
            true
        } else {
            false
        }
    }

    /// Whether `a` and `b` are already joined, in either order.
    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.keys.contains(&edge_key(a, b))
    }

    /// All springs, in insertion order.
    pub fn edges(&self) -> &[Edge<F>] { &self.edges }

    /// Number of springs.
    pub fn len(&self) -> usize { self.edges.len() }

    /// True when there are no springs.
    pub fn is_empty(&self) -> bool { self.edges.is_empty() }

    /// Springs added by the support pass.
    pub fn support_count(&self) -> usize { self.support_count }
}
