//! Octree over a static triangle mesh for segment collision queries.
//!
//! The tree stores face-start indices only; callers pass the same vertex
//! positions and face list to [`CollisionTree::detect_collision`] that the tree
//! was built from.

use crate::bounds::Aabb;
use crate::float::Float;
use crate::intersect::hit;
use crate::mesh::triangle;
use crate::plane::Plane;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Recursion limit applied by [`CollisionTree::build`].
pub const DEFAULT_MAX_DEPTH: usize = 12;

/// One node of the octree.
#[derive(Clone, Debug)]
pub struct Node<F: Float> {
    bounds: Aabb<F>,
    faces: AllocVec<usize>,
    children: AllocVec<Node<F>>,
}

impl<F: Float> Node<F> {
    /// Box covering this node's part of space.
    pub fn bounds(&self) -> &Aabb<F> { &self.bounds }

    /// Face-start indices kept at this node rather than pushed to a child.
    pub fn faces(&self) -> &[usize] { &self.faces }

    /// Non-empty octants, ordered by key `k * 4 + j * 2 + i`.
    pub fn children(&self) -> &[Node<F>] { &self.children }

    /// True when the node has no children.
    pub fn is_leaf(&self) -> bool { self.children.is_empty() }

    fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    fn depth(&self) -> usize {
        self.children.iter().map(|c| c.depth() + 1).max().unwrap_or(0)
    }

    fn face_references(&self) -> usize {
        self.faces.len() + self.children.iter().map(Node::face_references).sum::<usize>()
    }
}

/// Faces collected for one octant while partitioning a node.
struct OctantBuilder<F: Float> {
    bounds: Aabb<F>,
    faces: AllocVec<usize>,
}

struct Builder<'a, F: Float> {
    vertices: &'a [Vec3<F>],
    faces: &'a [usize],
    max_depth: usize,
    truncated: usize,
}

impl<'a, F: Float> Builder<'a, F> {
    fn node(&mut self, bounds: Aabb<F>, face_starts: AllocVec<usize>, depth: usize) -> Node<F> {
        if face_starts.len() == 1 {
            return Node { bounds, faces: face_starts, children: AllocVec::new() };
        }
        if depth >= self.max_depth {
            self.truncated += 1;
            return Node { bounds, faces: face_starts, children: AllocVec::new() };
        }

        let mut octants: [Option<OctantBuilder<F>>; 8] = Default::default();
        let mut retained = AllocVec::new();

        for face in face_starts {
            let [p0, p1, p2] = triangle(self.vertices, self.faces, face);
            let mut assigned = false;
            for k in 0..2 {
                for j in 0..2 {
                    for i in 0..2 {
                        let octant = bounds.octant(i, j, k);
                        if octant.contains(p0) && octant.contains(p1) && octant.contains(p2) {
                            assigned = true;
                            octants[k * 4 + j * 2 + i]
                                .get_or_insert_with(|| OctantBuilder { bounds: octant, faces: AllocVec::new() })
                                .faces
                                .push(face);
                        }
                    }
                }
            }
            if !assigned {
                retained.push(face);
            }
        }

        let children = octants
            .into_iter()
            .flatten()
            .map(|octant| self.node(octant.bounds, octant.faces, depth + 1))
            .collect();

        Node { bounds, faces: retained, children }
    }
}

/// Spatial partition index over a static triangle mesh.
///
/// Built once, immutable afterwards; safe to query from several threads.
#[derive(Clone, Debug)]
pub struct CollisionTree<F: Float> {
    root: Node<F>,
    max_depth: usize,
}

impl<F: Float> CollisionTree<F> {
    /// Build with [`DEFAULT_MAX_DEPTH`].
    pub fn build(vertices: &[Vec3<F>], faces: &[usize]) -> Self {
        Self::build_with_max_depth(vertices, faces, DEFAULT_MAX_DEPTH)
    }

    /// Build the tree for `faces` (a flat triangle index list into `vertices`).
    ///
    /// The root box spans every vertex in `vertices`, referenced or not. Each
    /// node splits its box into 8 octants; a triangle moves down into every
    /// octant that contains all three corners (several, when it lies on a
    /// shared boundary) and stays at the node when no octant takes it. A node
    /// given a single triangle is a leaf. A node at `max_depth` keeps all of
    /// its triangles as a flat list.
    ///
    /// A mesh flat along one axis (a floor, a wall) has zero-thickness boxes
    /// along that axis, so both halves take every triangle at every level:
    /// node and face-reference counts grow as `2^depth` over the in-plane
    /// split, and queries repeat faces accordingly.
    pub fn build_with_max_depth(vertices: &[Vec3<F>], faces: &[usize], max_depth: usize) -> Self {
        debug_assert!(faces.len() % 3 == 0, "face list must hold whole triangles");
        let bounds = Aabb::from_points(vertices.iter().copied())
            .unwrap_or_else(|| Aabb::new(Vec3::zero(), Vec3::zero()));
        let face_starts: AllocVec<usize> = (0..faces.len()).step_by(3).collect();

        let mut builder = Builder { vertices, faces, max_depth, truncated: 0 };
        let root = builder.node(bounds, face_starts, 0);
        let tree = CollisionTree { root, max_depth };

        if builder.truncated > 0 {
            tracing::warn!(
                nodes = builder.truncated,
                max_depth,
                "collision tree hit its depth limit; keeping flat face lists"
            );
        }
        tracing::debug!(
            faces = faces.len() / 3,
            nodes = tree.node_count(),
            depth = tree.depth(),
            face_references = tree.face_reference_count(),
            "built collision tree"
        );
        tree
    }

    /// Top node; its box spans every vertex.
    pub fn root(&self) -> &Node<F> { &self.root }

    /// Depth limit the tree was built with.
    pub fn max_depth(&self) -> usize { self.max_depth }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize { self.root.count() }

    /// Length of the longest root-to-leaf path; 0 for a lone root.
    pub fn depth(&self) -> usize { self.root.depth() }

    /// Face entries summed over all nodes. Exceeds the face count when
    /// boundary triangles were copied into several octants.
    pub fn face_reference_count(&self) -> usize { self.root.face_references() }

    /// Face-start indices of every triangle the segment `start -> end` collides
    /// with, within `cushion`. May contain duplicates.
    pub fn detect_collision(
        &self,
        vertices: &[Vec3<F>],
        faces: &[usize],
        start: Vec3<F>,
        end: Vec3<F>,
        cushion: F,
    ) -> AllocVec<usize> {
        let mut hits = AllocVec::new();
        self.detect_collision_into(vertices, faces, start, end, cushion, &mut hits);
        hits
    }

    /// Like [`detect_collision`](Self::detect_collision), appending to `hits`.
    ///
    /// A face matches when either
    /// - the segment, shifted by `-normal * cushion`, passes through the
    ///   triangle (the segment crosses the surface offset by the cushion), or
    /// - `end` lies over the triangle, on its front side, closer than `cushion`
    ///   (resting contact).
    ///
    /// Children are visited when their box, grown by `cushion`, holds `start`
    /// or `end`.
    pub fn detect_collision_into(
        &self,
        vertices: &[Vec3<F>],
        faces: &[usize],
        start: Vec3<F>,
        end: Vec3<F>,
        cushion: F,
        hits: &mut AllocVec<usize>,
    ) {
        let query = Query {
            vertices,
            faces,
            start,
            end,
            cushion,
            direction: (end - start).normalize(),
            reach: start.distance(end),
        };
        query.visit(&self.root, hits);
    }
}

struct Query<'a, F: Float> {
    vertices: &'a [Vec3<F>],
    faces: &'a [usize],
    start: Vec3<F>,
    end: Vec3<F>,
    cushion: F,
    direction: Vec3<F>,
    reach: F,
}

impl<'a, F: Float> Query<'a, F> {
    fn visit(&self, node: &Node<F>, hits: &mut AllocVec<usize>) {
        for &face in &node.faces {
            if self.collides(face) {
                hits.push(face);
            }
        }

        for child in &node.children {
            let grown = child.bounds.inflate(self.cushion);
            if grown.contains(self.start) || grown.contains(self.end) {
                self.visit(child, hits);
            }
        }
    }

    fn collides(&self, face: usize) -> bool {
        let [p0, p1, p2] = triangle(self.vertices, self.faces, face);
        let plane = Plane::from_triangle(p0, p1, p2);
        let normal = plane.normal();

        // Ray from the shifted end point back along the path; t in [-reach, 0]
        // spans the whole shifted segment.
        let origin = self.end - normal.scale(self.cushion);
        if hit(origin, self.direction, p0, p1, p2, -self.reach, F::zero()) {
            return true;
        }

        let distance = plane.distance_to(self.end);
        let wide = F::max_value();
        distance >= F::zero()
            && distance < self.cushion
            && hit(self.end, normal, p0, p1, p2, -wide, wide)
    }
}
