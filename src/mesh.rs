//! Validated triangle meshes and primitive builders.

use crate::bounds::Aabb;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::plane::Plane;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Vertex positions plus a flat triangle index list.
///
/// Entries `f`, `f + 1`, `f + 2` of `faces` form one triangle; `f` (a multiple
/// of 3) is the triangle's *face-start index* and identifies it everywhere in
/// this crate.
#[derive(Clone, Debug, PartialEq)]
pub struct TriangleMesh<F: Float> {
    positions: AllocVec<Vec3<F>>,
    faces: AllocVec<usize>,
}

impl<F: Float> TriangleMesh<F> {
    /// Build a mesh, checking that `faces` holds whole triangles and only
    /// references existing vertices.
    pub fn new(positions: AllocVec<Vec3<F>>, faces: AllocVec<usize>) -> Result<Self, PhysicsError> {
        if faces.len() % 3 != 0 {
            return Err(PhysicsError::MalformedFaceList { len: faces.len() });
        }
        let count = positions.len();
        if let Some(&index) = faces.iter().find(|&&i| i >= count) {
            return Err(PhysicsError::VertexOutOfBounds { index, count });
        }
        Ok(TriangleMesh { positions, faces })
    }

    /// A mesh with no vertices and no faces.
    pub fn empty() -> Self {
        TriangleMesh { positions: AllocVec::new(), faces: AllocVec::new() }
    }

    /// Flat floor of `cols x rows` square cells in the XZ plane at height
    /// `origin.y`, extending in +X and +Z, every triangle facing +Y.
    ///
    /// Vertex at (col, row) has index `row * (cols + 1) + col`.
    pub fn grid(origin: Vec3<F>, cols: usize, rows: usize, spacing: F) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let stride = cols + 1;
        let mut positions = AllocVec::with_capacity(stride * (rows + 1));
        for row in 0..=rows {
            for col in 0..=cols {
                let x = origin.x + F::from_f32(col as f32) * spacing;
                let z = origin.z + F::from_f32(row as f32) * spacing;
                positions.push(Vec3::new(x, origin.y, z));
            }
        }

        let mut faces = AllocVec::with_capacity(cols * rows * 6);
        for row in 0..rows {
            for col in 0..cols {
                let a = row * stride + col;
                let b = a + 1;
                let c = a + stride;
                let d = c + 1;
                faces.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        TriangleMesh { positions, faces }
    }

    /// Closed box of 8 vertices and 12 outward-facing triangles.
    ///
    /// Corner `i` sits at `center +/- half_extents`, taking the + side on x,
    /// y and z when bit 0, 1 and 2 of `i` are set.
    pub fn cuboid(center: Vec3<F>, half_extents: Vec3<F>) -> Self {
        let mut positions = AllocVec::with_capacity(8);
        for i in 0..8usize {
            let sx = if i & 1 != 0 { half_extents.x } else { -half_extents.x };
            let sy = if i & 2 != 0 { half_extents.y } else { -half_extents.y };
            let sz = if i & 4 != 0 { half_extents.z } else { -half_extents.z };
            positions.push(center + Vec3::new(sx, sy, sz));
        }

        // Quads wound counter-clockwise seen from outside.
        const QUADS: [[usize; 4]; 6] = [
            [1, 3, 7, 5], // +x
            [0, 4, 6, 2], // -x
            [2, 6, 7, 3], // +y
            [0, 1, 5, 4], // -y
            [4, 5, 7, 6], // +z
            [0, 2, 3, 1], // -z
        ];
        let mut faces = AllocVec::with_capacity(36);
        for [a, b, c, d] in QUADS {
            faces.extend_from_slice(&[a, b, c, a, c, d]);
        }

        TriangleMesh { positions, faces }
    }

    /// Vertex positions.
    pub fn positions(&self) -> &[Vec3<F>] { &self.positions }

    /// Flat triangle index list.
    pub fn faces(&self) -> &[usize] { &self.faces }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize { self.positions.len() }

    /// Number of triangles.
    pub fn face_count(&self) -> usize { self.faces.len() / 3 }

    /// True when the mesh has no triangles.
    pub fn is_empty(&self) -> bool { self.faces.is_empty() }

    /// Face-start indices: 0, 3, 6, ...
    pub fn face_starts(&self) -> impl Iterator<Item = usize> {
        (0..self.faces.len()).step_by(3)
    }

    /// Corner positions of the face starting at `face`.
    pub fn triangle(&self, face: usize) -> [Vec3<F>; 3] {
        triangle(&self.positions, &self.faces, face)
    }

    /// Plane of the face starting at `face`.
    pub fn plane(&self, face: usize) -> Plane<F> {
        let [p0, p1, p2] = self.triangle(face);
        Plane::from_triangle(p0, p1, p2)
    }

    /// Bounding box of all vertices, `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<Aabb<F>> {
        Aabb::from_points(self.positions.iter().copied())
    }

    /// One unit normal per entry of the face list (flat shading: the three
    /// corners of a triangle share its plane normal).
    pub fn face_normals(&self) -> AllocVec<Vec3<F>> {
        face_normals(&self.positions, &self.faces)
    }
}

/// Corner positions of the face starting at `face` in a flat index list.
pub(crate) fn triangle<F: Float>(positions: &[Vec3<F>], faces: &[usize], face: usize) -> [Vec3<F>; 3] {
    [
        positions[faces[face]],
        positions[faces[face + 1]],
        positions[faces[face + 2]],
    ]
}

/// Per-corner flat normals for an arbitrary position/face pair, used for
/// deforming bodies whose positions change every frame.
pub fn face_normals<F: Float>(positions: &[Vec3<F>], faces: &[usize]) -> AllocVec<Vec3<F>> {
    let mut normals = AllocVec::with_capacity(faces.len());
    for face in (0..faces.len()).step_by(3) {
        let [p0, p1, p2] = triangle(positions, faces, face);
        let n = (p1 - p0).cross(p2 - p0).normalize();
        normals.extend_from_slice(&[n, n, n]);
    }
    normals
}
