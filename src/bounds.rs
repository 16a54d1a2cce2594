//! Axis-aligned bounding boxes and their octant subdivision.

use crate::float::Float;
use crate::vec::Vec3;

/// Axis-aligned bounding box with inclusive bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb<F: Float> {
    /// Minimum corner.
    pub min: Vec3<F>,
    /// Maximum corner.
    pub max: Vec3<F>,
}

impl<F: Float> Aabb<F> {
    /// Create a box from two corners, reordering components as needed.
    pub fn new(a: Vec3<F>, b: Vec3<F>) -> Self {
        Aabb { min: a.min(b), max: a.max(b) }
    }

    /// Smallest box containing every point, or `None` for an empty set.
    pub fn from_points<I: IntoIterator<Item = Vec3<F>>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Aabb { min, max })
    }

    /// Center of the box.
    pub fn center(&self) -> Vec3<F> {
        (self.min + self.max).scale(F::half())
    }

    /// Edge lengths along each axis.
    pub fn extent(&self) -> Vec3<F> {
        self.max - self.min
    }

    /// Product of the edge lengths.
    pub fn volume(&self) -> F {
        let e = self.extent();
        e.x * e.y * e.z
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Vec3<F>) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Box grown by `margin` on every side.
    pub fn inflate(&self, margin: F) -> Self {
        let m = Vec3::splat(margin);
        Aabb { min: self.min - m, max: self.max + m }
    }

    /// The octant at coordinate `(i, j, k)`, each 0 (low half) or 1 (high half)
    /// along x, y and z.
    ///
    /// Octants split at the exact center so the eight of them tile the box:
    /// neighbours share their boundary coordinate bit for bit.
    pub fn octant(&self, i: usize, j: usize, k: usize) -> Self {
        debug_assert!(i < 2 && j < 2 && k < 2, "octant coordinate out of range");
        let c = self.center();
        let pick = |bit: usize, lo: F, mid: F, hi: F| if bit == 0 { (lo, mid) } else { (mid, hi) };
        let (x0, x1) = pick(i, self.min.x, c.x, self.max.x);
        let (y0, y1) = pick(j, self.min.y, c.y, self.max.y);
        let (z0, z1) = pick(k, self.min.z, c.z, self.max.z);
        Aabb { min: Vec3::new(x0, y0, z0), max: Vec3::new(x1, y1, z1) }
    }
}
