//! Planes derived from triangles, used for contact normals and penetration depth.

use crate::float::Float;
use crate::vec::Vec3;

/// An infinite plane through `point` with unit `normal`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane<F: Float> {
    point: Vec3<F>,
    normal: Vec3<F>,
}

impl<F: Float> Plane<F> {
    /// Plane through `point`; `normal` is normalized.
    pub fn new(point: Vec3<F>, normal: Vec3<F>) -> Self {
        Plane { point, normal: normal.normalize() }
    }

    /// Plane of a triangle, normal `normalize((p1 - p0) x (p2 - p0))`.
    ///
    /// Collinear points give a zero normal, so every distance is zero and no
    /// ray can hit the triangle.
    pub fn from_triangle(p0: Vec3<F>, p1: Vec3<F>, p2: Vec3<F>) -> Self {
        let normal = (p1 - p0).cross(p2 - p0).normalize();
        Plane { point: p0, normal }
    }

    /// A point on the plane.
    pub fn point(&self) -> Vec3<F> { self.point }

    /// Unit normal; zero for a degenerate triangle.
    pub fn normal(&self) -> Vec3<F> { self.normal }

    /// Signed distance from the plane; positive on the normal's side.
    pub fn distance_to(&self, p: Vec3<F>) -> F {
        (p - self.point).dot(self.normal)
    }

    /// Displacement that moves `p` onto the plane along the normal.
    pub fn vector_to(&self, p: Vec3<F>) -> Vec3<F> {
        -self.normal.scale(self.distance_to(p))
    }

    /// `p` projected onto the plane.
    pub fn project(&self, p: Vec3<F>) -> Vec3<F> {
        p + self.vector_to(p)
    }
}
