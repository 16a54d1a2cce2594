//! Ray/triangle intersection by Cramer's rule.

use crate::float::Float;
use crate::vec::Vec3;

/// Slack added to `tmax`, in mesh units, so hits landing exactly on a segment
/// endpoint survive rounding.
pub const HIT_FORGIVENESS: f32 = 0.01;

/// Whether the ray `origin + t * direction` meets triangle `(p0, p1, p2)` with
/// `tmin <= t <= tmax + HIT_FORGIVENESS`.
///
/// Solves `t*D + a*(p2 - p0) + b*(p2 - p1) = p2 - O` for `t` and the
/// barycentric weights `a` (of `p0`) and `b` (of `p1`); the weight of `p2` is
/// `1 - a - b`. All four determinants share the `(p2 - p0) x (p2 - p1)` term
/// or one cross product with the right-hand side.
///
/// A zero determinant (ray parallel to the triangle, zero direction, or a
/// degenerate triangle) is reported as no hit.
pub fn hit<F: Float>(
    origin: Vec3<F>,
    direction: Vec3<F>,
    p0: Vec3<F>,
    p1: Vec3<F>,
    p2: Vec3<F>,
    tmin: F,
    tmax: F,
) -> bool {
    let e0 = p2 - p0;
    let e1 = p2 - p1;
    let rhs = p2 - origin;

    let shared = e0.cross(e1);
    let det = direction.dot(shared);
    if det == F::zero() {
        return false;
    }

    let t = rhs.dot(shared) / det;
    let alpha = direction.dot(rhs.cross(e1)) / det;
    let beta = direction.dot(e0.cross(rhs)) / det;

    if !(alpha >= F::zero() && beta >= F::zero() && alpha + beta <= F::one()) {
        return false;
    }

    t >= tmin && t <= tmax + F::from_f32(HIT_FORGIVENESS)
}
