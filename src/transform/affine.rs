//! Affine transform helpers.
//!
//! Matrices are `kurbo::Affine`. Coefficients `[a, b, c, d, e, f]` map `(x, y)` to
//! `(a x + c y + e, b x + d y + f)`; `z` passes through unchanged.

use crate::foundation::core::{Affine, Vec2, Vector};
use crate::foundation::error::{AnimError, AnimResult};

/// Determinants below this are treated as singular.
const SINGULAR_EPS: f64 = 1e-12;

/// `a * b`: applies `b` first.
#[inline]
pub fn compose(a: Affine, b: Affine) -> Affine {
    a * b
}

#[inline]
pub fn identity() -> Affine {
    Affine::IDENTITY
}

/// `Translate(offset) * Scale(scale) * Rotate(rotation)`.
///
/// A zero `y` scale collapses to the `x` scale, and a zero `x` scale to the `y` scale, so the
/// result is never singular unless both are zero.
pub fn affine(offset: Vector, scale: Vector, rotation: f64) -> Affine {
    let scale = normalize_scale(scale);
    Affine::translate(Vec2::new(offset.x, offset.y))
        * Affine::scale_non_uniform(scale.x, scale.y)
        * Affine::rotate(rotation)
}

/// Replace degenerate scale axes: `y == 0` takes `x`, `x == 0` takes `y`, `z == 0` becomes 1.
pub fn normalize_scale(scale: Vector) -> Vector {
    let mut s = scale;
    if s.y == 0.0 {
        s.y = s.x;
    }
    if s.x == 0.0 {
        s.x = s.y;
    }
    if s.z == 0.0 {
        s.z = 1.0;
    }
    s
}

/// Map one point, passing `z` through.
#[inline]
pub fn apply(m: Affine, v: Vector) -> Vector {
    let [a, b, c, d, e, f] = m.as_coeffs();
    Vector::new(a * v.x + c * v.y + e, b * v.x + d * v.y + f, v.z)
}

/// Map a batch of points.
pub fn apply_all(m: Affine, points: &[Vector]) -> Vec<Vector> {
    points.iter().map(|&p| apply(m, p)).collect()
}

/// Map a direction (no translation).
#[inline]
pub fn apply_linear(m: Affine, v: Vector) -> Vector {
    let [a, b, c, d, _, _] = m.as_coeffs();
    Vector::new(a * v.x + c * v.y, b * v.x + d * v.y, v.z)
}

/// Checked inverse.
pub fn try_inverse(m: Affine) -> AnimResult<Affine> {
    let det = m.determinant();
    if !det.is_finite() || det.abs() < SINGULAR_EPS {
        return Err(AnimError::construction(format!(
            "transform is not invertible (determinant {det})"
        )));
    }
    Ok(m.inverse())
}

/// Offset, scale and rotation recovered from a matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decomposed {
    pub offset: Vector,
    pub scale: Vector,
    pub rotation: f64,
}

/// Split `m` into `Translate * Scale * Rotate`.
///
/// Exact for matrices built by [`affine`]. A sheared matrix has no such factorization; the
/// result then keeps the rotation of the second row and drops the shear.
pub fn decompose(m: Affine) -> Decomposed {
    let [a, b, c, d, e, f] = m.as_coeffs();
    // Row-major view: m00 = a, m01 = c, m10 = b, m11 = d.
    let (m00, m01, m10, m11) = (a, c, b, d);
    let rotation = m10.atan2(m11);
    let sy = m10.hypot(m11);
    let sx = m00 * rotation.cos() - m01 * rotation.sin();
    Decomposed {
        offset: Vector::xy(e, f),
        scale: Vector::new(sx, sy, 1.0),
        rotation,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/affine.rs"]
mod tests;
