//! Internal-to-external coordinate frames.

use crate::foundation::core::{Affine, Vec2, Vector};
use crate::foundation::error::AnimResult;
use crate::transform::affine::{self, Decomposed};

/// Position, pivot, rotation and scale of a scene node relative to its parent.
///
/// `transform_matrix = T(position) * S(scale) * R(rotation_angle) * T(-about_point)`. The matrix
/// is cached and rebuilt by every setter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "FrameParts", into = "FrameParts")]
pub struct CoordinateFrame {
    position: Vector,
    about_point: Vector,
    rotation_angle: f64,
    scale: Vector,
    matrix: Affine,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
struct FrameParts {
    #[serde(default)]
    position: Vector,
    #[serde(default)]
    about_point: Vector,
    #[serde(default)]
    rotation_angle: f64,
    #[serde(default = "unit_scale")]
    scale: Vector,
}

fn unit_scale() -> Vector {
    Vector::ONE
}

impl From<FrameParts> for CoordinateFrame {
    fn from(p: FrameParts) -> Self {
        Self::new(p.position, p.about_point, p.rotation_angle, p.scale)
    }
}

impl From<CoordinateFrame> for FrameParts {
    fn from(f: CoordinateFrame) -> Self {
        Self {
            position: f.position,
            about_point: f.about_point,
            rotation_angle: f.rotation_angle,
            scale: f.scale,
        }
    }
}

impl Default for CoordinateFrame {
    fn default() -> Self {
        Self::new(Vector::ZERO, Vector::ZERO, 0.0, Vector::ONE)
    }
}

impl CoordinateFrame {
    pub fn new(position: Vector, about_point: Vector, rotation_angle: f64, scale: Vector) -> Self {
        let mut f = Self {
            position,
            about_point,
            rotation_angle,
            scale: affine::normalize_scale(scale),
            matrix: Affine::IDENTITY,
        };
        f.recompute();
        f
    }

    /// Frame positioned at `position` with every other component at its default.
    pub fn at(position: Vector) -> Self {
        Self::new(position, Vector::ZERO, 0.0, Vector::ONE)
    }

    pub fn position(&self) -> Vector {
        self.position
    }

    pub fn set_position(&mut self, position: Vector) {
        self.position = position;
        self.recompute();
    }

    pub fn about_point(&self) -> Vector {
        self.about_point
    }

    /// Move the pivot without moving the geometry: `position` becomes the external image of
    /// the new pivot under the current matrix.
    pub fn set_about_point(&mut self, about_point: Vector) {
        let mut new_position = affine::apply(self.matrix, about_point);
        new_position.z = self.position.z;
        self.about_point = about_point;
        self.position = new_position;
        self.recompute();
    }

    pub fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    pub fn set_rotation_angle(&mut self, angle: f64) {
        self.rotation_angle = angle;
        self.recompute();
    }

    pub fn scale(&self) -> Vector {
        self.scale
    }

    /// Degenerate axes are replaced, see [`affine::normalize_scale`].
    pub fn set_scale(&mut self, scale: Vector) {
        self.scale = affine::normalize_scale(scale);
        self.recompute();
    }

    pub fn transform_matrix(&self) -> Affine {
        self.matrix
    }

    /// Replace the frame by the decomposition of `m`; the pivot resets to the origin.
    pub fn set_transform_matrix(&mut self, m: Affine) {
        let Decomposed {
            offset,
            scale,
            rotation,
        } = affine::decompose(m);
        self.about_point = Vector::ZERO;
        self.position = Vector::new(offset.x, offset.y, self.position.z);
        self.rotation_angle = rotation;
        self.scale = affine::normalize_scale(scale);
        self.recompute();
    }

    pub fn internal_to_external(&self, points: &[Vector]) -> Vec<Vector> {
        affine::apply_all(self.matrix, points)
    }

    pub fn external_to_internal(&self, points: &[Vector]) -> AnimResult<Vec<Vector>> {
        let inv = affine::try_inverse(self.matrix)?;
        Ok(affine::apply_all(inv, points))
    }

    /// Frame equivalent to applying `inner` and then `outer`.
    ///
    /// Composition is the true matrix product, decomposed back into frame components. The
    /// inner pivot is kept, so rotating the result still turns about the same internal point.
    /// Shear from non-uniformly scaled parents with rotated children cannot be represented and
    /// is dropped.
    pub fn compose(outer: &CoordinateFrame, inner: &CoordinateFrame) -> CoordinateFrame {
        let m = outer.matrix * inner.matrix;
        let mut out = CoordinateFrame::default();
        out.set_transform_matrix(m);
        out.set_about_point(inner.about_point);
        out.position.z = outer.position.z + inner.position.z;
        out.recompute();
        out
    }

    fn recompute(&mut self) {
        self.matrix = Affine::translate(Vec2::new(self.position.x, self.position.y))
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
            * Affine::rotate(self.rotation_angle)
            * Affine::translate(Vec2::new(-self.about_point.x, -self.about_point.y));
    }
}

impl std::ops::Mul for &CoordinateFrame {
    type Output = CoordinateFrame;

    fn mul(self, rhs: &CoordinateFrame) -> CoordinateFrame {
        CoordinateFrame::compose(self, rhs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/frame.rs"]
mod tests;
