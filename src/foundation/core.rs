use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::foundation::error::{AnimError, AnimResult};

pub use kurbo::{Affine, BezPath, Point, Vec2};

/// Three component vector in scene units.
///
/// Scene geometry is planar, `z` is carried through every 2-D transform untouched. The
/// spherical view (`r`, `theta`, `phi`) is derived on read and writing one of its components
/// re-derives the cartesian triple while holding the other two fixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vector {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component (y-up).
    pub y: f64,
    /// Depth component.
    #[serde(default)]
    pub z: f64,
}

impl Vector {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Unit scale on every axis.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Build from all three components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Build a planar vector with `z = 0`.
    pub const fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Build from one to three components, padding missing ones with zero.
    pub fn from_slice(components: &[f64]) -> AnimResult<Self> {
        if components.len() > 3 {
            return Err(AnimError::construction(format!(
                "vector takes at most 3 components, got {}",
                components.len()
            )));
        }
        let c = |i: usize| components.get(i).copied().unwrap_or(0.0);
        Ok(Self::new(c(0), c(1), c(2)))
    }

    /// Build from spherical components: `theta` is the azimuth in the xy plane, `phi` the
    /// inclination from +z.
    pub fn from_spherical(r: f64, theta: f64, phi: f64) -> Self {
        Self::new(
            r * theta.cos() * phi.sin(),
            r * theta.sin() * phi.sin(),
            r * phi.cos(),
        )
    }

    /// Planar polar form (`phi = pi/2`).
    pub fn from_polar(r: f64, theta: f64) -> Self {
        Self::from_spherical(r, theta, std::f64::consts::FRAC_PI_2)
    }

    /// Radial distance from the origin.
    pub fn r(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Azimuthal angle in the xy plane.
    pub fn theta(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Inclination from the +z axis; `pi/2` for the zero vector.
    pub fn phi(self) -> f64 {
        let r = self.r();
        if r == 0.0 {
            std::f64::consts::FRAC_PI_2
        } else {
            (self.z / r).clamp(-1.0, 1.0).acos()
        }
    }

    pub fn set_r(&mut self, r: f64) {
        *self = Self::from_spherical(r, self.theta(), self.phi());
    }

    pub fn set_theta(&mut self, theta: f64) {
        *self = Self::from_spherical(self.r(), theta, self.phi());
    }

    pub fn set_phi(&mut self, phi: f64) {
        *self = Self::from_spherical(self.r(), self.theta(), phi);
    }

    /// Euclidean length, alias of [`Vector::r`].
    pub fn mag(self) -> f64 {
        self.r()
    }

    /// Same direction, new length.
    pub fn with_mag(self, mag: f64) -> Self {
        let m = self.mag();
        if m == 0.0 { self } else { self * (mag / m) }
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    pub fn unit(self) -> Self {
        self.with_mag(1.0)
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f64 {
        (self - other).mag()
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }

    /// Component-wise product.
    pub fn mul_elem(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    pub fn min_elem(self, other: Self) -> Self {
        Self::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    pub fn max_elem(self, other: Self) -> Self {
        Self::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }

    /// Component by axis index (0, 1, 2).
    pub fn axis(self, axis: usize) -> AnimResult<f64> {
        match axis {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            other => Err(AnimError::construction(format!(
                "axis index {other} out of range 0..3"
            ))),
        }
    }

    /// Approximate equality with an absolute tolerance per component.
    pub fn approx_eq(self, other: Self, tol: f64) -> bool {
        (self.x - other.x).abs() <= tol
            && (self.y - other.y).abs() <= tol
            && (self.z - other.z).abs() <= tol
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 2]> for Vector {
    fn from(v: [f64; 2]) -> Self {
        Self::xy(v[0], v[1])
    }
}

impl From<[f64; 3]> for Vector {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<(f64, f64)> for Vector {
    fn from((x, y): (f64, f64)) -> Self {
        Self::xy(x, y)
    }
}

impl From<Point> for Vector {
    fn from(p: Point) -> Self {
        Self::xy(p.x, p.y)
    }
}

impl From<Vec2> for Vector {
    fn from(v: Vec2) -> Self {
        Self::xy(v.x, v.y)
    }
}

impl Add for Vector {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Vector {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vector {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;
    fn mul(self, rhs: Vector) -> Vector {
        rhs * self
    }
}

impl Mul for Vector {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.mul_elem(rhs)
    }
}

impl Div<f64> for Vector {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

/// Axis-aligned box stored as lower-left and upper-right corners.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    pub min: Vector,
    pub max: Vector,
}

impl BoundingBox {
    /// The degenerate box at the origin, reported for empty geometry.
    pub const ZERO: Self = Self {
        min: Vector::ZERO,
        max: Vector::ZERO,
    };

    pub fn new(min: Vector, max: Vector) -> Self {
        Self {
            min: min.min_elem(max),
            max: min.max_elem(max),
        }
    }

    /// Tightest box around `points`; `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vector>) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        Some(it.fold(Self::new(first, first), |b, p| b.including(p)))
    }

    pub fn including(self, p: Vector) -> Self {
        Self {
            min: self.min.min_elem(p),
            max: self.max.max_elem(p),
        }
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min_elem(other.min),
            max: self.max.max_elem(other.max),
        }
    }

    pub fn width(self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(self) -> Vector {
        (self.min + self.max) * 0.5
    }

    /// The four planar corners, counter-clockwise from lower-left.
    pub fn corners(self) -> [Vector; 4] {
        [
            Vector::new(self.min.x, self.min.y, self.min.z),
            Vector::new(self.max.x, self.min.y, self.min.z),
            Vector::new(self.max.x, self.max.y, self.max.z),
            Vector::new(self.min.x, self.max.y, self.max.z),
        ]
    }

    /// Box around this box's corners after mapping them through `m`.
    pub fn transformed(self, m: Affine) -> Self {
        let corners = self.corners().map(|c| crate::transform::affine::apply(m, c));
        corners
            .into_iter()
            .skip(1)
            .fold(Self::new(corners[0], corners[0]), |b, p| b.including(p))
    }

    pub fn contains(self, p: Vector) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
