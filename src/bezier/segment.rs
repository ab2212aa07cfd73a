//! Single cubic Bezier segments.

use std::sync::{Arc, OnceLock};

use crate::foundation::core::{Affine, BoundingBox, Vector};
use crate::foundation::error::{AnimError, AnimResult};
use crate::foundation::math::real_roots_quadratic;
use crate::foundation::search::{GoldenSection, bisect_root};
use crate::transform::affine;

/// Default resolution of the arc-length table.
pub const DEFAULT_ARC_SAMPLES: usize = 30_000;

/// Bisection steps used by [`BezierSegment::solve_param`].
const SOLVE_ITERATIONS: usize = 50;

/// Cubic Bezier curve `B(t) = sum_i bernstein_i(t) p_i` for `t` in `[0, 1]`.
///
/// The arc-length table is sampled lazily on first use and shared between clones.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(from = "[Vector; 4]", into = "[Vector; 4]")]
pub struct BezierSegment {
    points: [Vector; 4],
    samples: usize,
    distances: OnceLock<Arc<[f64]>>,
}

impl From<[Vector; 4]> for BezierSegment {
    fn from(points: [Vector; 4]) -> Self {
        Self::from_array(points)
    }
}

impl From<BezierSegment> for [Vector; 4] {
    fn from(seg: BezierSegment) -> Self {
        seg.points
    }
}

impl PartialEq for BezierSegment {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

fn check_param(t: f64) -> AnimResult<()> {
    if (0.0..=1.0).contains(&t) {
        Ok(())
    } else {
        Err(AnimError::bounds(format!(
            "bezier parameter t = {t} outside [0, 1]"
        )))
    }
}

impl BezierSegment {
    pub fn new(p0: Vector, p1: Vector, p2: Vector, p3: Vector) -> Self {
        Self::from_array([p0, p1, p2, p3])
    }

    pub fn from_array(points: [Vector; 4]) -> Self {
        Self {
            points,
            samples: DEFAULT_ARC_SAMPLES,
            distances: OnceLock::new(),
        }
    }

    /// Straight segment with both inner control points at the midpoint.
    pub fn line(from: Vector, to: Vector) -> Self {
        let mid = (from + to) * 0.5;
        Self::new(from, mid, mid, to)
    }

    /// Build from exactly four control points.
    pub fn from_slice(points: &[Vector]) -> AnimResult<Self> {
        let arr: [Vector; 4] = points.try_into().map_err(|_| {
            AnimError::construction(format!(
                "a cubic segment needs 4 control points, got {}",
                points.len()
            ))
        })?;
        Ok(Self::from_array(arr))
    }

    /// Use `samples` points for the arc-length table (at least 2).
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.set_samples(samples);
        self
    }

    pub fn set_samples(&mut self, samples: usize) {
        let samples = samples.max(2);
        if samples != self.samples {
            self.samples = samples;
            self.distances = OnceLock::new();
        }
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn points(&self) -> &[Vector; 4] {
        &self.points
    }

    pub fn p0(&self) -> Vector {
        self.points[0]
    }

    pub fn p1(&self) -> Vector {
        self.points[1]
    }

    pub fn p2(&self) -> Vector {
        self.points[2]
    }

    pub fn p3(&self) -> Vector {
        self.points[3]
    }

    /// Point at `t`; [`AnimError::Bounds`] outside `[0, 1]`.
    pub fn eval(&self, t: f64) -> AnimResult<Vector> {
        check_param(t)?;
        Ok(self.eval_unchecked(t))
    }

    /// First derivative `dB/dt`.
    pub fn deriv(&self, t: f64) -> AnimResult<Vector> {
        check_param(t)?;
        Ok(self.deriv_unchecked(t))
    }

    /// Second derivative `d2B/dt2`.
    pub fn deriv2(&self, t: f64) -> AnimResult<Vector> {
        check_param(t)?;
        let [p0, p1, p2, p3] = self.points;
        Ok((p2 - p1 * 2.0 + p0) * (6.0 * (1.0 - t)) + (p3 - p2 * 2.0 + p1) * (6.0 * t))
    }

    pub(crate) fn eval_unchecked(&self, t: f64) -> Vector {
        let [p0, p1, p2, p3] = self.points;
        let u = 1.0 - t;
        p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
    }

    fn deriv_unchecked(&self, t: f64) -> Vector {
        let [p0, p1, p2, p3] = self.points;
        let u = 1.0 - t;
        (p1 - p0) * (3.0 * u * u) + (p2 - p1) * (6.0 * u * t) + (p3 - p2) * (3.0 * t * t)
    }

    /// De Casteljau split at `t` into `[0, t]` and `[t, 1]`.
    pub fn split(&self, t: f64) -> AnimResult<(Self, Self)> {
        check_param(t)?;
        let [p0, p1, p2, p3] = self.points;
        let a = p0.lerp(p1, t);
        let b = p1.lerp(p2, t);
        let c = p2.lerp(p3, t);
        let d = a.lerp(b, t);
        let e = b.lerp(c, t);
        let f = d.lerp(e, t);
        let left = Self::new(p0, a, d, f).with_samples(self.samples);
        let right = Self::new(f, e, c, p3).with_samples(self.samples);
        Ok((left, right))
    }

    /// Tight box from the endpoints and the real roots of `dB/dt` in `[0, 1]`.
    pub fn bounding_box(&self) -> BoundingBox {
        let [p0, p1, p2, p3] = self.points;
        // dB/dt / 3 = a t^2 + b t + c per axis.
        let a = p0 * -3.0 + p1 * 9.0 + p2 * -9.0 + p3 * 3.0;
        let b = p0 * 6.0 + p1 * -12.0 + p2 * 6.0;
        let c = p0 * -3.0 + p1 * 3.0;

        let mut box_ = BoundingBox::new(p0, p3);
        for axis in 0..3 {
            let (a, b, c) = match axis {
                0 => (a.x, b.x, c.x),
                1 => (a.y, b.y, c.y),
                _ => (a.z, b.z, c.z),
            };
            for t in real_roots_quadratic(a, b, c) {
                if (0.0..=1.0).contains(&t) {
                    box_ = box_.including(self.eval_unchecked(t));
                }
            }
        }
        box_
    }

    /// Cumulative distance at `samples` evenly spaced parameters.
    pub fn distances(&self) -> &[f64] {
        self.distances.get_or_init(|| {
            let n = self.samples.max(2);
            let step = 1.0 / (n - 1) as f64;
            let mut out = Vec::with_capacity(n);
            let mut acc = 0.0;
            let mut prev = self.points[0];
            out.push(0.0);
            for i in 1..n {
                let p = self.eval_unchecked((i as f64 * step).min(1.0));
                acc += p.distance(prev);
                out.push(acc);
                prev = p;
            }
            Arc::from(out)
        })
    }

    pub fn arc_length(&self) -> f64 {
        self.distances().last().copied().unwrap_or(0.0)
    }

    /// Parameter at proportional arc distance `d`.
    ///
    /// Returns the first sample whose proportional distance is at least `d`, or 1 when none is;
    /// the error is bounded by `arc_length / samples`.
    pub fn param_at_distance(&self, d: f64) -> f64 {
        let table = self.distances();
        let total = self.arc_length();
        if total <= 0.0 {
            return d.clamp(0.0, 1.0);
        }
        let idx = table.partition_point(|&x| x / total < d);
        if idx < table.len() {
            idx as f64 / (table.len() - 1) as f64
        } else {
            1.0
        }
    }

    /// Point at proportional arc distance `d`.
    pub fn point_at_distance(&self, d: f64) -> Vector {
        self.eval_unchecked(self.param_at_distance(d))
    }

    /// Tangent (first derivative) at proportional arc distance `d`.
    pub fn tangent_at_distance(&self, d: f64) -> Vector {
        self.deriv_unchecked(self.param_at_distance(d))
    }

    /// Parameter where coordinate `axis` equals `value`, by bisection.
    ///
    /// Meaningful only when the curve is monotonic along `axis`; fails with
    /// [`AnimError::DegenerateBracket`] when `value` is not reached.
    pub fn solve_param(&self, value: f64, axis: usize) -> AnimResult<f64> {
        Vector::ZERO.axis(axis)?;
        bisect_root(
            |t| self.eval_unchecked(t).axis(axis).unwrap_or(f64::NAN) - value,
            0.0,
            1.0,
            SOLVE_ITERATIONS,
        )
    }

    /// Parameter of the curve point closest to `p`.
    pub fn nearest_param(&self, p: Vector) -> f64 {
        const COARSE: usize = 64;
        let dist = |t: f64| self.eval_unchecked(t).distance(p);
        let best = (0..=COARSE)
            .map(|i| i as f64 / COARSE as f64)
            .min_by(|a, b| dist(*a).total_cmp(&dist(*b)))
            .unwrap_or(0.0);
        let lo = (best - 1.0 / COARSE as f64).max(0.0);
        let hi = (best + 1.0 / COARSE as f64).min(1.0);
        match GoldenSection::new(dist, lo, hi) {
            Ok(mut search) => search.iterate_until(1e-10),
            Err(_) => best,
        }
    }

    pub fn shift(&self, displacement: Vector) -> Self {
        Self::from_array(self.points.map(|p| p + displacement)).with_samples(self.samples)
    }

    pub fn transform(&self, m: Affine) -> Self {
        Self::from_array(self.points.map(|p| affine::apply(m, p))).with_samples(self.samples)
    }

    pub fn reversed(&self) -> Self {
        let [p0, p1, p2, p3] = self.points;
        Self::new(p3, p2, p1, p0).with_samples(self.samples)
    }

    /// Control-point interpolation towards `other`.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let mut pts = self.points;
        for (p, q) in pts.iter_mut().zip(other.points) {
            *p = p.lerp(q, t);
        }
        Self::from_array(pts).with_samples(self.samples)
    }

    /// Planar form for renderers; `z` is dropped.
    pub fn to_kurbo(&self) -> kurbo::CubicBez {
        let [p0, p1, p2, p3] = self.points;
        kurbo::CubicBez::new(p0.to_point(), p1.to_point(), p2.to_point(), p3.to_point())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bezier/segment.rs"]
mod tests;
