//! Chained cubic segments.

use crate::bezier::segment::{BezierSegment, DEFAULT_ARC_SAMPLES};
use crate::foundation::core::{Affine, BezPath, BoundingBox, Vector};
use crate::foundation::error::{AnimError, AnimResult};
use crate::foundation::math::solve_tridiagonal;
use crate::foundation::search::bisect_root;

/// Endpoints closer than this are treated as connected when exporting sub-paths.
const CONNECT_EPS: f64 = 1e-9;

/// Ordered list of cubic segments.
///
/// Paths built by [`PolyBezier::connect_linear`] and [`PolyBezier::connect_smooth`] are
/// connected: each segment starts where the previous one ends. Global parameters `t` range over
/// `[0, len]`, segment `floor(t)` at local parameter `t - floor(t)`. Distance parameters `d` are
/// proportions of the total arc length in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "PathRepr")]
pub struct PolyBezier {
    segments: Vec<BezierSegment>,
    arc_samples: usize,
}

#[derive(serde::Deserialize)]
struct PathRepr {
    segments: Vec<BezierSegment>,
    #[serde(default = "default_samples")]
    arc_samples: usize,
}

impl From<PathRepr> for PolyBezier {
    fn from(r: PathRepr) -> Self {
        Self::from_segments(r.segments).with_arc_samples(r.arc_samples)
    }
}

fn default_samples() -> usize {
    DEFAULT_ARC_SAMPLES
}

impl Default for PolyBezier {
    fn default() -> Self {
        Self::new()
    }
}

impl PolyBezier {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            arc_samples: DEFAULT_ARC_SAMPLES,
        }
    }

    pub fn from_segments(segments: impl IntoIterator<Item = BezierSegment>) -> Self {
        let mut out = Self::new();
        for s in segments {
            out.push_segment(s);
        }
        out
    }

    /// Build from a flat list of control points, four per segment.
    pub fn from_points(points: &[Vector]) -> AnimResult<Self> {
        if points.len() % 4 != 0 {
            return Err(AnimError::construction(format!(
                "poly-bezier needs a multiple of 4 control points, got {}",
                points.len()
            )));
        }
        let mut out = Self::new();
        for chunk in points.chunks_exact(4) {
            out.push_segment(BezierSegment::from_slice(chunk)?);
        }
        Ok(out)
    }

    /// Straight edges through `points`.
    pub fn linear(points: &[Vector], close: bool) -> AnimResult<Self> {
        let mut out = Self::new();
        out.connect_linear(points, close)?;
        Ok(out)
    }

    /// C1-continuous curve through `points`.
    pub fn smooth(points: &[Vector]) -> AnimResult<Self> {
        let mut out = Self::new();
        out.connect_smooth(points)?;
        Ok(out)
    }

    /// Arc-length table resolution for every current and future segment.
    pub fn with_arc_samples(mut self, samples: usize) -> Self {
        self.set_arc_samples(samples);
        self
    }

    pub fn set_arc_samples(&mut self, samples: usize) {
        self.arc_samples = samples.max(2);
        for s in &mut self.segments {
            s.set_samples(self.arc_samples);
        }
    }

    pub fn arc_samples(&self) -> usize {
        self.arc_samples
    }

    pub fn push_segment(&mut self, segment: BezierSegment) {
        self.segments.push(segment.with_samples(self.arc_samples));
    }

    pub fn segments(&self) -> &[BezierSegment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> AnimResult<&BezierSegment> {
        self.segments.get(index).ok_or_else(|| {
            AnimError::lookup(format!(
                "segment {index} out of range for a path of {}",
                self.segments.len()
            ))
        })
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Flat control-point list, four per segment.
    pub fn points(&self) -> Vec<Vector> {
        self.segments
            .iter()
            .flat_map(|s| s.points().iter().copied())
            .collect()
    }

    /// Append straight edges through `points`, optionally back to the first point.
    pub fn connect_linear(&mut self, points: &[Vector], close: bool) -> AnimResult<()> {
        if points.len() < 2 {
            return Err(AnimError::construction(format!(
                "linear connection needs at least 2 points, got {}",
                points.len()
            )));
        }
        for pair in points.windows(2) {
            self.push_segment(BezierSegment::line(pair[0], pair[1]));
        }
        if close {
            self.push_segment(BezierSegment::line(points[points.len() - 1], points[0]));
        }
        Ok(())
    }

    /// Append a C1-continuous cubic spline through `points`.
    ///
    /// Inner control points solve the tridiagonal system of the natural spline fit. Two points
    /// give a single segment with control points at one and two thirds.
    pub fn connect_smooth(&mut self, points: &[Vector]) -> AnimResult<()> {
        let n = points.len();
        if n < 2 {
            return Err(AnimError::construction(format!(
                "smooth connection needs at least 2 points, got {n}"
            )));
        }
        if n == 2 {
            let (a, b) = (points[0], points[1]);
            self.push_segment(BezierSegment::new(
                a,
                a.lerp(b, 1.0 / 3.0),
                a.lerp(b, 2.0 / 3.0),
                b,
            ));
            return Ok(());
        }

        let m = n - 1;
        let d = points;
        let mut diag = vec![4.0; m];
        diag[0] = 2.0;
        diag[m - 1] = 7.0;
        let upper = vec![1.0; m];
        let mut lower = vec![1.0; m];
        lower[m - 1] = 2.0;

        let mut rhs: Vec<Vector> = (0..m).map(|i| d[i] * 4.0 + d[i + 1] * 2.0).collect();
        rhs[0] = d[0] + d[1] * 2.0;
        rhs[m - 1] = d[m - 1] * 8.0 + d[m];

        let p1 = solve_tridiagonal(&lower, &diag, &upper, &rhs)?;
        let mut p2 = vec![Vector::ZERO; m];
        for i in 0..m - 1 {
            p2[i] = d[i + 1] * 2.0 - p1[i + 1];
        }
        p2[m - 1] = p1[m - 1] * 4.0 + p1[m - 2] - d[m - 1] * 4.0;

        for i in 0..m {
            self.push_segment(BezierSegment::new(d[i], p1[i], p2[i], d[i + 1]));
        }
        Ok(())
    }

    fn locate(&self, t: f64) -> AnimResult<(usize, f64)> {
        let n = self.segments.len();
        if n == 0 {
            return Err(AnimError::bounds("cannot evaluate an empty path"));
        }
        if !(0.0..=n as f64).contains(&t) {
            return Err(AnimError::bounds(format!(
                "path parameter t = {t} outside [0, {n}]"
            )));
        }
        let seg = (t.floor() as usize).min(n - 1);
        Ok((seg, t - seg as f64))
    }

    /// Point at global parameter `t` in `[0, len]`.
    pub fn eval(&self, t: f64) -> AnimResult<Vector> {
        let (seg, local) = self.locate(t)?;
        self.segments[seg].eval(local)
    }

    pub fn deriv(&self, t: f64) -> AnimResult<Vector> {
        let (seg, local) = self.locate(t)?;
        self.segments[seg].deriv(local)
    }

    pub fn deriv2(&self, t: f64) -> AnimResult<Vector> {
        let (seg, local) = self.locate(t)?;
        self.segments[seg].deriv2(local)
    }

    /// Global parameter where coordinate `axis` equals `value`, by bisection over `[0, len]`.
    pub fn solve_param(&self, value: f64, axis: usize) -> AnimResult<f64> {
        Vector::ZERO.axis(axis)?;
        let n = self.segments.len() as f64;
        self.locate(0.0)?;
        bisect_root(
            |t| {
                self.eval(t)
                    .and_then(|p| p.axis(axis))
                    .map_or(f64::NAN, |v| v - value)
            },
            0.0,
            n,
            60,
        )
    }

    /// Arc length of each segment.
    pub fn lengths(&self) -> Vec<f64> {
        self.segments.iter().map(BezierSegment::arc_length).collect()
    }

    /// Total arc length.
    pub fn length(&self) -> f64 {
        self.lengths().iter().sum()
    }

    /// Segment index and local parameter for proportional distance `d`.
    ///
    /// The segment is the first whose cumulative proportion strictly exceeds `d`, so a `d` lying
    /// exactly on a boundary lands at local parameter 0 of the following segment. `d >= 1` maps
    /// to the end of the last segment.
    pub fn find_segment(&self, d: f64) -> AnimResult<(usize, f64)> {
        let n = self.segments.len();
        if n == 0 {
            return Err(AnimError::bounds("cannot index an empty path"));
        }
        let lengths = self.lengths();
        let mut totals = Vec::with_capacity(n);
        let mut acc = 0.0;
        for l in &lengths {
            acc += l;
            totals.push(acc);
        }
        let total = acc;
        if total <= 0.0 {
            return Ok((0, d.clamp(0.0, 1.0)));
        }
        let seg = if d < 1.0 {
            totals
                .iter()
                .position(|&c| c / total > d)
                .unwrap_or(n - 1)
        } else {
            n - 1
        };
        let before = if seg > 0 { totals[seg - 1] } else { 0.0 };
        let local = if lengths[seg] > 0.0 {
            (d * total - before) / lengths[seg]
        } else {
            0.0
        };
        Ok((seg, local.clamp(0.0, 1.0)))
    }

    /// Point at proportional distance `d` along the whole path.
    pub fn point_at_distance(&self, d: f64) -> AnimResult<Vector> {
        let (seg, local) = self.find_segment(d)?;
        Ok(self.segments[seg].point_at_distance(local))
    }

    /// Tangent at proportional distance `d`.
    pub fn tangent_at_distance(&self, d: f64) -> AnimResult<Vector> {
        let (seg, local) = self.find_segment(d)?;
        Ok(self.segments[seg].tangent_at_distance(local))
    }

    /// Global parameter at proportional distance `d`.
    pub fn param_at_distance(&self, d: f64) -> AnimResult<f64> {
        let (seg, local) = self.find_segment(d)?;
        Ok(seg as f64 + self.segments[seg].param_at_distance(local))
    }

    /// Union of segment boxes; the zero box for an empty path.
    pub fn bounding_box(&self) -> BoundingBox {
        self.segments
            .iter()
            .map(BezierSegment::bounding_box)
            .reduce(BoundingBox::union)
            .unwrap_or(BoundingBox::ZERO)
    }

    pub fn center(&self) -> Vector {
        self.bounding_box().center()
    }

    pub fn shift(&self, displacement: Vector) -> Self {
        self.map_segments(|s| s.shift(displacement))
    }

    pub fn transform(&self, m: Affine) -> Self {
        self.map_segments(|s| s.transform(m))
    }

    pub fn reversed(&self) -> Self {
        let mut out = self.map_segments(BezierSegment::reversed);
        out.segments.reverse();
        out
    }

    fn map_segments(&self, f: impl Fn(&BezierSegment) -> BezierSegment) -> Self {
        Self {
            segments: self.segments.iter().map(f).collect(),
            arc_samples: self.arc_samples,
        }
    }

    /// Split at proportional distance `d` into the part before and the part after.
    pub fn split(&self, d: f64) -> AnimResult<(Self, Self)> {
        let (seg, local) = self.find_segment(d)?;
        let t = self.segments[seg].param_at_distance(local);
        let (l, r) = self.segments[seg].split(t)?;
        let mut left = Self::new().with_arc_samples(self.arc_samples);
        for s in &self.segments[..seg] {
            left.push_segment(s.clone());
        }
        left.push_segment(l);
        let mut right = Self::new().with_arc_samples(self.arc_samples);
        right.push_segment(r);
        for s in &self.segments[seg + 1..] {
            right.push_segment(s.clone());
        }
        Ok((left, right))
    }

    /// Add an endpoint at proportional distance `d`, turning one segment into two.
    pub fn insert_point(&mut self, d: f64) -> AnimResult<()> {
        let (left, right) = self.split(d)?;
        *self = left.concat(&right);
        Ok(())
    }

    /// Segments of `self` followed by segments of `other`.
    pub fn concat(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for s in &other.segments {
            out.push_segment(s.clone());
        }
        out
    }

    /// Split the longest segment at its midpoint until there are `count` segments.
    pub fn subdivide_to(&mut self, count: usize) -> AnimResult<()> {
        if self.segments.is_empty() {
            return Err(AnimError::construction("cannot subdivide an empty path"));
        }
        while self.segments.len() < count {
            let lengths = self.lengths();
            let longest = lengths
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map_or(0, |(i, _)| i);
            let (l, r) = self.segments[longest].split(0.5)?;
            self.segments[longest] = l;
            self.segments.insert(longest + 1, r);
        }
        Ok(())
    }

    /// Control-point interpolation between two paths with the same segment count.
    pub fn lerp(&self, other: &Self, t: f64) -> AnimResult<Self> {
        if self.len() != other.len() {
            return Err(AnimError::construction(format!(
                "cannot interpolate paths of {} and {} segments",
                self.len(),
                other.len()
            )));
        }
        Ok(Self {
            segments: self
                .segments
                .iter()
                .zip(&other.segments)
                .map(|(a, b)| a.lerp(b, t))
                .collect(),
            arc_samples: self.arc_samples,
        })
    }

    /// Planar path for renderers; breaks in continuity start new sub-paths.
    pub fn to_bez_path(&self) -> BezPath {
        let mut out = BezPath::new();
        let mut last: Option<Vector> = None;
        for s in &self.segments {
            let [p0, p1, p2, p3] = *s.points();
            if last.is_none_or(|l| !l.approx_eq(p0, CONNECT_EPS)) {
                out.move_to(p0.to_point());
            }
            out.curve_to(p1.to_point(), p2.to_point(), p3.to_point());
            last = Some(p3);
        }
        out
    }

    /// Whether every segment starts where the previous one ended.
    pub fn is_connected(&self) -> bool {
        self.segments
            .windows(2)
            .all(|w| w[0].p3().approx_eq(w[1].p0(), CONNECT_EPS))
    }
}

impl std::ops::Add<&PolyBezier> for &PolyBezier {
    type Output = PolyBezier;

    fn add(self, rhs: &PolyBezier) -> PolyBezier {
        self.concat(rhs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bezier/path.rs"]
mod tests;
