//! SVG path data import.

use kurbo::PathEl;

use crate::bezier::path::PolyBezier;
use crate::bezier::segment::BezierSegment;
use crate::foundation::core::{BezPath, Point, Vector};
use crate::foundation::error::{AnimError, AnimResult};

fn to_scene(p: Point, scale: f64) -> Vector {
    // SVG is y-down.
    Vector::xy(p.x * scale, -p.y * scale)
}

impl PolyBezier {
    /// Parse SVG path data (`d` attribute) into cubic segments.
    ///
    /// Lines become straight cubics, quadratics are raised to cubics and the y axis is flipped.
    /// Coordinates are multiplied by `scale`.
    pub fn from_svg_path(d: &str, scale: f64) -> AnimResult<Self> {
        let bp = BezPath::from_svg(d.trim())
            .map_err(|e| AnimError::construction(format!("invalid svg path data: {e}")))?;
        Ok(Self::from_bez_path(&bp, scale))
    }

    /// Convert a kurbo path, flipping y and scaling as in [`PolyBezier::from_svg_path`].
    pub fn from_bez_path(bp: &BezPath, scale: f64) -> Self {
        let mut out = PolyBezier::new();
        let mut current = Vector::ZERO;
        let mut start = Vector::ZERO;
        for el in bp.elements() {
            match *el {
                PathEl::MoveTo(p) => {
                    current = to_scene(p, scale);
                    start = current;
                }
                PathEl::LineTo(p) => {
                    let to = to_scene(p, scale);
                    out.push_segment(BezierSegment::line(current, to));
                    current = to;
                }
                PathEl::QuadTo(q, p) => {
                    let q = to_scene(q, scale);
                    let to = to_scene(p, scale);
                    out.push_segment(BezierSegment::new(
                        current,
                        current + (q - current) * (2.0 / 3.0),
                        to + (q - to) * (2.0 / 3.0),
                        to,
                    ));
                    current = to;
                }
                PathEl::CurveTo(p1, p2, p3) => {
                    let to = to_scene(p3, scale);
                    out.push_segment(BezierSegment::new(
                        current,
                        to_scene(p1, scale),
                        to_scene(p2, scale),
                        to,
                    ));
                    current = to;
                }
                PathEl::ClosePath => {
                    if !current.approx_eq(start, 1e-12) {
                        out.push_segment(BezierSegment::line(current, start));
                    }
                    current = start;
                }
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bezier/svg.rs"]
mod tests;
