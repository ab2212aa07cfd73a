//! Factories for common path nodes.

use std::f64::consts::PI;

use crate::bezier::path::PolyBezier;
use crate::foundation::core::Vector;
use crate::foundation::error::{AnimError, AnimResult};
use crate::scene::node::{ImageData, Pen, SceneNode};

/// Axis-aligned rectangle of `size`, centred on the internal origin.
pub fn rectangle(size: impl Into<Vector>) -> AnimResult<SceneNode> {
    let s = size.into();
    let ll = Vector::xy(-0.5 * s.x, -0.5 * s.y);
    let ul = Vector::xy(-0.5 * s.x, 0.5 * s.y);
    let ur = Vector::xy(0.5 * s.x, 0.5 * s.y);
    let lr = Vector::xy(0.5 * s.x, -0.5 * s.y);
    let path = PolyBezier::linear(&[ll, ul, ur, lr, ll], false)?;
    Ok(SceneNode::path(path))
}

pub fn circle(radius: f64) -> AnimResult<SceneNode> {
    ellipse(radius, 0.0)
}

/// Ellipse with semi-major axis `a` along x and eccentricity `e` in `[0, 1)`.
///
/// The outline is a smooth fit through points every 45 degrees. The fit starts one step early
/// and ends one step late so the closing point has a symmetric tangent, then the two overhanging
/// segments are dropped.
pub fn ellipse(a: f64, e: f64) -> AnimResult<SceneNode> {
    if !(0.0..1.0).contains(&e) {
        return Err(AnimError::construction(format!(
            "eccentricity must be in [0, 1), got {e}"
        )));
    }
    let b = a * (1.0 - e * e).sqrt();
    let points: Vec<Vector> = (-1..=9)
        .map(|i| {
            let angle = f64::from(i) * PI / 4.0;
            Vector::xy(a * angle.cos(), b * angle.sin())
        })
        .collect();
    let fitted = PolyBezier::smooth(&points)?;
    let segments = fitted.segments();
    let path = PolyBezier::from_segments(segments[1..segments.len() - 1].iter().cloned());
    Ok(SceneNode::path(path))
}

pub fn line(from: impl Into<Vector>, to: impl Into<Vector>) -> AnimResult<SceneNode> {
    let path = PolyBezier::linear(&[from.into(), to.into()], false)?;
    Ok(SceneNode::path(path))
}

/// Open polyline through `points`, straight or smoothly fitted.
pub fn polyline(points: &[Vector], smooth: bool) -> AnimResult<SceneNode> {
    let path = if smooth {
        PolyBezier::smooth(points)?
    } else {
        PolyBezier::linear(points, false)?
    };
    Ok(SceneNode::path(path))
}

/// Two crossing strokes of `size` centred on the origin.
pub fn crosshair(size: impl Into<Vector>) -> AnimResult<SceneNode> {
    let s = size.into();
    let mut path = PolyBezier::new();
    path.connect_linear(&[Vector::xy(-s.x / 2.0, 0.0), Vector::xy(s.x / 2.0, 0.0)], false)?;
    path.connect_linear(&[Vector::xy(0.0, -s.y / 2.0), Vector::xy(0.0, s.y / 2.0)], false)?;
    Ok(SceneNode::path_with_pen(
        path,
        Pen {
            stroke_width: 0.75,
            ..Pen::default()
        },
    ))
}

/// Bitmap node spanning `size` scene units from the internal origin.
pub fn image(
    pixel_width: u32,
    pixel_height: u32,
    rgba: Vec<u8>,
    size: impl Into<Vector>,
) -> AnimResult<SceneNode> {
    Ok(SceneNode::image(ImageData::new(
        pixel_width,
        pixel_height,
        rgba,
        size.into(),
    )?))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/shapes.rs"]
mod tests;
