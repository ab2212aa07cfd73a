//! Cubic Bezier segments and multi-segment paths.

pub mod path;
pub mod segment;
mod svg;
