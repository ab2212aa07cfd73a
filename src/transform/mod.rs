/// Affine matrix helpers over `kurbo::Affine`.
pub mod affine;
/// Node coordinate frames.
pub mod frame;
