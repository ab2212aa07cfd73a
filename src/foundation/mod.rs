//! Shared primitives: vectors, bounding boxes, errors and numeric helpers.

pub mod core;
pub mod error;
pub(crate) mod math;
/// Bracketed root and minimum searches.
pub mod search;
