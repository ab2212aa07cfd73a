//! JSON animation scripts: objects to place in a scene plus a timeline of steps.

pub mod build;
pub mod model;
