//! Scene graph: arena-backed nodes, composites, attributes and the render boundary.

pub mod arena;
/// Named attribute tables used by instructions.
pub mod attributes;
pub mod graph;
pub mod node;
pub mod render;
/// Factories for common shapes.
pub mod shapes;
