#![forbid(unsafe_code)]

pub mod animation;
pub mod bezier;
pub mod engine;
pub mod foundation;
pub mod instruction;
pub mod scene;
pub mod script;
pub mod transform;

pub use animation::timing::Timing;
pub use animation::transfer::TransferFn;
pub use bezier::path::PolyBezier;
pub use bezier::segment::BezierSegment;
pub use engine::backend::{Backend, DisplayListBackend, FrameInfo, JsonLinesBackend, NullBackend};
pub use engine::config::EngineConfig;
pub use engine::runner::{Engine, RunStats};
pub use foundation::core::{BoundingBox, Vector};
pub use foundation::error::{AnimError, AnimResult};
pub use instruction::core::{
    Instruction, InstructionNode, InstructionTree, run_parallel, run_sequential,
};
pub use scene::arena::NodeId;
pub use scene::attributes::AttrValue;
pub use scene::graph::{Scene, Target};
pub use scene::node::{Color, Pen, SceneNode};
pub use scene::render::{Canvas, DisplayList};
pub use script::model::Script;
pub use transform::frame::CoordinateFrame;
