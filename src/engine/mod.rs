//! Frame loop driving an instruction tree against a scene and a frame sink.

pub mod backend;
/// Engine settings loaded from JSON.
pub mod config;
pub mod runner;
