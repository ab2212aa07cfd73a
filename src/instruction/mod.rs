/// Attribute setting and sliding instructions.
pub mod attribute;
pub mod basic;
/// Instruction trait and the scheduler tree.
pub mod core;
