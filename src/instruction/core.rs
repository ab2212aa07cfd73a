use std::fmt;

use crate::foundation::error::AnimResult;
use crate::scene::graph::Scene;

/// A schedulable unit of animation work.
///
/// Lifecycle: constructed, then [`Instruction::start`] once, then [`Instruction::update`] once per
/// scheduler pass until [`Instruction::finished`] reports true. A finished instruction is never
/// updated again.
pub trait Instruction {
    /// Type name used in logs and error context, e.g. `"MoveTo"`.
    fn name(&self) -> &str;

    /// Human readable description of what the instruction acts on.
    fn target(&self) -> String {
        String::new()
    }

    fn start(&mut self, _scene: &mut Scene) -> AnimResult<()> {
        Ok(())
    }

    /// Advance by up to `dt` seconds and return the time actually consumed.
    fn update(&mut self, scene: &mut Scene, dt: f64) -> AnimResult<f64>;

    fn finished(&self) -> bool;

    /// Whether running this instruction dirties the rendered frame.
    fn frame_changed(&self) -> bool {
        true
    }

    /// Wrap into a tree node with no successors.
    fn node(self) -> InstructionNode
    where
        Self: Sized + 'static,
    {
        InstructionNode::new(self)
    }
}

/// An instruction plus the instructions that start, in parallel, once it finishes.
pub struct InstructionNode {
    inst: Box<dyn Instruction>,
    next: Vec<InstructionNode>,
}

impl fmt::Debug for InstructionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstructionNode")
            .field("name", &self.inst.name())
            .field("target", &self.inst.target())
            .field("next", &self.next)
            .finish()
    }
}

impl<I: Instruction + 'static> From<I> for InstructionNode {
    fn from(inst: I) -> Self {
        InstructionNode::new(inst)
    }
}

impl InstructionNode {
    pub fn new(inst: impl Instruction + 'static) -> Self {
        Self {
            inst: Box::new(inst),
            next: Vec::new(),
        }
    }

    /// Add a successor. Several successors run in parallel.
    pub fn then(mut self, next: impl Into<InstructionNode>) -> Self {
        self.next.push(next.into());
        self
    }

    pub fn instruction(&self) -> &dyn Instruction {
        self.inst.as_ref()
    }

    pub fn next(&self) -> &[InstructionNode] {
        &self.next
    }

    pub fn name(&self) -> &str {
        self.inst.name()
    }

    pub fn finished(&self) -> bool {
        self.inst.finished()
    }

    /// Number of instructions in this node's chain, counting nested trees as one.
    pub fn chain_len(&self) -> usize {
        1 + self.next.iter().map(InstructionNode::chain_len).sum::<usize>()
    }

    pub(crate) fn start(&mut self, scene: &mut Scene) -> AnimResult<()> {
        let inst = &mut self.inst;
        inst.start(scene)
            .map_err(|e| e.in_instruction(inst.name(), inst.target()))
    }

    pub(crate) fn update(&mut self, scene: &mut Scene, dt: f64) -> AnimResult<f64> {
        let inst = &mut self.inst;
        inst.update(scene, dt)
            .map_err(|e| e.in_instruction(inst.name(), inst.target()))
    }
}

/// Runs a set of concurrently active instruction chains until all of them finish.
///
/// Trees are instructions themselves, so sequential and parallel groups nest freely.
pub struct InstructionTree {
    name: &'static str,
    current: Vec<InstructionNode>,
    finished: bool,
}

impl fmt::Debug for InstructionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstructionTree")
            .field("name", &self.name)
            .field("current", &self.current)
            .field("finished", &self.finished)
            .finish()
    }
}

impl InstructionTree {
    /// Tree whose initial active set is `current`.
    pub fn new(current: Vec<InstructionNode>) -> Self {
        Self {
            name: "InstructionTree",
            current,
            finished: false,
        }
    }

    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Chains currently active.
    pub fn current(&self) -> &[InstructionNode] {
        &self.current
    }

    /// Add chains to the active set; they are started by the caller or by [`Instruction::start`].
    pub fn push(&mut self, node: impl Into<InstructionNode>) {
        self.current.push(node.into());
        self.finished = false;
    }
}

/// Advance every node in `nodes` by `dt`, forwarding leftover time to the successors of nodes
/// that finish. Returns the largest time consumed by any branch and the still-active nodes.
fn advance(
    scene: &mut Scene,
    nodes: Vec<InstructionNode>,
    dt: f64,
) -> AnimResult<(f64, Vec<InstructionNode>)> {
    let mut max_used: f64 = 0.0;
    let mut active = Vec::with_capacity(nodes.len());
    let mut spawned = Vec::new();
    for mut node in nodes {
        let mut used = node.update(scene, dt)?;
        if node.inst.frame_changed() {
            scene.set_frame_changed(true);
        }
        if node.inst.finished() {
            let mut next = std::mem::take(&mut node.next);
            tracing::debug!(
                instruction = node.inst.name(),
                target = %node.inst.target(),
                successors = next.len(),
                leftover = dt - used,
                "instruction finished"
            );
            for n in &mut next {
                n.start(scene)?;
            }
            let (more, rest) = advance(scene, next, dt - used)?;
            used += more;
            spawned.extend(rest);
        } else {
            active.push(node);
        }
        max_used = max_used.max(used);
    }
    active.extend(spawned);
    Ok((max_used, active))
}

impl Instruction for InstructionTree {
    fn name(&self) -> &str {
        self.name
    }

    fn target(&self) -> String {
        format!("{} active", self.current.len())
    }

    fn start(&mut self, scene: &mut Scene) -> AnimResult<()> {
        for node in &mut self.current {
            node.start(scene)?;
        }
        Ok(())
    }

    fn update(&mut self, scene: &mut Scene, dt: f64) -> AnimResult<f64> {
        let current = std::mem::take(&mut self.current);
        let (used, active) = advance(scene, current, dt)?;
        self.current = active;
        if self.current.is_empty() {
            self.finished = true;
        }
        Ok(used)
    }

    fn finished(&self) -> bool {
        self.finished
    }

    /// Leaves mark the frame themselves as the tree advances them.
    fn frame_changed(&self) -> bool {
        false
    }
}

/// Run `nodes` one after another: each starts when the previous one finishes.
pub fn run_sequential(nodes: Vec<InstructionNode>) -> InstructionTree {
    let mut rev = nodes.into_iter().rev();
    let Some(mut chain) = rev.next() else {
        return InstructionTree::new(Vec::new()).named("RunSequential");
    };
    for mut node in rev {
        node.next.push(chain);
        chain = node;
    }
    InstructionTree::new(vec![chain]).named("RunSequential")
}

/// Run `nodes` side by side; the tree finishes when the last branch does.
pub fn run_parallel(nodes: Vec<InstructionNode>) -> InstructionTree {
    InstructionTree::new(nodes).named("RunParallel")
}

#[cfg(test)]
#[path = "../../tests/unit/instruction/core.rs"]
mod tests;
