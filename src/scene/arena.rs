use std::fmt;

use crate::scene::node::SceneNode;

/// Generational handle into a [`NodeArena`]. Index 0 is the nil sentinel.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub const NIL: Self = Self {
        index: 0,
        generation: 0,
    };

    pub const fn from_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub const fn index(self) -> u32 {
        self.index
    }

    pub const fn generation(self) -> u32 {
        self.generation
    }

    pub const fn is_nil(self) -> bool {
        self.index == 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.index, self.generation)
    }
}

/// Slot storage for scene nodes with stale-handle detection.
#[derive(Debug)]
pub struct NodeArena {
    nodes: Vec<Option<SceneNode>>,
    generations: Vec<u32>,
    free_indices: Vec<usize>,
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeArena {
    pub fn new() -> Self {
        Self {
            nodes: vec![None],
            generations: vec![0],
            free_indices: Vec::new(),
        }
    }

    /// Insert a node, reusing a freed slot when one exists.
    pub fn insert(&mut self, node: SceneNode) -> NodeId {
        if let Some(index) = self.free_indices.pop() {
            self.nodes[index] = Some(node);
            return NodeId::from_parts(index as u32, self.generations[index]);
        }
        let index = self.nodes.len();
        self.nodes.push(Some(node));
        self.generations.push(0);
        NodeId::from_parts(index as u32, 0)
    }

    fn slot(&self, id: NodeId) -> Option<usize> {
        let index = id.index() as usize;
        if id.is_nil() || index >= self.nodes.len() || self.generations[index] != id.generation()
        {
            return None;
        }
        Some(index)
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.slot(id).and_then(|i| self.nodes[i].as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.slot(id).and_then(|i| self.nodes[i].as_mut())
    }

    /// Remove a node and bump its slot generation so old handles go stale.
    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        let index = self.slot(id)?;
        self.generations[index] = self.generations[index].wrapping_add(1);
        let removed = self.nodes[index].take();
        if removed.is_some() {
            self.free_indices.push(index);
        }
        removed
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(index, node)| {
                node.as_ref()
                    .map(|n| (NodeId::from_parts(index as u32, self.generations[index]), n))
            })
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/arena.rs"]
mod tests;
