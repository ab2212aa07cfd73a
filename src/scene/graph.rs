use std::fmt;

use crate::bezier::segment::DEFAULT_ARC_SAMPLES;
use crate::foundation::core::{Affine, BoundingBox, Vector};
use crate::foundation::error::{AnimError, AnimResult};
use crate::scene::arena::{NodeArena, NodeId};
use crate::scene::attributes::{self, Attribute};
use crate::scene::node::SceneNode;
use crate::transform::affine;

/// Reserved key addressing the camera node.
pub const CAMERA_KEY: &str = "__camera__";

/// Default camera span in scene units: 16 wide at 16:9.
pub const DEFAULT_CAMERA_ZOOM: Vector = Vector::xy(16.0, 9.0);

/// How an instruction or caller names a node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// Keys from the scene root downwards.
    Path(Vec<String>),
    Node(NodeId),
}

impl Target {
    pub fn key(key: impl Into<String>) -> Self {
        Target::Path(vec![key.into()])
    }

    pub fn path<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Target::Path(keys.into_iter().map(Into::into).collect())
    }

    pub fn camera() -> Self {
        Target::key(CAMERA_KEY)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Path(keys) => f.write_str(&keys.join("/")),
            Target::Node(id) => write!(f, "{id}"),
        }
    }
}

impl From<&str> for Target {
    fn from(key: &str) -> Self {
        Target::key(key)
    }
}

impl From<String> for Target {
    fn from(key: String) -> Self {
        Target::key(key)
    }
}

impl<const N: usize> From<[&str; N]> for Target {
    fn from(keys: [&str; N]) -> Self {
        Target::path(keys)
    }
}

impl From<Vec<String>> for Target {
    fn from(keys: Vec<String>) -> Self {
        Target::Path(keys)
    }
}

impl From<NodeId> for Target {
    fn from(id: NodeId) -> Self {
        Target::Node(id)
    }
}

/// The animated object hierarchy plus the camera, clock and dirty flag.
///
/// All nodes live in one arena; composites hold child handles. The root is a composite without
/// a key, and the camera is kept outside the root so it is never rendered.
#[derive(Debug)]
pub struct Scene {
    arena: NodeArena,
    root: NodeId,
    camera: NodeId,
    time: f64,
    frame_changed: bool,
    arc_samples: usize,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::with_camera(DEFAULT_CAMERA_ZOOM, DEFAULT_ARC_SAMPLES)
    }

    /// Scene whose camera spans `zoom` scene units and whose paths sample arcs at `arc_samples`.
    pub fn with_camera(zoom: Vector, arc_samples: usize) -> Self {
        let mut arena = NodeArena::new();
        let root = arena.insert(SceneNode::composite());
        let camera = arena.insert(SceneNode::camera(zoom));
        Self {
            arena,
            root,
            camera,
            time: 0.0,
            frame_changed: true,
            arc_samples,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn camera(&self) -> NodeId {
        self.camera
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    pub fn frame_changed(&self) -> bool {
        self.frame_changed
    }

    pub fn set_frame_changed(&mut self, changed: bool) {
        self.frame_changed = changed;
    }

    pub fn arc_samples(&self) -> usize {
        self.arc_samples
    }

    /// Live nodes in the arena, including the root, camera and detached nodes.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id)
    }

    pub fn node(&self, id: NodeId) -> AnimResult<&SceneNode> {
        self.arena
            .get(id)
            .ok_or_else(|| AnimError::lookup(format!("no live node {id}")))
    }

    pub fn node_mut(&mut self, id: NodeId) -> AnimResult<&mut SceneNode> {
        self.arena
            .get_mut(id)
            .ok_or_else(|| AnimError::lookup(format!("no live node {id}")))
    }

    /// Store `node` in the arena without attaching it. Path data adopts the scene's arc sampling.
    pub fn create(&mut self, mut node: SceneNode) -> NodeId {
        if let Some(data) = node.path_data_mut() {
            data.path.set_arc_samples(self.arc_samples);
        }
        self.arena.insert(node)
    }

    /// Create `node` and attach it to the root under `key` (synthesized when `None`).
    pub fn add_anobject(&mut self, node: SceneNode, key: Option<&str>) -> AnimResult<NodeId> {
        let id = self.create(node);
        self.attach(id, key, &[], false)?;
        Ok(id)
    }

    /// Create and attach several nodes under the composite at `path`.
    ///
    /// With `keys = None` every key is synthesized; otherwise there must be one key per node.
    pub fn add_many(
        &mut self,
        nodes: Vec<SceneNode>,
        keys: Option<&[&str]>,
        path: &[&str],
    ) -> AnimResult<Vec<NodeId>> {
        if let Some(keys) = keys
            && keys.len() != nodes.len()
        {
            return Err(AnimError::construction(format!(
                "number of keys ({}) must match number of objects ({})",
                keys.len(),
                nodes.len()
            )));
        }
        let mut ids = Vec::with_capacity(nodes.len());
        for (i, node) in nodes.into_iter().enumerate() {
            let id = self.create(node);
            self.attach(id, keys.map(|k| k[i]), path, true)?;
            ids.push(id);
        }
        Ok(ids)
    }

    /// Attach an existing node under the composite reached by `path` from the root.
    ///
    /// With `preserve_transform` the child frame is rewritten once so its world placement does not
    /// change. A node already attached elsewhere is moved. Reusing a key replaces the previous
    /// child, which is detached but stays alive in the arena.
    pub fn attach(
        &mut self,
        child: NodeId,
        key: Option<&str>,
        path: &[&str],
        preserve_transform: bool,
    ) -> AnimResult<String> {
        let parent = self.resolve_from(self.root, path.iter().copied())?;
        self.attach_to(child, parent, key, preserve_transform)
    }

    /// Attach `child` directly under the composite `parent`.
    pub fn attach_to(
        &mut self,
        child: NodeId,
        parent: NodeId,
        key: Option<&str>,
        preserve_transform: bool,
    ) -> AnimResult<String> {
        if child == self.root || child == self.camera {
            return Err(AnimError::construction("the root and camera cannot be attached"));
        }
        self.node(child)?;
        if self.node(parent)?.children().is_none() {
            return Err(AnimError::construction(format!(
                "node {parent} is not a composite"
            )));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(AnimError::construction(
                "attaching a node under itself would create a cycle",
            ));
        }

        let world = if preserve_transform {
            Some(self.world_transform(child)?)
        } else {
            None
        };
        self.detach(child)?;

        if let Some(world) = world {
            let local = affine::try_inverse(self.world_transform(parent)?)? * world;
            let frame = &mut self.node_mut(child)?.frame;
            let about = frame.about_point();
            frame.set_transform_matrix(local);
            frame.set_about_point(about);
        }

        let key = key.map_or_else(|| child.to_string(), str::to_owned);
        let replaced = self
            .node_mut(parent)?
            .children_mut()
            .and_then(|c| c.insert(key.clone(), child));
        if let Some(old) = replaced
            && old != child
        {
            self.node_mut(old)?.set_parent(None);
        }
        self.node_mut(child)?.set_parent(Some(parent));
        self.frame_changed = true;
        Ok(key)
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == candidate {
                return true;
            }
            match self.arena.get(id).and_then(SceneNode::parent) {
                Some(p) => id = p,
                None => return false,
            }
        }
    }

    /// Unlink `id` from its parent, returning the key it was stored under.
    pub fn detach(&mut self, id: NodeId) -> AnimResult<Option<String>> {
        let Some(parent) = self.node(id)?.parent() else {
            return Ok(None);
        };
        let key = self
            .node(parent)?
            .children()
            .and_then(|c| c.key_of(id))
            .map(str::to_owned);
        if let Some(k) = &key
            && let Some(children) = self.node_mut(parent)?.children_mut()
        {
            children.remove(k);
        }
        self.node_mut(id)?.set_parent(None);
        self.frame_changed = true;
        Ok(key)
    }

    /// Look up a node by key or key path. `"__camera__"` names the camera.
    pub fn get(&self, target: &Target) -> AnimResult<NodeId> {
        match target {
            Target::Node(id) => {
                self.node(*id)?;
                Ok(*id)
            }
            Target::Path(keys) => {
                if let [only] = keys.as_slice()
                    && only == CAMERA_KEY
                {
                    return Ok(self.camera);
                }
                self.resolve_from(self.root, keys.iter().map(String::as_str))
            }
        }
    }

    /// Shorthand for `get(&Target::from(target))`.
    pub fn get_anobject(&self, target: impl Into<Target>) -> AnimResult<NodeId> {
        self.get(&target.into())
    }

    /// Descend from `start` along `keys`.
    pub fn resolve_from<'k>(
        &self,
        start: NodeId,
        keys: impl IntoIterator<Item = &'k str>,
    ) -> AnimResult<NodeId> {
        let mut current = start;
        for key in keys {
            let children = self.node(current)?.children().ok_or_else(|| {
                AnimError::lookup(format!(
                    "cannot look up {key:?}: node {current} is not a composite"
                ))
            })?;
            current = children
                .get(key)
                .ok_or_else(|| AnimError::lookup(format!("no object with key {key:?}")))?;
        }
        Ok(current)
    }

    /// Key of `id` in its parent.
    pub fn key_of(&self, id: NodeId) -> AnimResult<String> {
        if id == self.camera {
            return Ok(CAMERA_KEY.to_owned());
        }
        let parent = self
            .node(id)?
            .parent()
            .ok_or_else(|| AnimError::lookup(format!("node {id} is not in the scene")))?;
        self.node(parent)?
            .children()
            .and_then(|c| c.key_of(id))
            .map(str::to_owned)
            .ok_or_else(|| AnimError::lookup(format!("node {id} is not in the scene")))
    }

    /// Key path from the root to `id`.
    pub fn path_of(&self, id: NodeId) -> AnimResult<Vec<String>> {
        if id == self.camera {
            return Ok(vec![CAMERA_KEY.to_owned()]);
        }
        let mut keys = Vec::new();
        let mut current = id;
        while current != self.root {
            keys.push(self.key_of(current)?);
            current = self.node(current)?.parent().ok_or_else(|| {
                AnimError::lookup(format!("node {id} is not attached to the root"))
            })?;
        }
        keys.reverse();
        Ok(keys)
    }

    /// True when `id` is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.arena.contains(id) && self.is_ancestor_or_self(self.root, id)
    }

    /// Detach the node named by `target`. It stays in the arena and may be re-attached.
    pub fn remove_anobject(&mut self, target: impl Into<Target>) -> AnimResult<NodeId> {
        let id = self.get(&target.into())?;
        if id == self.camera {
            return Err(AnimError::lookup("the camera cannot be removed"));
        }
        self.detach(id)?;
        Ok(id)
    }

    /// Detach `id` and free it together with its whole subtree.
    pub fn destroy(&mut self, id: NodeId) -> AnimResult<()> {
        if id == self.root || id == self.camera {
            return Err(AnimError::construction("the root and camera cannot be destroyed"));
        }
        self.detach(id)?;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.arena.remove(next)
                && let Some(children) = node.children()
            {
                stack.extend(children.ids());
            }
        }
        Ok(())
    }

    fn reorder(&mut self, target: Target, to_top: bool) -> AnimResult<()> {
        let id = self.get(&target)?;
        let key = self.key_of(id)?;
        let parent = self
            .node(id)?
            .parent()
            .ok_or_else(|| AnimError::lookup(format!("node {id} is not in the scene")))?;
        if let Some(children) = self.node_mut(parent)?.children_mut() {
            if to_top {
                children.move_to_end(&key);
            } else {
                children.move_to_front(&key);
            }
        }
        self.frame_changed = true;
        Ok(())
    }

    /// Draw the node last among its siblings.
    pub fn bring_to_top(&mut self, target: impl Into<Target>) -> AnimResult<()> {
        self.reorder(target.into(), true)
    }

    /// Draw the node first among its siblings.
    pub fn send_to_bottom(&mut self, target: impl Into<Target>) -> AnimResult<()> {
        self.reorder(target.into(), false)
    }

    /// Move the root children named by `keys` into a new composite stored under `name`.
    ///
    /// The children keep their keys and world placement. The new composite pivots about its
    /// contents' centre.
    pub fn group(&mut self, keys: &[&str], name: &str) -> AnimResult<NodeId> {
        let members = keys
            .iter()
            .map(|k| self.get(&Target::key(*k)))
            .collect::<AnimResult<Vec<_>>>()?;
        let group = self.create(SceneNode::composite());
        for (id, key) in members.into_iter().zip(keys) {
            self.attach_to(id, group, Some(*key), false)?;
        }
        self.attach_to(group, self.root, Some(name), false)?;
        self.about_center(group)?;
        Ok(group)
    }

    /// Box of `id` in its own internal coordinates.
    ///
    /// Composites take the union of their children's boxes under each child's frame; an empty
    /// composite has the zero box.
    pub fn bounding_box(&self, id: NodeId) -> AnimResult<BoundingBox> {
        let node = self.node(id)?;
        if let Some(b) = node.leaf_bounding_box() {
            return Ok(b);
        }
        let mut out: Option<BoundingBox> = None;
        if let Some(children) = node.children() {
            for child in children.ids() {
                let b = self.external_bounding_box(child)?;
                out = Some(out.map_or(b, |acc| acc.union(b)));
            }
        }
        Ok(out.unwrap_or(BoundingBox::ZERO))
    }

    /// Box of `id` in its parent's coordinates.
    pub fn external_bounding_box(&self, id: NodeId) -> AnimResult<BoundingBox> {
        let m = self.node(id)?.frame.transform_matrix();
        Ok(self.bounding_box(id)?.transformed(m))
    }

    /// Box of `id` in scene coordinates.
    pub fn world_bounding_box(&self, id: NodeId) -> AnimResult<BoundingBox> {
        Ok(self.bounding_box(id)?.transformed(self.world_transform(id)?))
    }

    /// Product of the frame matrices from the root down to and including `id`.
    pub fn world_transform(&self, id: NodeId) -> AnimResult<Affine> {
        let mut m = Affine::IDENTITY;
        let mut current = Some(id);
        while let Some(c) = current {
            let node = self.node(c)?;
            m = node.frame.transform_matrix() * m;
            current = node.parent();
        }
        Ok(m)
    }

    /// Resolve an attribute by name on `id`.
    pub fn attribute(&self, id: NodeId, name: &str) -> AnimResult<Attribute> {
        let node = self.node(id)?;
        attributes::resolve(node, name).ok_or_else(|| {
            AnimError::attribute(format!("{:?} node {id} has no attribute {name:?}", node.kind()))
        })
    }

    fn set_pivot(&mut self, id: NodeId, pick: fn(BoundingBox, Vector) -> Vector) -> AnimResult<()> {
        let bbox = self.bounding_box(id)?;
        let frame = &mut self.node_mut(id)?.frame;
        let about = pick(bbox, frame.about_point());
        frame.set_about_point(about);
        Ok(())
    }

    /// Pivot about the centre of the internal bounding box.
    pub fn about_center(&mut self, id: NodeId) -> AnimResult<()> {
        self.set_pivot(id, |b, _| b.center())
    }

    /// Pivot about the left edge, keeping the pivot height.
    pub fn about_left(&mut self, id: NodeId) -> AnimResult<()> {
        self.set_pivot(id, |b, a| Vector::xy(b.min.x, a.y))
    }

    pub fn about_right(&mut self, id: NodeId) -> AnimResult<()> {
        self.set_pivot(id, |b, a| Vector::xy(b.max.x, a.y))
    }

    pub fn about_upper(&mut self, id: NodeId) -> AnimResult<()> {
        self.set_pivot(id, |b, a| Vector::xy(a.x, b.max.y))
    }

    pub fn about_lower(&mut self, id: NodeId) -> AnimResult<()> {
        self.set_pivot(id, |b, a| Vector::xy(a.x, b.min.y))
    }

    /// Iterate the children of `id` in draw order.
    pub fn children_of(&self, id: NodeId) -> AnimResult<Vec<NodeId>> {
        Ok(self
            .node(id)?
            .children()
            .map(|c| c.ids().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
