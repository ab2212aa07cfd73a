//! Ready-made instructions for common animation steps.
//!
//! Motion and pivot steps are configured [`SlideAttribute`] / [`SetAttribute`] values, so they
//! share the `with_duration` / `with_transfer` builders. Every duration defaults to zero, which
//! applies the change in the next scheduler pass without consuming a frame.

use crate::animation::timing::Timing;
use crate::animation::transfer::TransferFn;
use crate::bezier::path::PolyBezier;
use crate::foundation::core::Vector;
use crate::foundation::error::{AnimError, AnimResult};
use crate::instruction::attribute::{SetAttribute, SlideAttribute};
use crate::instruction::core::{
    Instruction, InstructionNode, InstructionTree, run_parallel, run_sequential,
};
use crate::scene::arena::NodeId;
use crate::scene::attributes::AttrValue;
use crate::scene::graph::{Scene, Target};
use crate::scene::node::SceneNode;

/// Slide `target` to `position`.
pub fn move_to(target: impl Into<Target>, position: impl Into<Vector>) -> SlideAttribute {
    SlideAttribute::new(target, "position", position.into()).named("MoveTo")
}

/// Slide `target` by `displacement`.
pub fn move_by(target: impl Into<Target>, displacement: impl Into<Vector>) -> SlideAttribute {
    SlideAttribute::new(target, "position", displacement.into())
        .relative()
        .named("Move")
}

/// Rotate to an absolute angle in radians.
pub fn rotate(target: impl Into<Target>, angle: f64) -> SlideAttribute {
    SlideAttribute::new(target, "rotation_angle", angle).named("Rotate")
}

/// Scale to `x` horizontally and `y` (or `x`) vertically.
pub fn scale(target: impl Into<Target>, x: f64, y: Option<f64>) -> SlideAttribute {
    SlideAttribute::new(target, "scale", Vector::new(x, y.unwrap_or(x), 1.0))
        .with_transfer(TransferFn::Linear)
        .named("Scale")
}

/// Grow to `mult` times the current scale and shrink back.
pub fn emphasize(target: impl Into<Target>, mult: f64) -> SlideAttribute {
    SlideAttribute::from_start(target, "scale", move |s| {
        let s = s.as_vector()?;
        Ok(Vector::new(s.x * mult, s.y * mult, s.z).into())
    })
    .with_transfer(TransferFn::ThereAndBack)
    .named("Emphasize")
}

/// Move the camera centre.
pub fn move_camera(position: impl Into<Vector>) -> SlideAttribute {
    SlideAttribute::new(Target::camera(), "position", position.into()).named("MoveCamera")
}

/// Zoom to `yzoom` scene units per frame height. Without `xzoom` the current aspect ratio is
/// kept.
pub fn zoom_camera(yzoom: f64, xzoom: Option<f64>) -> SlideAttribute {
    SlideAttribute::from_start(Target::camera(), "zoom", move |cur| {
        let cur = cur.as_vector()?;
        let x = match xzoom {
            Some(x) => x,
            None if cur.y != 0.0 => cur.x / cur.y * yzoom,
            None => return Err(AnimError::attribute("camera zoom has a zero height")),
        };
        Ok(Vector::xy(x, yzoom).into())
    })
    .named("ZoomCamera")
}

fn pivot(target: impl Into<Target>, action: &'static str, name: &'static str) -> SetAttribute {
    SetAttribute::call(target, action)
        .named(name)
        .with_frame_changed(false)
}

pub fn about_center(target: impl Into<Target>) -> SetAttribute {
    pivot(target, "about_center", "AboutCenter")
}

pub fn about_left(target: impl Into<Target>) -> SetAttribute {
    pivot(target, "about_left", "AboutLeft")
}

pub fn about_right(target: impl Into<Target>) -> SetAttribute {
    pivot(target, "about_right", "AboutRight")
}

pub fn about_upper(target: impl Into<Target>) -> SetAttribute {
    pivot(target, "about_upper", "AboutUpper")
}

pub fn about_lower(target: impl Into<Target>) -> SetAttribute {
    pivot(target, "about_lower", "AboutLower")
}

/// Move the pivot to `about_point` (internal coordinates) without moving the geometry.
pub fn set_about_point(target: impl Into<Target>, about_point: impl Into<Vector>) -> SetAttribute {
    SetAttribute::new(target, "about_point", about_point.into())
        .named("SetAboutPoint")
        .with_frame_changed(false)
}

/// Shift the pivot by `delta` without moving the geometry.
pub fn adjust_about_point(target: impl Into<Target>, delta: impl Into<Vector>) -> SlideAttribute {
    SlideAttribute::new(target, "about_point", delta.into())
        .relative()
        .with_transfer(TransferFn::Linear)
        .named("AdjustAboutPoint")
        .with_frame_changed(false)
}

fn path_distance(end_points: [f64; 2], timing: &Timing) -> f64 {
    timing.alpha() * (end_points[1] - end_points[0]) + end_points[0]
}

/// Move along `path` between the proportional distances in `end_points` (`[0.0, 1.0]` for the
/// whole path).
pub fn follow_path(
    target: impl Into<Target>,
    path: PolyBezier,
    end_points: [f64; 2],
) -> SetAttribute {
    SetAttribute::computed(target, "position", move |_, timing| {
        Ok(path.point_at_distance(path_distance(end_points, timing))?.into())
    })
    .named("FollowPath")
}

/// Rotate to the direction of `path` while travelling between `end_points`.
pub fn align_with_path(
    target: impl Into<Target>,
    path: PolyBezier,
    end_points: [f64; 2],
) -> SetAttribute {
    SetAttribute::computed(target, "rotation_angle", move |_, timing| {
        let slope = path.tangent_at_distance(path_distance(end_points, timing))?;
        Ok(AttrValue::Scalar(slope.theta()))
    })
    .named("AlignWithPath")
}

/// Do nothing for `duration` seconds. Negative durations wait forever.
#[derive(Clone, Copy, Debug)]
pub struct Wait {
    timing: Timing,
}

impl Wait {
    pub fn new(duration: f64) -> Self {
        Self {
            timing: Timing::new(duration, TransferFn::Linear),
        }
    }
}

impl Instruction for Wait {
    fn name(&self) -> &str {
        "Wait"
    }

    fn target(&self) -> String {
        format!("{}s", self.timing.duration())
    }

    fn update(&mut self, _scene: &mut Scene, dt: f64) -> AnimResult<f64> {
        Ok(self.timing.update(dt))
    }

    fn finished(&self) -> bool {
        self.timing.is_complete()
    }

    fn frame_changed(&self) -> bool {
        false
    }
}

/// Builds a fresh copy of the instruction to repeat.
pub type Factory = Box<dyn FnMut() -> InstructionNode>;

/// Run a freshly built instruction `count` times back to back.
pub struct Repeat {
    count: usize,
    done: usize,
    factory: Factory,
    current: Option<InstructionTree>,
}

impl Repeat {
    pub fn new(count: usize, factory: impl FnMut() -> InstructionNode + 'static) -> Self {
        Self {
            count,
            done: 0,
            factory: Box::new(factory),
            current: None,
        }
    }

    fn begin(&mut self, scene: &mut Scene) -> AnimResult<()> {
        let mut tree = run_sequential(vec![(self.factory)()]);
        tree.start(scene)?;
        self.current = Some(tree);
        Ok(())
    }
}

impl Instruction for Repeat {
    fn name(&self) -> &str {
        "Repeat"
    }

    fn target(&self) -> String {
        format!("{}/{}", self.done, self.count)
    }

    fn start(&mut self, scene: &mut Scene) -> AnimResult<()> {
        if self.count > 0 {
            self.begin(scene)?;
        }
        Ok(())
    }

    fn update(&mut self, scene: &mut Scene, dt: f64) -> AnimResult<f64> {
        let mut used = 0.0;
        while let Some(tree) = self.current.as_mut() {
            used += tree.update(scene, dt - used)?;
            if !tree.finished() {
                break;
            }
            self.done += 1;
            self.current = None;
            if self.done < self.count {
                self.begin(scene)?;
            }
        }
        Ok(used)
    }

    fn finished(&self) -> bool {
        self.done >= self.count
    }

    fn frame_changed(&self) -> bool {
        false
    }
}

/// Create a node and attach it under `path` when the instruction runs.
pub struct AddObject {
    node: Option<SceneNode>,
    key: Option<String>,
    path: Vec<String>,
    added: Option<NodeId>,
}

impl AddObject {
    pub fn new(node: SceneNode, key: Option<&str>) -> Self {
        Self {
            node: Some(node),
            key: key.map(str::to_owned),
            path: Vec::new(),
            added: None,
        }
    }

    /// Attach under the composite at `path` instead of the root, preserving placement.
    pub fn under<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }

    /// Handle of the created node once the instruction has run.
    pub fn added(&self) -> Option<NodeId> {
        self.added
    }
}

impl Instruction for AddObject {
    fn name(&self) -> &str {
        "AddObject"
    }

    fn target(&self) -> String {
        let mut keys = self.path.clone();
        keys.extend(self.key.clone());
        keys.join("/")
    }

    fn update(&mut self, scene: &mut Scene, _dt: f64) -> AnimResult<f64> {
        let Some(node) = self.node.take() else {
            return Ok(0.0);
        };
        let id = if self.path.is_empty() {
            scene.add_anobject(node, self.key.as_deref())?
        } else {
            let id = scene.create(node);
            let path: Vec<&str> = self.path.iter().map(String::as_str).collect();
            scene.attach(id, self.key.as_deref(), &path, true)?;
            id
        };
        self.added = Some(id);
        Ok(0.0)
    }

    fn finished(&self) -> bool {
        self.node.is_none()
    }
}

macro_rules! structural {
    ($(#[$doc:meta])* $name:ident, |$scene:ident, $target:ident| $body:expr) => {
        $(#[$doc])*
        #[derive(Clone, Debug)]
        pub struct $name {
            target: Target,
            done: bool,
        }

        impl $name {
            pub fn new(target: impl Into<Target>) -> Self {
                Self {
                    target: target.into(),
                    done: false,
                }
            }
        }

        impl Instruction for $name {
            fn name(&self) -> &str {
                stringify!($name)
            }

            fn target(&self) -> String {
                self.target.to_string()
            }

            fn update(&mut self, $scene: &mut Scene, _dt: f64) -> AnimResult<f64> {
                let $target = self.target.clone();
                $body?;
                self.done = true;
                Ok(0.0)
            }

            fn finished(&self) -> bool {
                self.done
            }
        }
    };
}

structural!(
    /// Detach a node from the scene. The node stays alive and can be added back.
    RemoveObject,
    |scene, target| scene.remove_anobject(target)
);

structural!(
    /// Draw a node above its siblings.
    BringToTop,
    |scene, target| scene.bring_to_top(target)
);

structural!(
    /// Draw a node below its siblings.
    SendToBottom,
    |scene, target| scene.send_to_bottom(target)
);

/// Move root-level nodes into a new composite; see [`Scene::group`].
#[derive(Clone, Debug)]
pub struct Group {
    name: String,
    keys: Vec<String>,
    done: bool,
}

impl Group {
    pub fn new<I, S>(name: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            keys: keys.into_iter().map(Into::into).collect(),
            done: false,
        }
    }
}

impl Instruction for Group {
    fn name(&self) -> &str {
        "Group"
    }

    fn target(&self) -> String {
        format!("{} <- [{}]", self.name, self.keys.join(", "))
    }

    fn update(&mut self, scene: &mut Scene, _dt: f64) -> AnimResult<f64> {
        let keys: Vec<&str> = self.keys.iter().map(String::as_str).collect();
        scene.group(&keys, &self.name)?;
        self.done = true;
        Ok(0.0)
    }

    fn finished(&self) -> bool {
        self.done
    }
}

fn path_node(scene: &Scene, target: &Target) -> AnimResult<(NodeId, PolyBezier)> {
    let id = scene.get(target)?;
    let path = scene
        .node(id)?
        .path_data()
        .map(|d| d.path.clone())
        .ok_or_else(|| AnimError::attribute(format!("{target} is not a path object")))?;
    Ok((id, path))
}

fn replace_path(scene: &mut Scene, id: NodeId, path: PolyBezier) -> AnimResult<()> {
    let data = scene
        .node_mut(id)?
        .path_data_mut()
        .ok_or_else(|| AnimError::attribute(format!("node {id} is not a path object")))?;
    data.path = path;
    Ok(())
}

/// Reveal a path object progressively along its arc length.
///
/// The full path is restored when the timing completes.
pub struct Draw {
    target: Target,
    timing: Timing,
    original: Option<(NodeId, PolyBezier)>,
    finished: bool,
}

impl Draw {
    pub fn new(target: impl Into<Target>) -> Self {
        Self {
            target: target.into(),
            timing: Timing::new(0.0, TransferFn::Linear),
            original: None,
            finished: false,
        }
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.timing = Timing::new(duration, self.timing.transfer());
        self
    }

    pub fn with_transfer(mut self, transfer: TransferFn) -> Self {
        self.timing = Timing::new(self.timing.duration(), transfer);
        self
    }
}

impl Instruction for Draw {
    fn name(&self) -> &str {
        "Draw"
    }

    fn target(&self) -> String {
        self.target.to_string()
    }

    fn start(&mut self, scene: &mut Scene) -> AnimResult<()> {
        self.original = Some(path_node(scene, &self.target)?);
        Ok(())
    }

    fn update(&mut self, scene: &mut Scene, dt: f64) -> AnimResult<f64> {
        let (id, original) = self
            .original
            .as_ref()
            .ok_or_else(|| AnimError::lookup("Draw updated before start"))?;
        let used = self.timing.update(dt);
        // Nothing to reveal on an empty path; it counts as drawn.
        if self.timing.time_left() > 0.0 && !original.is_empty() {
            let (left, _) = original.split(self.timing.alpha())?;
            replace_path(scene, *id, left)?;
        } else {
            replace_path(scene, *id, original.clone())?;
            self.finished = true;
        }
        Ok(used)
    }

    fn finished(&self) -> bool {
        self.finished
    }
}

/// Turn a path object into another path by interpolating control points.
///
/// The path with fewer segments is subdivided first; the final frame adopts `end` exactly.
pub struct Morph {
    target: Target,
    end: PolyBezier,
    timing: Timing,
    state: Option<(NodeId, PolyBezier, PolyBezier)>,
    finished: bool,
}

impl Morph {
    pub fn new(target: impl Into<Target>, end: PolyBezier) -> Self {
        Self {
            target: target.into(),
            end,
            timing: Timing::new(0.0, TransferFn::Linear),
            state: None,
            finished: false,
        }
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.timing = Timing::new(duration, self.timing.transfer());
        self
    }

    pub fn with_transfer(mut self, transfer: TransferFn) -> Self {
        self.timing = Timing::new(self.timing.duration(), transfer);
        self
    }
}

impl Instruction for Morph {
    fn name(&self) -> &str {
        "Morph"
    }

    fn target(&self) -> String {
        self.target.to_string()
    }

    fn start(&mut self, scene: &mut Scene) -> AnimResult<()> {
        let (id, mut from) = path_node(scene, &self.target)?;
        let mut to = self.end.clone().with_arc_samples(from.arc_samples());
        if from.len() < to.len() {
            from.subdivide_to(to.len())?;
        } else if to.len() < from.len() {
            to.subdivide_to(from.len())?;
        }
        self.state = Some((id, from, to));
        Ok(())
    }

    fn update(&mut self, scene: &mut Scene, dt: f64) -> AnimResult<f64> {
        let (id, from, to) = self
            .state
            .as_ref()
            .ok_or_else(|| AnimError::lookup("Morph updated before start"))?;
        let used = self.timing.update(dt);
        if self.timing.time_left() > 0.0 {
            replace_path(scene, *id, from.lerp(to, self.timing.alpha())?)?;
        } else {
            let end = self.end.clone().with_arc_samples(from.arc_samples());
            replace_path(scene, *id, end)?;
            self.finished = true;
        }
        Ok(used)
    }

    fn finished(&self) -> bool {
        self.finished
    }
}

/// Exchange the positions of two objects with a pair of simultaneous [`move_to`]s.
pub struct Swap {
    a: Target,
    b: Target,
    duration: f64,
    transfer: TransferFn,
    inner: Option<InstructionTree>,
}

impl Swap {
    pub fn new(a: impl Into<Target>, b: impl Into<Target>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            duration: 0.0,
            transfer: TransferFn::smooth(),
            inner: None,
        }
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_transfer(mut self, transfer: TransferFn) -> Self {
        self.transfer = transfer;
        self
    }
}

impl Instruction for Swap {
    fn name(&self) -> &str {
        "Swap"
    }

    fn target(&self) -> String {
        format!("{} <-> {}", self.a, self.b)
    }

    fn start(&mut self, scene: &mut Scene) -> AnimResult<()> {
        let pa = scene.node(scene.get(&self.a)?)?.frame.position();
        let pb = scene.node(scene.get(&self.b)?)?.frame.position();
        let step = |t: &Target, p: Vector| {
            move_to(t.clone(), p)
                .with_duration(self.duration)
                .with_transfer(self.transfer)
                .node()
        };
        let mut inner = run_parallel(vec![step(&self.a, pb), step(&self.b, pa)]);
        inner.start(scene)?;
        self.inner = Some(inner);
        Ok(())
    }

    fn update(&mut self, scene: &mut Scene, dt: f64) -> AnimResult<f64> {
        let inner = self
            .inner
            .as_mut()
            .ok_or_else(|| AnimError::lookup("Swap updated before start"))?;
        inner.update(scene, dt)
    }

    fn finished(&self) -> bool {
        self.inner.as_ref().is_some_and(InstructionTree::finished)
    }

    fn frame_changed(&self) -> bool {
        false
    }
}

#[cfg(test)]
#[path = "../../tests/unit/instruction/basic.rs"]
mod tests;
