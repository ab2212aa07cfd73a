use crate::animation::transfer::TransferFn;
use crate::bezier::path::PolyBezier;
use crate::foundation::core::Vector;
use crate::foundation::error::AnimResult;
use crate::instruction::attribute::{SetAttribute, SlideAttribute};
use crate::instruction::basic::{
    BringToTop, Draw, RemoveObject, Swap, Wait, emphasize, follow_path, move_by, move_to, rotate,
    scale,
};
use crate::instruction::core::{Instruction, InstructionNode, run_parallel, run_sequential};
use crate::scene::arena::NodeId;
use crate::scene::graph::{Scene, Target};
use crate::scene::node::{NodeData, SceneNode};
use crate::scene::shapes;
use crate::script::model::{ObjectDef, Script, ShapeDef, StepDef};

impl Script {
    /// Add the script's objects to `scene` and compile the timeline.
    ///
    /// Nothing in the timeline runs yet; the returned nodes are meant for
    /// [`Engine::run`](crate::engine::runner::Engine::run).
    #[tracing::instrument(skip_all, fields(objects = self.objects.len(), steps = self.timeline.len()))]
    pub fn build(&self, scene: &mut Scene) -> AnimResult<Vec<InstructionNode>> {
        let root = scene.root();
        for def in &self.objects {
            add_object(scene, def, root)?;
        }
        let timeline = self
            .timeline
            .iter()
            .map(compile_step)
            .collect::<AnimResult<Vec<_>>>()?;
        tracing::debug!(nodes = scene.node_count(), "script built");
        Ok(timeline)
    }
}

fn shape_node(shape: &ShapeDef) -> AnimResult<SceneNode> {
    Ok(match shape {
        ShapeDef::Rectangle { size } => shapes::rectangle(*size)?,
        ShapeDef::Circle { radius } => shapes::circle(*radius)?,
        ShapeDef::Line { from, to } => shapes::line(*from, *to)?,
        ShapeDef::Polyline { points, smooth } => {
            let points: Vec<Vector> = points.iter().copied().map(Vector::from).collect();
            shapes::polyline(&points, *smooth)?
        }
        ShapeDef::SvgPath { d, scale } => SceneNode::path(PolyBezier::from_svg_path(d, *scale)?),
        ShapeDef::Composite { .. } => SceneNode::composite(),
    })
}

fn add_object(scene: &mut Scene, def: &ObjectDef, parent: NodeId) -> AnimResult<NodeId> {
    let mut node = shape_node(&def.shape)?.at(def.position);
    node.frame.set_rotation_angle(def.rotation);
    if let Some([x, y]) = def.scale {
        node.frame.set_scale(Vector::new(x, y, 1.0));
    }
    if let (Some(pen), NodeData::Path(data)) = (def.pen, &mut node.data) {
        data.pen = pen;
    }
    for (name, value) in &def.properties {
        node = node.with_property(name.clone(), *value);
    }
    let id = scene.create(node);
    scene.attach_to(id, parent, Some(&def.key), false)?;
    if let ShapeDef::Composite { children } = &def.shape {
        for child in children {
            add_object(scene, child, id)?;
        }
    }
    Ok(id)
}

fn with_transfer(slide: SlideAttribute, transfer: &Option<TransferFn>) -> SlideAttribute {
    match transfer {
        Some(t) => slide.with_transfer(*t),
        None => slide,
    }
}

fn compile_step(step: &StepDef) -> AnimResult<InstructionNode> {
    Ok(match step {
        StepDef::Sequential { steps } => run_sequential(compile_all(steps)?).node(),
        StepDef::Parallel { steps } => run_parallel(compile_all(steps)?).node(),
        StepDef::Wait { duration } => Wait::new(*duration).node(),
        StepDef::MoveTo {
            target,
            to,
            duration,
            transfer,
        } => with_transfer(move_to(target, *to).with_duration(*duration), transfer).node(),
        StepDef::MoveBy {
            target,
            by,
            duration,
            transfer,
        } => with_transfer(move_by(target, *by).with_duration(*duration), transfer).node(),
        StepDef::Rotate {
            target,
            angle,
            duration,
            transfer,
        } => with_transfer(rotate(target, *angle).with_duration(*duration), transfer).node(),
        StepDef::Scale {
            target,
            x,
            y,
            duration,
            transfer,
        } => with_transfer(scale(target, *x, *y).with_duration(*duration), transfer).node(),
        StepDef::Emphasize {
            target,
            mult,
            duration,
        } => emphasize(target, *mult).with_duration(*duration).node(),
        StepDef::Swap {
            a,
            b,
            duration,
            transfer,
        } => {
            let swap = Swap::new(a, b).with_duration(*duration);
            match transfer {
                Some(t) => swap.with_transfer(*t).node(),
                None => swap.node(),
            }
        }
        StepDef::Draw { target, duration } => Draw::new(target).with_duration(*duration).node(),
        StepDef::FollowPath {
            target,
            path,
            end_points,
            duration,
            transfer,
        } => {
            let route = PolyBezier::from_svg_path(path, 1.0)?;
            let step = follow_path(target, route, *end_points).with_duration(*duration);
            match transfer {
                Some(t) => step.with_transfer(*t).node(),
                None => step.node(),
            }
        }
        StepDef::Set {
            target,
            attribute,
            value,
        } => SetAttribute::new(target, attribute.clone(), *value).node(),
        StepDef::Slide {
            target,
            attribute,
            to,
            from,
            relative,
            duration,
            transfer,
        } => {
            let mut slide =
                SlideAttribute::new(target, attribute.clone(), *to).with_duration(*duration);
            if let Some(from) = from {
                slide = slide.with_start(*from);
            }
            if *relative {
                slide = slide.relative();
            }
            with_transfer(slide, transfer).node()
        }
        StepDef::BringToTop { target } => BringToTop::new(Target::from(target)).node(),
        StepDef::Remove { target } => RemoveObject::new(Target::from(target)).node(),
    })
}

fn compile_all(steps: &[StepDef]) -> AnimResult<Vec<InstructionNode>> {
    steps.iter().map(compile_step).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/script/build.rs"]
mod tests;
