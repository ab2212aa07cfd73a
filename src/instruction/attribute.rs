//! Generic attribute instructions.
//!
//! [`SetAttribute`] writes (or calls) a named attribute every tick for its duration;
//! [`SlideAttribute`] interpolates an attribute from a start value to an end value. Most motion
//! and pivot instructions are thin constructors around these two.

use crate::animation::timing::Timing;
use crate::animation::transfer::TransferFn;
use crate::foundation::error::{AnimError, AnimResult};
use crate::instruction::core::Instruction;
use crate::scene::arena::NodeId;
use crate::scene::attributes::{AttrValue, Attribute};
use crate::scene::graph::{Scene, Target};

/// Produces a value from the scene time before the tick and the instruction's timing.
pub type ValueFn = Box<dyn FnMut(f64, &Timing) -> AnimResult<AttrValue>>;

/// Derives an end value from the value captured at start.
pub type EndFn = Box<dyn FnMut(&AttrValue) -> AnimResult<AttrValue>>;

/// Where a [`SetAttribute`] gets its value from.
pub enum SetValue {
    Fixed(AttrValue),
    Computed(ValueFn),
    /// Invoke a callable attribute instead of assigning.
    Call,
}

fn resolve(scene: &Scene, target: &Target, attr: &str) -> AnimResult<(NodeId, Attribute)> {
    let id = scene.get(target)?;
    let attribute = scene.attribute(id, attr)?;
    Ok((id, attribute))
}

fn unresolved(attr: &str) -> AnimError {
    AnimError::attribute(format!("{attr} updated before start"))
}

/// Assign or call a named attribute of a scene node.
///
/// The target and attribute are resolved once in [`Instruction::start`]. Each update advances
/// the timing, then applies the value; the instruction finishes when the timing completes.
pub struct SetAttribute {
    name: &'static str,
    target: Target,
    attr: String,
    value: SetValue,
    timing: Timing,
    frame_changed: bool,
    resolved: Option<(NodeId, Attribute)>,
    finished: bool,
}

impl SetAttribute {
    fn with_value(target: impl Into<Target>, attr: impl Into<String>, value: SetValue) -> Self {
        Self {
            name: "SetAttribute",
            target: target.into(),
            attr: attr.into(),
            value,
            timing: Timing::new(0.0, TransferFn::Linear),
            frame_changed: true,
            resolved: None,
            finished: false,
        }
    }

    pub fn new(
        target: impl Into<Target>,
        attr: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> Self {
        Self::with_value(target, attr, SetValue::Fixed(value.into()))
    }

    pub fn computed(
        target: impl Into<Target>,
        attr: impl Into<String>,
        f: impl FnMut(f64, &Timing) -> AnimResult<AttrValue> + 'static,
    ) -> Self {
        Self::with_value(target, attr, SetValue::Computed(Box::new(f)))
    }

    /// Call the zero-argument action `attr` once per update.
    pub fn call(target: impl Into<Target>, attr: impl Into<String>) -> Self {
        Self::with_value(target, attr, SetValue::Call)
    }

    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Negative durations run until something else stops the tree.
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.timing = Timing::new(duration, self.timing.transfer());
        self
    }

    pub fn with_transfer(mut self, transfer: TransferFn) -> Self {
        self.timing = Timing::new(self.timing.duration(), transfer);
        self
    }

    pub fn with_frame_changed(mut self, frame_changed: bool) -> Self {
        self.frame_changed = frame_changed;
        self
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }
}

impl Instruction for SetAttribute {
    fn name(&self) -> &str {
        self.name
    }

    fn target(&self) -> String {
        format!("{}.{}", self.target, self.attr)
    }

    fn start(&mut self, scene: &mut Scene) -> AnimResult<()> {
        let (id, attribute) = resolve(scene, &self.target, &self.attr)?;
        match (&self.value, attribute.is_callable()) {
            (SetValue::Call, false) => {
                return Err(AnimError::attribute(format!(
                    "{} is not callable",
                    self.attr
                )));
            }
            (SetValue::Fixed(_) | SetValue::Computed(_), true) => {
                return Err(AnimError::attribute(format!(
                    "{} is an action and takes no value",
                    self.attr
                )));
            }
            _ => {}
        }
        self.resolved = Some((id, attribute));
        Ok(())
    }

    fn update(&mut self, scene: &mut Scene, dt: f64) -> AnimResult<f64> {
        let (id, attribute) = self
            .resolved
            .clone()
            .ok_or_else(|| unresolved(&self.attr))?;
        let used = self.timing.update(dt);
        match &mut self.value {
            SetValue::Fixed(v) => attribute.set(scene, id, *v)?,
            SetValue::Computed(f) => {
                let v = f(scene.time(), &self.timing)?;
                attribute.set(scene, id, v)?;
            }
            SetValue::Call => attribute.call(scene, id)?,
        }
        self.finished = self.timing.is_complete();
        Ok(used)
    }

    fn finished(&self) -> bool {
        self.finished
    }

    fn frame_changed(&self) -> bool {
        self.frame_changed
    }
}

/// End value of a [`SlideAttribute`].
pub enum SlideEnd {
    Value(AttrValue),
    FromStart(EndFn),
}

/// Interpolate a numeric attribute from its start value to an end value.
pub struct SlideAttribute {
    name: &'static str,
    target: Target,
    attr: String,
    end: SlideEnd,
    start_value: Option<AttrValue>,
    relative: bool,
    timing: Timing,
    frame_changed: bool,
    resolved: Option<(NodeId, Attribute)>,
    range: Option<(AttrValue, AttrValue)>,
    finished: bool,
}

impl SlideAttribute {
    fn with_end(target: impl Into<Target>, attr: impl Into<String>, end: SlideEnd) -> Self {
        Self {
            name: "SlideAttribute",
            target: target.into(),
            attr: attr.into(),
            end,
            start_value: None,
            relative: false,
            timing: Timing::new(0.0, TransferFn::smooth()),
            frame_changed: true,
            resolved: None,
            range: None,
            finished: false,
        }
    }

    pub fn new(
        target: impl Into<Target>,
        attr: impl Into<String>,
        end: impl Into<AttrValue>,
    ) -> Self {
        Self::with_end(target, attr, SlideEnd::Value(end.into()))
    }

    /// End value computed from the start value once the slide starts.
    pub fn from_start(
        target: impl Into<Target>,
        attr: impl Into<String>,
        f: impl FnMut(&AttrValue) -> AnimResult<AttrValue> + 'static,
    ) -> Self {
        Self::with_end(target, attr, SlideEnd::FromStart(Box::new(f)))
    }

    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.timing = Timing::new(duration, self.timing.transfer());
        self
    }

    pub fn with_transfer(mut self, transfer: TransferFn) -> Self {
        self.timing = Timing::new(self.timing.duration(), transfer);
        self
    }

    /// Slide from `value` instead of the attribute's value at start.
    pub fn with_start(mut self, value: impl Into<AttrValue>) -> Self {
        self.start_value = Some(value.into());
        self
    }

    /// Treat the end value as an offset from the start value.
    pub fn relative(mut self) -> Self {
        self.relative = true;
        self
    }

    pub fn with_frame_changed(mut self, frame_changed: bool) -> Self {
        self.frame_changed = frame_changed;
        self
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Start and end values, known once started.
    pub fn range(&self) -> Option<(AttrValue, AttrValue)> {
        self.range
    }
}

impl Instruction for SlideAttribute {
    fn name(&self) -> &str {
        self.name
    }

    fn target(&self) -> String {
        format!("{}.{}", self.target, self.attr)
    }

    fn start(&mut self, scene: &mut Scene) -> AnimResult<()> {
        let (id, attribute) = resolve(scene, &self.target, &self.attr)?;
        let start = match self.start_value {
            Some(v) => v,
            None => attribute.get(scene, id)?,
        };
        let mut end = match &mut self.end {
            SlideEnd::Value(v) => *v,
            SlideEnd::FromStart(f) => f(&start)?,
        };
        if self.relative {
            end = start.offset_by(&end)?;
        }
        // Catch kind mismatches before the first frame.
        start.lerp(&end, 0.0)?;
        self.range = Some((start, end));
        self.resolved = Some((id, attribute));
        Ok(())
    }

    fn update(&mut self, scene: &mut Scene, dt: f64) -> AnimResult<f64> {
        let (id, attribute) = self
            .resolved
            .clone()
            .ok_or_else(|| unresolved(&self.attr))?;
        let (start, end) = self.range.ok_or_else(|| unresolved(&self.attr))?;
        let used = self.timing.update(dt);
        attribute.set(scene, id, start.lerp(&end, self.timing.alpha())?)?;
        self.finished = self.timing.is_complete();
        Ok(used)
    }

    fn finished(&self) -> bool {
        self.finished
    }

    fn frame_changed(&self) -> bool {
        self.frame_changed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/instruction/attribute.rs"]
mod tests;
