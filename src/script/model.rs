use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::animation::transfer::TransferFn;
use crate::foundation::error::{AnimError, AnimResult};
use crate::scene::attributes::AttrValue;
use crate::scene::graph::Target;
use crate::scene::node::Pen;

/// A complete animation: the initial scene and the timeline played against it.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Script {
    #[serde(default)]
    pub objects: Vec<ObjectDef>,
    /// Steps run one after another.
    #[serde(default)]
    pub timeline: Vec<StepDef>,
}

impl Script {
    pub fn from_reader(reader: impl Read) -> AnimResult<Self> {
        serde_json::from_reader(reader).map_err(|e| AnimError::serde(e.to_string()))
    }

    pub fn from_json_str(json: &str) -> AnimResult<Self> {
        serde_json::from_str(json).map_err(|e| AnimError::serde(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> AnimResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            AnimError::Other(anyhow::Error::new(e).context(format!("open {}", path.display())))
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Objects including composite children.
    pub fn object_count(&self) -> usize {
        self.objects.iter().map(ObjectDef::count).sum()
    }

    /// Leaf steps, not counting `sequential` / `parallel` groups.
    pub fn step_count(&self) -> usize {
        self.timeline.iter().map(StepDef::count).sum()
    }
}

/// One scene object, keyed under its parent.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ObjectDef {
    pub key: String,
    #[serde(flatten)]
    pub shape: ShapeDef,
    #[serde(default)]
    pub position: [f64; 2],
    /// Radians.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub scale: Option<[f64; 2]>,
    #[serde(default)]
    pub pen: Option<Pen>,
    /// Extra animatable values, addressable by `set` and `slide` steps.
    #[serde(default)]
    pub properties: BTreeMap<String, AttrValue>,
}

impl ObjectDef {
    fn count(&self) -> usize {
        match &self.shape {
            ShapeDef::Composite { children } => 1 + children.iter().map(Self::count).sum::<usize>(),
            _ => 1,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeDef {
    Rectangle {
        size: [f64; 2],
    },
    Circle {
        radius: f64,
    },
    Line {
        from: [f64; 2],
        to: [f64; 2],
    },
    Polyline {
        points: Vec<[f64; 2]>,
        #[serde(default)]
        smooth: bool,
    },
    /// SVG path data; y is flipped so the drawing keeps its orientation.
    SvgPath {
        d: String,
        #[serde(default = "one")]
        scale: f64,
    },
    Composite {
        #[serde(default)]
        children: Vec<ObjectDef>,
    },
}

fn one() -> f64 {
    1.0
}

fn two() -> f64 {
    2.0
}

fn whole_path() -> [f64; 2] {
    [0.0, 1.0]
}

/// A key (`"a"`) or a key path (`["group", "a"]`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum TargetDef {
    Key(String),
    Path(Vec<String>),
}

impl From<&TargetDef> for Target {
    fn from(def: &TargetDef) -> Self {
        match def {
            TargetDef::Key(k) => Target::key(k.clone()),
            TargetDef::Path(p) => Target::Path(p.clone()),
        }
    }
}

/// One timeline entry. `duration` defaults to 0 and `transfer` to the step's own default.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepDef {
    Sequential {
        steps: Vec<StepDef>,
    },
    Parallel {
        steps: Vec<StepDef>,
    },
    Wait {
        duration: f64,
    },
    MoveTo {
        target: TargetDef,
        to: [f64; 2],
        #[serde(default)]
        duration: f64,
        #[serde(default)]
        transfer: Option<TransferFn>,
    },
    MoveBy {
        target: TargetDef,
        by: [f64; 2],
        #[serde(default)]
        duration: f64,
        #[serde(default)]
        transfer: Option<TransferFn>,
    },
    Rotate {
        target: TargetDef,
        angle: f64,
        #[serde(default)]
        duration: f64,
        #[serde(default)]
        transfer: Option<TransferFn>,
    },
    Scale {
        target: TargetDef,
        x: f64,
        #[serde(default)]
        y: Option<f64>,
        #[serde(default)]
        duration: f64,
        #[serde(default)]
        transfer: Option<TransferFn>,
    },
    Emphasize {
        target: TargetDef,
        #[serde(default = "two")]
        mult: f64,
        #[serde(default)]
        duration: f64,
    },
    Swap {
        a: TargetDef,
        b: TargetDef,
        #[serde(default)]
        duration: f64,
        #[serde(default)]
        transfer: Option<TransferFn>,
    },
    Draw {
        target: TargetDef,
        #[serde(default)]
        duration: f64,
    },
    FollowPath {
        target: TargetDef,
        /// SVG path data of the route.
        path: String,
        #[serde(default = "whole_path")]
        end_points: [f64; 2],
        #[serde(default)]
        duration: f64,
        #[serde(default)]
        transfer: Option<TransferFn>,
    },
    Set {
        target: TargetDef,
        attribute: String,
        value: AttrValue,
    },
    Slide {
        target: TargetDef,
        attribute: String,
        to: AttrValue,
        #[serde(default)]
        from: Option<AttrValue>,
        #[serde(default)]
        relative: bool,
        #[serde(default)]
        duration: f64,
        #[serde(default)]
        transfer: Option<TransferFn>,
    },
    BringToTop {
        target: TargetDef,
    },
    Remove {
        target: TargetDef,
    },
}

impl StepDef {
    fn count(&self) -> usize {
        match self {
            StepDef::Sequential { steps } | StepDef::Parallel { steps } => {
                steps.iter().map(Self::count).sum()
            }
            _ => 1,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/model.rs"]
mod tests;
