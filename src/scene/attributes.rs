//! Named, animatable attributes of scene nodes.
//!
//! Every node kind registers a static table of getter/setter pairs and zero-argument actions.
//! Instructions address attributes by name and resolve them once through [`Scene::attribute`].

use crate::foundation::core::Vector;
use crate::foundation::error::{AnimError, AnimResult};
use crate::scene::arena::NodeId;
use crate::scene::graph::Scene;
use crate::scene::node::{Color, NodeData, NodeKind, SceneNode};

/// Value carried by an attribute.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawValue", into = "RawValue")]
pub enum AttrValue {
    Scalar(f64),
    Vector(Vector),
    Color(Color),
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum RawValue {
    Scalar(f64),
    Vector(Vec<f64>),
    Color(Color),
}

impl TryFrom<RawValue> for AttrValue {
    type Error = AnimError;

    fn try_from(raw: RawValue) -> Result<Self, Self::Error> {
        Ok(match raw {
            RawValue::Scalar(v) => AttrValue::Scalar(v),
            RawValue::Vector(v) => AttrValue::Vector(Vector::from_slice(&v)?),
            RawValue::Color(c) => AttrValue::Color(c),
        })
    }
}

impl From<AttrValue> for RawValue {
    fn from(value: AttrValue) -> Self {
        match value {
            AttrValue::Scalar(v) => RawValue::Scalar(v),
            AttrValue::Vector(v) => RawValue::Vector(v.to_array().to_vec()),
            AttrValue::Color(c) => RawValue::Color(c),
        }
    }
}

impl AttrValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            AttrValue::Scalar(_) => "scalar",
            AttrValue::Vector(_) => "vector",
            AttrValue::Color(_) => "color",
        }
    }

    pub fn as_scalar(&self) -> AnimResult<f64> {
        match *self {
            AttrValue::Scalar(v) => Ok(v),
            other => Err(mismatch("scalar", other)),
        }
    }

    /// Vectors pass through; a scalar `s` widens to `[s, s]`.
    pub fn as_vector(&self) -> AnimResult<Vector> {
        match *self {
            AttrValue::Vector(v) => Ok(v),
            AttrValue::Scalar(s) => Ok(Vector::xy(s, s)),
            other => Err(mismatch("vector", other)),
        }
    }

    pub fn as_color(&self) -> AnimResult<Color> {
        match *self {
            AttrValue::Color(c) => Ok(c),
            other => Err(mismatch("color", other)),
        }
    }

    /// Interpolate towards `end`. Both values must be of the same kind.
    pub fn lerp(&self, end: &AttrValue, t: f64) -> AnimResult<AttrValue> {
        Ok(match (*self, *end) {
            (AttrValue::Scalar(a), AttrValue::Scalar(b)) => AttrValue::Scalar(a + (b - a) * t),
            (AttrValue::Vector(a), AttrValue::Vector(b)) => AttrValue::Vector(a.lerp(b, t)),
            (AttrValue::Vector(a), AttrValue::Scalar(_)) => {
                AttrValue::Vector(a.lerp(end.as_vector()?, t))
            }
            (AttrValue::Color(a), AttrValue::Color(b)) => AttrValue::Color(a.lerp(b, t)),
            (_, other) => return Err(mismatch(self.kind_name(), other)),
        })
    }

    /// Offset used by relative slides: `self + delta`.
    pub fn offset_by(&self, delta: &AttrValue) -> AnimResult<AttrValue> {
        Ok(match (*self, *delta) {
            (AttrValue::Scalar(a), AttrValue::Scalar(b)) => AttrValue::Scalar(a + b),
            (AttrValue::Vector(a), AttrValue::Vector(b)) => AttrValue::Vector(a + b),
            (AttrValue::Vector(a), AttrValue::Scalar(_)) => {
                AttrValue::Vector(a + delta.as_vector()?)
            }
            (AttrValue::Color(a), AttrValue::Color(b)) => {
                AttrValue::Color(Color::rgb(a.r + b.r, a.g + b.g, a.b + b.b))
            }
            (_, other) => return Err(mismatch(self.kind_name(), other)),
        })
    }
}

fn mismatch(expected: &str, got: AttrValue) -> AnimError {
    AnimError::attribute(format!("expected a {expected} value, got {}", got.kind_name()))
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Scalar(v)
    }
}

impl From<Vector> for AttrValue {
    fn from(v: Vector) -> Self {
        AttrValue::Vector(v)
    }
}

impl From<[f64; 2]> for AttrValue {
    fn from(v: [f64; 2]) -> Self {
        AttrValue::Vector(v.into())
    }
}

impl From<Color> for AttrValue {
    fn from(c: Color) -> Self {
        AttrValue::Color(c)
    }
}

pub type Getter = fn(&Scene, NodeId) -> AnimResult<AttrValue>;
pub type Setter = fn(&mut Scene, NodeId, AttrValue) -> AnimResult<()>;
pub type Action = fn(&mut Scene, NodeId) -> AnimResult<()>;

/// A resolved attribute handle.
#[derive(Clone, Debug)]
pub enum Attribute {
    Value {
        name: &'static str,
        get: Getter,
        set: Setter,
    },
    /// Zero-argument callable such as `about_center`.
    Action { name: &'static str, call: Action },
    /// User-declared property stored on the node.
    Property(String),
}

impl Attribute {
    pub fn name(&self) -> &str {
        match self {
            Attribute::Value { name, .. } | Attribute::Action { name, .. } => *name,
            Attribute::Property(name) => name.as_str(),
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Attribute::Action { .. })
    }

    pub fn get(&self, scene: &Scene, id: NodeId) -> AnimResult<AttrValue> {
        match self {
            Attribute::Value { get, .. } => get(scene, id),
            Attribute::Action { name, .. } => Err(AnimError::attribute(format!(
                "{name} is an action and has no value"
            ))),
            Attribute::Property(name) => scene
                .node(id)?
                .property(name)
                .ok_or_else(|| AnimError::attribute(format!("undeclared property {name:?}"))),
        }
    }

    pub fn set(&self, scene: &mut Scene, id: NodeId, value: AttrValue) -> AnimResult<()> {
        match self {
            Attribute::Value { set, .. } => set(scene, id, value),
            Attribute::Action { name, .. } => Err(AnimError::attribute(format!(
                "{name} is an action and cannot be assigned"
            ))),
            Attribute::Property(name) => scene.node_mut(id)?.set_property(name, value),
        }
    }

    pub fn call(&self, scene: &mut Scene, id: NodeId) -> AnimResult<()> {
        match self {
            Attribute::Action { call, .. } => call(scene, id),
            other => Err(AnimError::attribute(format!(
                "{} is not callable",
                other.name()
            ))),
        }
    }
}

struct Entry {
    name: &'static str,
    attr: fn(&'static str) -> Attribute,
}

macro_rules! value {
    ($name:literal, $get:expr, $set:expr) => {
        Entry {
            name: $name,
            attr: |name| Attribute::Value {
                name,
                get: $get,
                set: $set,
            },
        }
    };
}

macro_rules! action {
    ($name:literal, $call:expr) => {
        Entry {
            name: $name,
            attr: |name| Attribute::Action { name, call: $call },
        }
    };
}

const COMMON: &[Entry] = &[
    value!(
        "position",
        |s, id| Ok(s.node(id)?.frame.position().into()),
        |s, id, v| {
            let p = v.as_vector()?;
            s.node_mut(id)?.frame.set_position(p);
            Ok(())
        }
    ),
    value!(
        "about_point",
        |s, id| Ok(s.node(id)?.frame.about_point().into()),
        |s, id, v| {
            let p = v.as_vector()?;
            s.node_mut(id)?.frame.set_about_point(p);
            Ok(())
        }
    ),
    value!(
        "rotation_angle",
        |s, id| Ok(s.node(id)?.frame.rotation_angle().into()),
        |s, id, v| {
            let a = v.as_scalar()?;
            s.node_mut(id)?.frame.set_rotation_angle(a);
            Ok(())
        }
    ),
    value!(
        "scale",
        |s, id| Ok(s.node(id)?.frame.scale().into()),
        |s, id, v| {
            let k = v.as_vector()?;
            s.node_mut(id)?.frame.set_scale(k);
            Ok(())
        }
    ),
    action!("about_center", |s, id| s.about_center(id)),
    action!("about_left", |s, id| s.about_left(id)),
    action!("about_right", |s, id| s.about_right(id)),
    action!("about_upper", |s, id| s.about_upper(id)),
    action!("about_lower", |s, id| s.about_lower(id)),
];

fn pen_scalar(
    s: &mut Scene,
    id: NodeId,
    v: AttrValue,
    apply: fn(&mut crate::scene::node::Pen, f64),
) -> AnimResult<()> {
    let x = v.as_scalar()?;
    let data = s
        .node_mut(id)?
        .path_data_mut()
        .ok_or_else(|| AnimError::attribute("pen attributes need a path node"))?;
    apply(&mut data.pen, x);
    Ok(())
}

fn pen_color(
    s: &mut Scene,
    id: NodeId,
    v: AttrValue,
    apply: fn(&mut crate::scene::node::Pen, Color),
) -> AnimResult<()> {
    let c = v.as_color()?;
    let data = s
        .node_mut(id)?
        .path_data_mut()
        .ok_or_else(|| AnimError::attribute("pen attributes need a path node"))?;
    apply(&mut data.pen, c);
    Ok(())
}

fn pen_of(s: &Scene, id: NodeId) -> AnimResult<crate::scene::node::Pen> {
    s.node(id)?
        .path_data()
        .map(|d| d.pen)
        .ok_or_else(|| AnimError::attribute("pen attributes need a path node"))
}

const PATH: &[Entry] = &[
    value!(
        "stroke_opacity",
        |s, id| Ok(pen_of(s, id)?.stroke_opacity.into()),
        |s, id, v| pen_scalar(s, id, v, |p, x| p.stroke_opacity = x)
    ),
    value!(
        "stroke_width",
        |s, id| Ok(pen_of(s, id)?.stroke_width.into()),
        |s, id, v| pen_scalar(s, id, v, |p, x| p.stroke_width = x)
    ),
    value!(
        "fill_opacity",
        |s, id| Ok(pen_of(s, id)?.fill_opacity.into()),
        |s, id, v| pen_scalar(s, id, v, |p, x| p.fill_opacity = x)
    ),
    value!(
        "stroke_color",
        |s, id| Ok(pen_of(s, id)?.stroke_color.into()),
        |s, id, v| pen_color(s, id, v, |p, c| p.stroke_color = c)
    ),
    value!(
        "fill_color",
        |s, id| Ok(pen_of(s, id)?.fill_color.into()),
        |s, id, v| pen_color(s, id, v, |p, c| p.fill_color = c)
    ),
];

const IMAGE: &[Entry] = &[value!(
    "opacity",
    |s, id| match &s.node(id)?.data {
        NodeData::Image(img) => Ok(img.opacity.into()),
        _ => Err(AnimError::attribute("opacity needs an image node")),
    },
    |s, id, v| {
        let x = v.as_scalar()?;
        match &mut s.node_mut(id)?.data {
            NodeData::Image(img) => {
                img.opacity = x;
                Ok(())
            }
            _ => Err(AnimError::attribute("opacity needs an image node")),
        }
    }
)];

const CAMERA: &[Entry] = &[value!(
    "zoom",
    |s, id| match &s.node(id)?.data {
        NodeData::Camera(cam) => Ok(cam.zoom.into()),
        _ => Err(AnimError::attribute("zoom needs the camera node")),
    },
    |s, id, v| {
        let z = v.as_vector()?;
        match &mut s.node_mut(id)?.data {
            NodeData::Camera(cam) => {
                cam.zoom = z;
                Ok(())
            }
            _ => Err(AnimError::attribute("zoom needs the camera node")),
        }
    }
)];

fn table(kind: NodeKind) -> &'static [Entry] {
    match kind {
        NodeKind::Path => PATH,
        NodeKind::Image => IMAGE,
        NodeKind::Camera => CAMERA,
        NodeKind::Composite => &[],
    }
}

/// Resolve `name` on `node`: declared properties first, then the kind table, then common entries.
pub(crate) fn resolve(node: &SceneNode, name: &str) -> Option<Attribute> {
    if node.has_property(name) {
        return Some(Attribute::Property(name.to_owned()));
    }
    table(node.kind())
        .iter()
        .chain(COMMON)
        .find(|e| e.name == name)
        .map(|e| (e.attr)(e.name))
}

/// Names an attribute table exposes for `kind`, without user properties.
pub fn attribute_names(kind: NodeKind) -> Vec<&'static str> {
    table(kind).iter().chain(COMMON).map(|e| e.name).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/attributes.rs"]
mod tests;
