use std::collections::BTreeMap;
use std::sync::Arc;

use crate::bezier::path::PolyBezier;
use crate::foundation::core::{BoundingBox, Vector};
use crate::foundation::error::{AnimError, AnimResult};
use crate::scene::arena::NodeId;
use crate::scene::attributes::AttrValue;
use crate::transform::frame::CoordinateFrame;

/// RGB colour with components in `[0, 1]`. Serialized as `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `#RGB` (leading `#` optional).
    pub fn from_hex(s: &str) -> AnimResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(AnimError::construction(format!(
                "colour must be ascii hex digits, got {s:?}"
            )));
        }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_owned(),
            _ => {
                return Err(AnimError::construction(format!(
                    "colour must be #RGB or #RRGGBB, got {s:?}"
                )));
            }
        };
        let channel = |i: usize| -> AnimResult<f64> {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map(|v| f64::from(v) / 255.0)
                .map_err(|e| AnimError::construction(format!("invalid colour {s:?}: {e}")))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", q(self.r), q(self.g), q(self.b))
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::rgb(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }
}

impl TryFrom<String> for Color {
    type Error = AnimError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

/// Stroke and fill style of a path node.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Pen {
    pub stroke_color: Color,
    pub stroke_opacity: f64,
    pub stroke_width: f64,
    pub fill_color: Color,
    pub fill_opacity: f64,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            stroke_color: Color::WHITE,
            stroke_opacity: 1.0,
            stroke_width: 1.0,
            fill_color: Color::WHITE,
            fill_opacity: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PathData {
    pub path: PolyBezier,
    pub pen: Pen,
}

/// Raw RGBA8 bitmap placed with its lower-left corner at the internal origin.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageData {
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub rgba: Arc<[u8]>,
    /// Size in scene units.
    pub size: Vector,
    pub opacity: f64,
}

impl ImageData {
    pub fn new(
        pixel_width: u32,
        pixel_height: u32,
        rgba: Vec<u8>,
        size: Vector,
    ) -> AnimResult<Self> {
        let expected = pixel_width as usize * pixel_height as usize * 4;
        if rgba.len() != expected {
            return Err(AnimError::construction(format!(
                "image data has {} bytes, expected {expected} for {pixel_width}x{pixel_height} rgba",
                rgba.len()
            )));
        }
        Ok(Self {
            pixel_width,
            pixel_height,
            rgba: rgba.into(),
            size,
            opacity: 1.0,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraData {
    /// Scene units spanned by the camera frame on each axis.
    pub zoom: Vector,
}

/// Ordered, keyed children of a composite node.
#[derive(Clone, Debug, Default)]
pub struct Children {
    keys: Vec<String>,
    map: BTreeMap<String, NodeId>,
    by_id: BTreeMap<NodeId, String>,
}

impl Children {
    /// Insert under `key`. An existing entry with the same key is replaced and its id returned.
    pub(crate) fn insert(&mut self, key: String, id: NodeId) -> Option<NodeId> {
        let replaced = self.map.insert(key.clone(), id);
        if let Some(old) = replaced {
            self.by_id.remove(&old);
            self.keys.retain(|k| k != &key);
        }
        self.keys.push(key.clone());
        self.by_id.insert(id, key);
        replaced
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<NodeId> {
        let id = self.map.remove(key)?;
        self.by_id.remove(&id);
        self.keys.retain(|k| k != key);
        Some(id)
    }

    pub fn get(&self, key: &str) -> Option<NodeId> {
        self.map.get(key).copied()
    }

    pub fn key_of(&self, id: NodeId) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    /// Keys in draw order, bottom first.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Child ids in draw order, bottom first.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.keys.iter().filter_map(|k| self.map.get(k).copied())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub(crate) fn move_to_end(&mut self, key: &str) -> bool {
        let Some(i) = self.keys.iter().position(|k| k == key) else {
            return false;
        };
        let k = self.keys.remove(i);
        self.keys.push(k);
        true
    }

    pub(crate) fn move_to_front(&mut self, key: &str) -> bool {
        let Some(i) = self.keys.iter().position(|k| k == key) else {
            return false;
        };
        let k = self.keys.remove(i);
        self.keys.insert(0, k);
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Path,
    Image,
    Composite,
    Camera,
}

#[derive(Clone, Debug)]
pub enum NodeData {
    Path(PathData),
    Image(ImageData),
    Composite(Children),
    Camera(CameraData),
}

/// One positioned object in the scene graph.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub frame: CoordinateFrame,
    pub data: NodeData,
    /// Optional clip in the node's internal coordinates.
    pub clip: Option<PolyBezier>,
    props: BTreeMap<String, AttrValue>,
    parent: Option<NodeId>,
}

impl SceneNode {
    fn with_data(data: NodeData) -> Self {
        Self {
            frame: CoordinateFrame::default(),
            data,
            clip: None,
            props: BTreeMap::new(),
            parent: None,
        }
    }

    pub fn path(path: PolyBezier) -> Self {
        Self::with_data(NodeData::Path(PathData {
            path,
            pen: Pen::default(),
        }))
    }

    pub fn path_with_pen(path: PolyBezier, pen: Pen) -> Self {
        Self::with_data(NodeData::Path(PathData { path, pen }))
    }

    pub fn image(image: ImageData) -> Self {
        Self::with_data(NodeData::Image(image))
    }

    pub fn composite() -> Self {
        Self::with_data(NodeData::Composite(Children::default()))
    }

    pub fn camera(zoom: Vector) -> Self {
        Self::with_data(NodeData::Camera(CameraData { zoom }))
    }

    pub fn at(mut self, position: impl Into<Vector>) -> Self {
        self.frame.set_position(position.into());
        self
    }

    pub fn with_clip(mut self, clip: PolyBezier) -> Self {
        self.clip = Some(clip);
        self
    }

    /// Declare an animatable user property with its initial value.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Path(_) => NodeKind::Path,
            NodeData::Image(_) => NodeKind::Image,
            NodeData::Composite(_) => NodeKind::Composite,
            NodeData::Camera(_) => NodeKind::Camera,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    pub fn property(&self, name: &str) -> Option<AttrValue> {
        self.props.get(name).copied()
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.props.contains_key(name)
    }

    pub(crate) fn set_property(&mut self, name: &str, value: AttrValue) -> AnimResult<()> {
        match self.props.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(AnimError::attribute(format!("undeclared property {name:?}"))),
        }
    }

    pub fn children(&self) -> Option<&Children> {
        match &self.data {
            NodeData::Composite(c) => Some(c),
            _ => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Children> {
        match &mut self.data {
            NodeData::Composite(c) => Some(c),
            _ => None,
        }
    }

    pub fn path_data(&self) -> Option<&PathData> {
        match &self.data {
            NodeData::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn path_data_mut(&mut self) -> Option<&mut PathData> {
        match &mut self.data {
            NodeData::Path(p) => Some(p),
            _ => None,
        }
    }

    /// Internal-space box of a leaf node. `None` for composites, whose box depends on children.
    pub fn leaf_bounding_box(&self) -> Option<BoundingBox> {
        match &self.data {
            NodeData::Path(p) => Some(p.path.bounding_box()),
            NodeData::Image(img) => Some(BoundingBox::new(Vector::ZERO, img.size)),
            NodeData::Camera(cam) => {
                let half = cam.zoom * 0.5;
                Some(BoundingBox::new(-half, half))
            }
            NodeData::Composite(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/node.rs"]
mod tests;
