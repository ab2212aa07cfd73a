use crate::foundation::core::{Affine, BezPath, Vector};
use crate::foundation::error::AnimResult;
use crate::scene::arena::NodeId;
use crate::scene::graph::Scene;
use crate::scene::node::{ImageData, NodeData, Pen};

/// Drawing surface the scene renders into.
///
/// Transforms map a node's internal coordinates to scene coordinates. Mapping scene coordinates
/// to pixels through the camera is the implementor's job.
pub trait Canvas {
    fn draw_path(&mut self, transform: Affine, path: &BezPath, pen: &Pen) -> AnimResult<()>;

    fn draw_image(&mut self, transform: Affine, image: &ImageData) -> AnimResult<()>;

    /// Restrict drawing to `clip` until the matching [`Canvas::pop_clip`].
    fn push_clip(&mut self, _transform: Affine, _clip: &BezPath) -> AnimResult<()> {
        Ok(())
    }

    fn pop_clip(&mut self) -> AnimResult<()> {
        Ok(())
    }
}

/// Where the camera looks, in scene units.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraView {
    pub center: Vector,
    pub size: Vector,
    pub rotation: f64,
}

impl Scene {
    /// Draw every attached node in z-order, bottom first.
    pub fn render(&self, canvas: &mut dyn Canvas) -> AnimResult<()> {
        let root = self.root();
        let base = self.world_transform(root)?;
        for child in self.children_of(root)? {
            self.render_node(child, base, canvas)?;
        }
        Ok(())
    }

    fn render_node(&self, id: NodeId, parent: Affine, canvas: &mut dyn Canvas) -> AnimResult<()> {
        let node = self.node(id)?;
        let m = parent * node.frame.transform_matrix();
        if let Some(clip) = &node.clip {
            canvas.push_clip(m, &clip.to_bez_path())?;
        }
        match &node.data {
            NodeData::Path(p) => {
                if !p.path.is_empty() {
                    canvas.draw_path(m, &p.path.to_bez_path(), &p.pen)?;
                }
            }
            NodeData::Image(img) => canvas.draw_image(m, img)?,
            NodeData::Composite(children) => {
                for child in children.ids() {
                    self.render_node(child, m, canvas)?;
                }
            }
            NodeData::Camera(_) => {}
        }
        if node.clip.is_some() {
            canvas.pop_clip()?;
        }
        Ok(())
    }

    pub fn camera_view(&self) -> AnimResult<CameraView> {
        let cam = self.node(self.camera())?;
        let size = match &cam.data {
            NodeData::Camera(c) => c.zoom,
            _ => Vector::ZERO,
        };
        Ok(CameraView {
            center: cam.frame.position(),
            size,
            rotation: cam.frame.rotation_angle(),
        })
    }
}

/// One recorded drawing command. Transforms are kurbo affine coefficients.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DisplayItem {
    Path {
        transform: [f64; 6],
        /// SVG path data in scene units, y-up.
        d: String,
        pen: Pen,
    },
    Image {
        transform: [f64; 6],
        pixel_width: u32,
        pixel_height: u32,
        size: Vector,
        opacity: f64,
    },
    PushClip {
        transform: [f64; 6],
        d: String,
    },
    PopClip,
}

/// Backend-agnostic record of a rendered frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DisplayList {
    pub camera: CameraView,
    pub items: Vec<DisplayItem>,
}

impl DisplayList {
    pub fn record(scene: &Scene) -> AnimResult<Self> {
        let mut list = DisplayList {
            camera: scene.camera_view()?,
            items: Vec::new(),
        };
        scene.render(&mut list)?;
        Ok(list)
    }

    pub fn path_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i, DisplayItem::Path { .. }))
            .count()
    }
}

impl Canvas for DisplayList {
    fn draw_path(&mut self, transform: Affine, path: &BezPath, pen: &Pen) -> AnimResult<()> {
        self.items.push(DisplayItem::Path {
            transform: transform.as_coeffs(),
            d: path.to_svg(),
            pen: *pen,
        });
        Ok(())
    }

    fn draw_image(&mut self, transform: Affine, image: &ImageData) -> AnimResult<()> {
        self.items.push(DisplayItem::Image {
            transform: transform.as_coeffs(),
            pixel_width: image.pixel_width,
            pixel_height: image.pixel_height,
            size: image.size,
            opacity: image.opacity,
        });
        Ok(())
    }

    fn push_clip(&mut self, transform: Affine, clip: &BezPath) -> AnimResult<()> {
        self.items.push(DisplayItem::PushClip {
            transform: transform.as_coeffs(),
            d: clip.to_svg(),
        });
        Ok(())
    }

    fn pop_clip(&mut self) -> AnimResult<()> {
        self.items.push(DisplayItem::PopClip);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/render.rs"]
mod tests;
