use std::io::Read;
use std::path::Path;

use crate::foundation::core::Vector;
use crate::foundation::error::{AnimError, AnimResult};
use crate::scene::graph::Scene;

/// Camera, timing and sampling settings for one engine run.
///
/// Every field has a default, so a JSON config only needs the fields it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Scene units visible across the frame.
    pub width: f64,
    /// Frame width over frame height.
    pub aspect_ratio: f64,
    /// Frames per second; each tick advances the scene by `1 / frame_rate`.
    pub frame_rate: f64,
    /// Pixels per scene unit.
    pub dpi: f64,
    /// Emit frames to the backend. Disabled runs still advance the scene.
    pub render: bool,
    /// Arc-length table resolution for paths created through the scene.
    pub arc_length_samples: usize,
    /// Stop after this many frames even if instructions are still running.
    pub max_frames: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 16.0,
            aspect_ratio: 16.0 / 9.0,
            frame_rate: 60.0,
            dpi: 120.0,
            render: true,
            arc_length_samples: 30_000,
            max_frames: None,
        }
    }
}

fn even_ceil(x: f64) -> u32 {
    let n = x.ceil().max(0.0) as u32;
    n + n % 2
}

impl EngineConfig {
    pub fn dt(&self) -> f64 {
        1.0 / self.frame_rate
    }

    pub fn frame_height(&self) -> f64 {
        self.width / self.aspect_ratio
    }

    /// Output size in pixels, rounded up to even dimensions for video sinks.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            even_ceil(self.width * self.dpi),
            even_ceil(self.frame_height() * self.dpi),
        )
    }

    /// An empty scene whose camera frames `width x frame_height` scene units.
    pub fn scene(&self) -> Scene {
        Scene::with_camera(
            Vector::xy(self.width, self.frame_height()),
            self.arc_length_samples,
        )
    }

    pub fn validate(&self) -> AnimResult<()> {
        let positive = [
            ("frame_rate", self.frame_rate),
            ("width", self.width),
            ("aspect_ratio", self.aspect_ratio),
            ("dpi", self.dpi),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(AnimError::config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.arc_length_samples == 0 {
            return Err(AnimError::config("arc_length_samples must be non-zero"));
        }
        Ok(())
    }

    pub fn from_reader(reader: impl Read) -> AnimResult<Self> {
        let cfg: Self =
            serde_json::from_reader(reader).map_err(|e| AnimError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(json: &str) -> AnimResult<Self> {
        Self::from_reader(json.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> AnimResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| AnimError::config(format!("open {}: {e}", path.display())))?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/config.rs"]
mod tests;
