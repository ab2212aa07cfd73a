//! Frame sinks.
//!
//! The engine hands every emitted frame to a [`Backend`] together with the scene. Backends decide
//! what a frame becomes: nothing, a recorded [`DisplayList`], a JSON line, or pixels in an
//! external renderer.

use std::io::Write;
use std::sync::Arc;

use crate::engine::config::EngineConfig;
use crate::foundation::error::{AnimError, AnimResult};
use crate::scene::graph::Scene;
use crate::scene::render::DisplayList;

/// Position of one emitted frame in the run.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameInfo {
    pub index: u64,
    /// Scene time in seconds when the frame was taken.
    pub time: f64,
    /// Whether any instruction dirtied the scene since the previous frame.
    pub changed: bool,
}

pub trait Backend {
    fn start(&mut self, _config: &EngineConfig) -> AnimResult<()> {
        Ok(())
    }

    fn add_frame(&mut self, info: &FrameInfo, scene: &Scene) -> AnimResult<()>;

    /// No more frames will follow.
    fn end(&mut self) -> AnimResult<()> {
        Ok(())
    }
}

impl<B: Backend + ?Sized> Backend for &mut B {
    fn start(&mut self, config: &EngineConfig) -> AnimResult<()> {
        (**self).start(config)
    }

    fn add_frame(&mut self, info: &FrameInfo, scene: &Scene) -> AnimResult<()> {
        (**self).add_frame(info, scene)
    }

    fn end(&mut self) -> AnimResult<()> {
        (**self).end()
    }
}

/// Counts frames and discards them.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullBackend {
    pub frames: u64,
}

impl Backend for NullBackend {
    fn add_frame(&mut self, _info: &FrameInfo, _scene: &Scene) -> AnimResult<()> {
        self.frames += 1;
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct RecordedFrame {
    pub info: FrameInfo,
    pub list: Arc<DisplayList>,
}

/// Keeps a display list per frame. Unchanged frames share the previous list.
#[derive(Clone, Debug, Default)]
pub struct DisplayListBackend {
    frames: Vec<RecordedFrame>,
    recorded: usize,
    ended: bool,
}

impl DisplayListBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    /// Number of frames that were actually re-recorded from the scene.
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    fn list_for(&mut self, info: &FrameInfo, scene: &Scene) -> AnimResult<Arc<DisplayList>> {
        if !info.changed
            && let Some(last) = self.frames.last()
        {
            return Ok(Arc::clone(&last.list));
        }
        self.recorded += 1;
        Ok(Arc::new(DisplayList::record(scene)?))
    }
}

impl Backend for DisplayListBackend {
    fn start(&mut self, _config: &EngineConfig) -> AnimResult<()> {
        self.frames.clear();
        self.recorded = 0;
        self.ended = false;
        Ok(())
    }

    fn add_frame(&mut self, info: &FrameInfo, scene: &Scene) -> AnimResult<()> {
        let list = self.list_for(info, scene)?;
        self.frames.push(RecordedFrame { info: *info, list });
        Ok(())
    }

    fn end(&mut self) -> AnimResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[derive(serde::Serialize)]
struct FrameLine<'a> {
    frame: u64,
    time: f64,
    changed: bool,
    display: &'a DisplayList,
}

/// Writes one JSON object per frame, newline separated.
pub struct JsonLinesBackend<W: Write> {
    out: W,
    last: Option<DisplayList>,
}

impl<W: Write> JsonLinesBackend<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn io_error(e: std::io::Error) -> AnimError {
    AnimError::Other(anyhow::Error::new(e).context("write frame"))
}

impl<W: Write> Backend for JsonLinesBackend<W> {
    fn add_frame(&mut self, info: &FrameInfo, scene: &Scene) -> AnimResult<()> {
        let list = match self.last.take() {
            Some(list) if !info.changed => list,
            _ => DisplayList::record(scene)?,
        };
        let line = FrameLine {
            frame: info.index,
            time: info.time,
            changed: info.changed,
            display: &list,
        };
        serde_json::to_writer(&mut self.out, &line).map_err(|e| AnimError::serde(e.to_string()))?;
        self.out.write_all(b"\n").map_err(io_error)?;
        self.last = Some(list);
        Ok(())
    }

    fn end(&mut self) -> AnimResult<()> {
        self.out.flush().map_err(io_error)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/backend.rs"]
mod tests;
