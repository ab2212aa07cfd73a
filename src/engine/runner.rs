use crate::engine::backend::{Backend, FrameInfo, NullBackend};
use crate::engine::config::EngineConfig;
use crate::foundation::error::AnimResult;
use crate::instruction::core::{Instruction, InstructionNode, run_sequential};
use crate::scene::graph::Scene;

/// Summary of a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunStats {
    /// Loop iterations, i.e. frames offered to the backend when rendering is on.
    pub frames: u64,
    /// Scene seconds elapsed during the run.
    pub elapsed: f64,
    /// The `max_frames` guard stopped the run before the instructions finished.
    pub truncated: bool,
}

/// Owns a scene and a backend and plays instruction timelines against them.
pub struct Engine<B: Backend = NullBackend> {
    config: EngineConfig,
    scene: Scene,
    backend: B,
}

impl Engine<NullBackend> {
    pub fn new(config: EngineConfig) -> AnimResult<Self> {
        Self::with_backend(config, NullBackend::default())
    }
}

impl<B: Backend> Engine<B> {
    pub fn with_backend(config: EngineConfig, backend: B) -> AnimResult<Self> {
        config.validate()?;
        let scene = config.scene();
        Ok(Self {
            config,
            scene,
            backend,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_parts(self) -> (Scene, B) {
        (self.scene, self.backend)
    }

    /// Start over with an empty scene.
    pub fn reset_scene(&mut self) {
        self.scene = self.config.scene();
    }

    /// Run `instructions` one after another until they all finish.
    ///
    /// Instantaneous leading instructions are flushed before the first frame. Each loop
    /// iteration emits the current scene (when rendering is on) and then advances it by
    /// `1 / frame_rate`.
    #[tracing::instrument(skip_all, fields(instructions = instructions.len()))]
    pub fn run(&mut self, instructions: Vec<InstructionNode>) -> AnimResult<RunStats> {
        let dt = self.config.dt();
        let started = self.scene.time();
        let mut tree = run_sequential(instructions);

        self.backend.start(&self.config)?;
        tree.start(&mut self.scene)?;
        tree.update(&mut self.scene, 0.0)?;

        let mut stats = RunStats::default();
        while !tree.finished() {
            if let Some(max) = self.config.max_frames
                && stats.frames >= max
            {
                tracing::warn!(
                    max_frames = max,
                    active = tree.current().len(),
                    "stopping run at frame limit"
                );
                stats.truncated = true;
                break;
            }
            if self.config.render {
                let info = FrameInfo {
                    index: stats.frames,
                    time: self.scene.time(),
                    changed: self.scene.frame_changed(),
                };
                self.backend.add_frame(&info, &self.scene)?;
                self.scene.set_frame_changed(false);
            }
            tree.update(&mut self.scene, dt)?;
            self.scene.set_time(self.scene.time() + dt);
            stats.frames += 1;
            tracing::trace!(
                frame = stats.frames,
                time = self.scene.time(),
                active = tree.current().len(),
                "tick"
            );
        }

        self.backend.end()?;
        stats.elapsed = self.scene.time() - started;
        tracing::debug!(frames = stats.frames, elapsed = stats.elapsed, "run finished");
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/runner.rs"]
mod tests;
