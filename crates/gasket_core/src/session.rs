//! Session orchestration
//!
//! [`GasketSession`] ties the controls, the generator and the animation loop
//! together. It owns no GPU state; every effect on the screen goes through
//! the [`Uploader`] and [`UniformWriter`] traits, and frames are scheduled
//! through a [`FrameRequester`].

use gasket_math::{mat4, Mat4};

use crate::controls::{Configuration, ControlEffect, ControlError, ControlEvent, Controls, Limits};
use crate::geometry::{GasketGeometry, Tetrahedron};
use crate::scheduler::{AnimationLoop, FrameEvent, FrameHandle, FrameRequester};
use crate::sequencer::{static_model_view, AnimationState};
use crate::surface::{UniformWriter, Uploader};

/// Orthographic bounds of the default view volume: left, right, bottom, top, near, far
pub const DEFAULT_VIEW_BOUNDS: [f32; 6] = [-4.0, 4.0, -2.25, 2.25, -2.0, 2.0];

/// Projection used when no bounds are configured
pub fn default_projection() -> Mat4 {
    let [l, r, b, t, n, f] = DEFAULT_VIEW_BOUNDS;
    mat4::orthographic(l, r, b, t, n, f)
}

/// Snapshot of a run for status display
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunProgress {
    pub running: bool,
    pub state: AnimationState,
    pub total_cycles: u32,
}

/// The interactive gasket: controls, geometry and animation
#[derive(Debug)]
pub struct GasketSession {
    controls: Controls,
    base: Tetrahedron,
    geometry: GasketGeometry,
    animation: AnimationLoop,
    projection: Mat4,
}

impl GasketSession {
    /// Create a session over the standard gasket tetrahedron
    ///
    /// Nothing is generated until [`GasketSession::initialize`] is called.
    pub fn new(config: Configuration, limits: Limits, projection: Mat4) -> Self {
        Self::with_base(Tetrahedron::GASKET, config, limits, projection)
    }

    /// Create a session over an arbitrary base tetrahedron
    pub fn with_base(
        base: Tetrahedron,
        config: Configuration,
        limits: Limits,
        projection: Mat4,
    ) -> Self {
        Self {
            controls: Controls::new(config, limits),
            base,
            geometry: GasketGeometry::new(),
            animation: AnimationLoop::new(),
            projection,
        }
    }

    /// Generate the initial geometry and push every piece of GPU state
    pub fn initialize<G: Uploader + UniformWriter>(&mut self, gpu: &mut G) {
        let config = *self.controls.config();
        gpu.set_texture(config.texture());
        gpu.set_projection(self.projection);
        gpu.set_transform(static_model_view());
        self.regenerate(gpu);
    }

    /// Apply a control event
    ///
    /// Rejected events leave the session untouched. The returned effect tells
    /// the caller whether anything visible changed.
    pub fn apply<G, F>(
        &mut self,
        event: ControlEvent,
        gpu: &mut G,
        frames: &mut F,
    ) -> Result<ControlEffect, ControlError>
    where
        G: Uploader + UniformWriter,
        F: FrameRequester,
    {
        let effect = self.controls.apply(event).map_err(|e| {
            log::warn!("Rejected {:?}: {}", event, e);
            e
        })?;

        match effect {
            ControlEffect::Unchanged => {}
            ControlEffect::Regenerate => {
                // A full redraw supersedes any pending animation frame
                self.animation.cancel(frames);
                self.regenerate(gpu);
            }
            ControlEffect::Retexture => {
                self.animation.cancel(frames);
                let texture = self.controls.config().texture();
                log::info!("Switching to {}", texture);
                gpu.set_texture(texture);
                self.regenerate(gpu);
            }
            ControlEffect::CyclesChanged => {
                log::debug!("Cycle count set to {}", self.controls.config().total_cycles());
            }
            ControlEffect::StartRun => {
                let cycles = self.controls.config().total_cycles();
                log::info!("Starting animation run of {} cycle(s)", cycles);
                self.controls.lock();
                self.animation.start(cycles, frames);
            }
        }

        Ok(effect)
    }

    /// Handle a fired frame
    pub fn on_frame<G, F>(&mut self, handle: FrameHandle, gpu: &mut G, frames: &mut F) -> FrameEvent
    where
        G: UniformWriter,
        F: FrameRequester,
    {
        let event = self.animation.on_frame(handle, frames);
        match event {
            FrameEvent::Draw(matrix) => gpu.set_transform(matrix),
            FrameEvent::Finished => {
                self.controls.unlock();
                log::info!("Animation run finished");
            }
            FrameEvent::Stale => {
                log::trace!("Ignoring stale frame {}", handle.id());
            }
        }
        event
    }

    /// Abort the current run and release the controls
    pub fn cancel_run<F: FrameRequester>(&mut self, frames: &mut F) {
        if self.animation.is_running() {
            log::info!("Animation run cancelled");
        }
        self.animation.cancel(frames);
        self.controls.unlock();
    }

    fn regenerate<U: Uploader>(&mut self, gpu: &mut U) {
        let depth = self.controls.config().depth();
        self.geometry = GasketGeometry::generate(self.base, depth);
        log::info!(
            "Generated gasket at depth {}: {} triangles",
            depth,
            self.geometry.triangle_count()
        );
        gpu.set_vertex_stream(
            &self.geometry.points,
            &self.geometry.colors,
            &self.geometry.tex_coords,
        );
    }

    #[inline]
    pub fn config(&self) -> &Configuration {
        self.controls.config()
    }

    #[inline]
    pub fn limits(&self) -> &Limits {
        self.controls.limits()
    }

    /// Whether the controls currently accept input
    #[inline]
    pub fn controls_enabled(&self) -> bool {
        !self.controls.is_locked()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.animation.is_running()
    }

    #[inline]
    pub fn geometry(&self) -> &GasketGeometry {
        &self.geometry
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Progress of the current or last run, `None` before the first run
    pub fn progress(&self) -> Option<RunProgress> {
        self.animation.sequencer().map(|seq| RunProgress {
            running: self.animation.is_running(),
            state: *seq.state(),
            total_cycles: seq.total_cycles(),
        })
    }
}
