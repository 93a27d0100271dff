//! Animation sequencer
//!
//! A fixed, ordered sequence of phases, each driving one transform parameter
//! towards a target by a constant step per frame. Reaching a target clamps the
//! parameter exactly onto it before moving to the next phase, so repeated
//! cycles never drift.
//!
//! ```text
//! RotateRight -> RotateBack -> Grow -> Shrink -> SlideOut -> SlideAcross -> SlideHome -> Advance
//!      ^                                                                                  |
//!      +----------------------------- completed_cycles += 1 -----------------------------+
//! ```

use gasket_math::{mat4, Mat4};

/// Vertical offset applied before every other transform, recentering the gasket
pub const BASE_TRANSLATION_Y: f32 = -0.2357;

/// Model-view matrix when no animation is running
pub fn static_model_view() -> Mat4 {
    mat4::translation(0.0, BASE_TRANSLATION_Y, 0.0)
}

/// One stage of the animation sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Rotate about Z to -180°
    RotateRight,
    /// Rotate about Z back to 0°
    RotateBack,
    /// Scale up to 4x
    Grow,
    /// Scale back down to 1x
    Shrink,
    /// Translate to (3.0, 1.2)
    SlideOut,
    /// Translate to (-3.0, -1.2)
    SlideAcross,
    /// Translate back to the origin
    SlideHome,
    /// Terminal step: wraps to the first phase and counts a completed cycle
    Advance,
}

/// Parameter a phase drives and the step/target it uses
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    Rotate { step: f32, target: f32 },
    Scale { step: f32, target: f32 },
    Translate { step: [f32; 2], target: [f32; 2] },
}

impl Phase {
    /// The seven parameter phases in order
    pub const SEQUENCE: [Phase; 7] = [
        Phase::RotateRight,
        Phase::RotateBack,
        Phase::Grow,
        Phase::Shrink,
        Phase::SlideOut,
        Phase::SlideAcross,
        Phase::SlideHome,
    ];

    /// Position in [`Phase::SEQUENCE`], `None` for [`Phase::Advance`]
    pub fn index(self) -> Option<usize> {
        Self::SEQUENCE.iter().position(|p| *p == self)
    }

    /// Transition table
    pub fn next(self) -> Phase {
        match self {
            Phase::RotateRight => Phase::RotateBack,
            Phase::RotateBack => Phase::Grow,
            Phase::Grow => Phase::Shrink,
            Phase::Shrink => Phase::SlideOut,
            Phase::SlideOut => Phase::SlideAcross,
            Phase::SlideAcross => Phase::SlideHome,
            Phase::SlideHome => Phase::Advance,
            Phase::Advance => Phase::RotateRight,
        }
    }

    /// Per-frame motion of this phase
    pub fn motion(self) -> Option<Motion> {
        match self {
            Phase::RotateRight => Some(Motion::Rotate { step: -1.0, target: -180.0 }),
            Phase::RotateBack => Some(Motion::Rotate { step: 1.0, target: 0.0 }),
            Phase::Grow => Some(Motion::Scale { step: 0.02, target: 4.0 }),
            Phase::Shrink => Some(Motion::Scale { step: -0.02, target: 1.0 }),
            Phase::SlideOut => Some(Motion::Translate {
                step: [0.0125, 0.005],
                target: [3.0, 1.2],
            }),
            Phase::SlideAcross => Some(Motion::Translate {
                step: [-0.0125, -0.005],
                target: [-3.0, -1.2],
            }),
            Phase::SlideHome => Some(Motion::Translate {
                step: [0.0125, 0.005],
                target: [0.0, 0.0],
            }),
            Phase::Advance => None,
        }
    }

    /// Human readable name
    pub fn label(self) -> &'static str {
        match self {
            Phase::RotateRight => "rotate right",
            Phase::RotateBack => "rotate back",
            Phase::Grow => "grow",
            Phase::Shrink => "shrink",
            Phase::SlideOut => "slide out",
            Phase::SlideAcross => "slide across",
            Phase::SlideHome => "slide home",
            Phase::Advance => "advance",
        }
    }
}

/// Whether `value`, moving by `step`, has reached `target`
#[inline]
fn reached(value: f32, step: f32, target: f32) -> bool {
    if step > 0.0 {
        value >= target
    } else {
        value <= target
    }
}

/// Mutable animation parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    pub phase: Phase,
    /// Rotation about Z in degrees
    pub rotation_z: f32,
    /// Uniform XY scale
    pub scale: f32,
    /// XY translation
    pub translate: [f32; 2],
    pub completed_cycles: u32,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            phase: Phase::RotateRight,
            rotation_z: 0.0,
            scale: 1.0,
            translate: [0.0, 0.0],
            completed_cycles: 0,
        }
    }
}

impl AnimationState {
    /// Perform one frame of work for the current phase
    pub fn step(&mut self) {
        let done = match self.phase.motion() {
            None => {
                self.completed_cycles += 1;
                true
            }
            Some(Motion::Rotate { step, target }) => {
                self.rotation_z += step;
                let done = reached(self.rotation_z, step, target);
                if done {
                    self.rotation_z = target;
                }
                done
            }
            Some(Motion::Scale { step, target }) => {
                self.scale += step;
                let done = reached(self.scale, step, target);
                if done {
                    self.scale = target;
                }
                done
            }
            Some(Motion::Translate { step, target }) => {
                self.translate[0] += step[0];
                self.translate[1] += step[1];
                // Both axes must arrive before the phase ends
                let done = reached(self.translate[0], step[0], target[0])
                    && reached(self.translate[1], step[1], target[1]);
                if done {
                    self.translate = target;
                }
                done
            }
        };

        if done {
            self.phase = self.phase.next();
        }
    }

    /// Compose the model-view matrix for the current parameters
    ///
    /// `base · rotateZ · scale(s, s, 1) · translate(tx, ty, 0)`; applied to a
    /// point this translates first and recenters last.
    pub fn model_view(&self) -> Mat4 {
        let mut m = static_model_view();
        m = mat4::mul(m, mat4::rotation_z(self.rotation_z));
        m = mat4::mul(m, mat4::scaling(self.scale, self.scale, 1.0));
        m = mat4::mul(m, mat4::translation(self.translate[0], self.translate[1], 0.0));
        m
    }
}

/// Result of one sequencer tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tick {
    /// Phase work was done; draw with this model-view matrix
    Running(Mat4),
    /// All cycles completed; nothing was advanced this tick
    Finished,
}

/// Drives an [`AnimationState`] through a fixed number of cycles
#[derive(Clone, Debug)]
pub struct Sequencer {
    state: AnimationState,
    total_cycles: u32,
}

impl Sequencer {
    /// Start a fresh run of `total_cycles` cycles
    pub fn new(total_cycles: u32) -> Self {
        Self {
            state: AnimationState::default(),
            total_cycles,
        }
    }

    /// Advance one frame
    ///
    /// Termination is checked before any phase work, so a run of zero cycles
    /// finishes on its first tick without touching the state.
    pub fn tick(&mut self) -> Tick {
        if self.is_finished() {
            return Tick::Finished;
        }

        self.state.step();
        Tick::Running(self.state.model_view())
    }

    /// Whether the configured number of cycles has been completed
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state.completed_cycles >= self.total_cycles
    }

    #[inline]
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    #[inline]
    pub fn total_cycles(&self) -> u32 {
        self.total_cycles
    }
}
