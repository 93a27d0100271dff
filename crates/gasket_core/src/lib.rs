//! Core logic for the animated Sierpinski gasket
//!
//! This crate has no GPU dependency:
//!
//! - [`geometry`] - Recursive tetrahedron subdivision into colored triangles
//! - [`sequencer`] - The phase-driven animation state machine
//! - [`controls`] - Validated user configuration and the run lock
//! - [`scheduler`] - Frame requests with cancellation
//! - [`surface`] - Traits a renderer implements to receive geometry and uniforms
//! - [`session`] - [`GasketSession`], which drives all of the above

pub mod controls;
pub mod geometry;
pub mod scheduler;
pub mod sequencer;
pub mod session;
pub mod surface;

pub use controls::{
    Configuration, ControlEffect, ControlError, ControlEvent, Controls, Limits, TextureId,
};
pub use geometry::{subdivide, subdivide_into, FaceColor, GasketGeometry, Tetrahedron, Triangle};
pub use scheduler::{AnimationLoop, FrameEvent, FrameHandle, FrameQueue, FrameRequester};
pub use sequencer::{AnimationState, Phase, Sequencer, Tick};
pub use session::{default_projection, GasketSession, RunProgress};
pub use surface::{UniformWriter, Uploader};

// Re-export commonly used math types for convenience
pub use gasket_math::{Mat4, Vec4};
