//! Rendering pipeline components
//!
//! GPU data layouts and the render pipeline that draws the gasket.

pub mod render_pipeline;
pub mod types;

pub use render_pipeline::{RenderPipeline, DEPTH_FORMAT};
pub use types::{GasketVertex, Uniforms};
