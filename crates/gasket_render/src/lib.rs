//! Gasket rendering library
//!
//! This crate provides the wgpu-based rendering pipeline for the textured,
//! animated Sierpinski gasket.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`pipeline::RenderPipeline`] - Textured triangle-list rendering with depth
//! - [`textures`] - Procedural texture presets

pub mod context;
pub mod pipeline;
pub mod textures;

pub use context::{ContextError, RenderContext};
pub use pipeline::{GasketVertex, RenderPipeline, Uniforms};
