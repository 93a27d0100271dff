//! Homogeneous 3D Mathematics
//!
//! This crate provides the point and matrix types used by the gasket
//! generator, the animation sequencer and the renderer.
//!
//! ## Core Types
//!
//! - [`Vec4`] - homogeneous coordinate with x, y, z, w components
//! - [`Mat4`] - column-major 4x4 matrix, see [`mat4`] for constructors

mod vec4;
pub mod mat4;

pub use vec4::Vec4;
pub use mat4::Mat4;
