//! Seams to the graphics layer
//!
//! The core never touches a GPU API directly. A renderer implements these
//! traits; tests implement them with plain recorders.

use gasket_math::{Mat4, Vec4};

use crate::controls::TextureId;

/// Receives generated geometry
pub trait Uploader {
    /// Replace the entire vertex stream
    ///
    /// The three slices are parallel and have the same length.
    fn set_vertex_stream(&mut self, points: &[Vec4], colors: &[[f32; 4]], tex_coords: &[[f32; 2]]);

    /// Bind one of the preset textures for subsequent draws
    fn set_texture(&mut self, texture: TextureId);
}

/// Receives shader uniforms
pub trait UniformWriter {
    /// Per-frame model-view matrix
    fn set_transform(&mut self, matrix: Mat4);

    /// Static projection matrix
    fn set_projection(&mut self, matrix: Mat4);
}
