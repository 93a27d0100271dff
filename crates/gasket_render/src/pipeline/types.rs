//! GPU-compatible data types for the gasket pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use gasket_core::{Mat4, Vec4};
use gasket_math::mat4;

/// One vertex of the gasket draw stream
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GasketVertex {
    /// Homogeneous position (x, y, z, 1)
    pub position: [f32; 4],
    /// RGBA face color
    pub color: [f32; 4],
    /// Texture coordinate
    pub tex_coord: [f32; 2],
}

impl GasketVertex {
    pub fn new(position: Vec4, color: [f32; 4], tex_coord: [f32; 2]) -> Self {
        Self {
            position: position.to_array(),
            color,
            tex_coord,
        }
    }

    /// Interleave three parallel streams into vertices
    ///
    /// Extra entries in a longer stream are ignored.
    pub fn interleave(points: &[Vec4], colors: &[[f32; 4]], tex_coords: &[[f32; 2]]) -> Vec<Self> {
        points
            .iter()
            .zip(colors)
            .zip(tex_coords)
            .map(|((p, c), t)| Self::new(*p, *c, *t))
            .collect()
    }
}

/// Uniforms shared by the vertex stage
/// Layout: 128 bytes total (must match gasket.wgsl Uniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    /// Projection matrix (64 bytes)
    pub projection: Mat4,
    /// Model-view matrix (64 bytes)
    pub model_view: Mat4,
}

impl Default for Uniforms {
    fn default() -> Self {
        Self {
            projection: mat4::IDENTITY,
            model_view: mat4::IDENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_size() {
        // 4 + 4 + 2 floats
        assert_eq!(std::mem::size_of::<GasketVertex>(), 40);
    }

    #[test]
    fn test_uniforms_size() {
        assert_eq!(std::mem::size_of::<Uniforms>(), 128);
        assert_eq!(std::mem::size_of::<Uniforms>() % 16, 0);
    }

    #[test]
    fn test_interleave() {
        let points = [Vec4::point(1.0, 2.0, 3.0), Vec4::point(4.0, 5.0, 6.0)];
        let colors = [[1.0, 0.0, 0.0, 1.0], [0.0, 1.0, 0.0, 1.0]];
        let tex = [[0.0, 0.0], [0.0, 1.0]];

        let vertices = GasketVertex::interleave(&points, &colors, &tex);
        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[1].position, [4.0, 5.0, 6.0, 1.0]);
        assert_eq!(vertices[1].color, colors[1]);
        assert_eq!(vertices[1].tex_coord, tex[1]);
    }

    #[test]
    fn test_default_uniforms_are_identity() {
        let u = Uniforms::default();
        assert_eq!(u.projection, mat4::IDENTITY);
        assert_eq!(u.model_view, mat4::IDENTITY);
    }
}
