//! Sierpinski tetrahedron generator
//!
//! Recursively subdivides a tetrahedron into its four corner tetrahedra,
//! discarding the central octahedron at every level, and emits the faces of
//! the leaf tetrahedra as a flat, ordered triangle list.
//!
//! The output size grows as `4^(depth + 1)` triangles. Depth 8 is already
//! 262 144 triangles; depth 10 is over four million, which is past what the
//! renderer is configured to accept. The generator itself enforces no bound,
//! callers validate the depth first (see [`crate::controls`]).

use gasket_math::Vec4;

/// Fixed RGBA colors, one per tetrahedron face
pub const BASE_COLORS: [[f32; 4]; 4] = [
    [1.0, 0.2, 0.4, 1.0],
    [0.0, 0.9, 1.0, 1.0],
    [0.2, 0.2, 0.5, 1.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Texture corners: bottom-left, top-left, top-right, bottom-right
pub const TEX_CORNERS: [[f32; 2]; 4] = [
    [0.0, 0.0],
    [0.0, 1.0],
    [1.0, 1.0],
    [1.0, 0.0],
];

/// Texture corner assigned to each vertex slot of a triangle
pub const SLOT_TEX_COORDS: [[f32; 2]; 3] = [TEX_CORNERS[0], TEX_CORNERS[1], TEX_CORNERS[2]];

/// One of the four face colors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceColor {
    First,
    Second,
    Third,
    Fourth,
}

impl FaceColor {
    /// Face colors in face emission order
    pub const ALL: [FaceColor; 4] = [
        FaceColor::First,
        FaceColor::Second,
        FaceColor::Third,
        FaceColor::Fourth,
    ];

    /// Index into [`BASE_COLORS`]
    #[inline]
    pub fn index(self) -> usize {
        match self {
            FaceColor::First => 0,
            FaceColor::Second => 1,
            FaceColor::Third => 2,
            FaceColor::Fourth => 3,
        }
    }

    /// RGBA value of this color
    #[inline]
    pub fn rgba(self) -> [f32; 4] {
        BASE_COLORS[self.index()]
    }
}

/// A tetrahedron given by its four corners (a, b, c, d)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tetrahedron {
    pub a: Vec4,
    pub b: Vec4,
    pub c: Vec4,
    pub d: Vec4,
}

impl Tetrahedron {
    /// Regular tetrahedron inscribed in the unit sphere, apex towards -Z
    pub const GASKET: Tetrahedron = Tetrahedron {
        a: Vec4::point(0.0000, 0.0000, -1.0000),
        b: Vec4::point(0.0000, 0.9428, 0.3333),
        c: Vec4::point(-0.8165, -0.4714, 0.3333),
        d: Vec4::point(0.8165, -0.4714, 0.3333),
    };

    pub const fn new(a: Vec4, b: Vec4, c: Vec4, d: Vec4) -> Self {
        Self { a, b, c, d }
    }

    /// Faces in emission order, each paired with its color
    ///
    /// (a,c,b), (a,c,d), (a,b,d), (b,c,d)
    pub fn faces(&self) -> [([Vec4; 3], FaceColor); 4] {
        let Self { a, b, c, d } = *self;
        [
            ([a, c, b], FaceColor::First),
            ([a, c, d], FaceColor::Second),
            ([a, b, d], FaceColor::Third),
            ([b, c, d], FaceColor::Fourth),
        ]
    }

    /// The four corner tetrahedra of one subdivision step
    ///
    /// Each keeps one original corner and the midpoints of the three edges
    /// meeting there.
    pub fn corners(&self) -> [Tetrahedron; 4] {
        let Self { a, b, c, d } = *self;

        let ab = a.midpoint(b);
        let ac = a.midpoint(c);
        let ad = a.midpoint(d);
        let bc = b.midpoint(c);
        let bd = b.midpoint(d);
        let cd = c.midpoint(d);

        [
            Tetrahedron::new(a, ab, ac, ad),
            Tetrahedron::new(ab, b, bc, bd),
            Tetrahedron::new(ac, bc, c, cd),
            Tetrahedron::new(ad, bd, cd, d),
        ]
    }
}

/// A colored, textured triangle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub points: [Vec4; 3],
    pub color: FaceColor,
}

impl Triangle {
    /// Texture coordinate of a vertex slot (0, 1 or 2)
    #[inline]
    pub fn tex_coord(slot: usize) -> [f32; 2] {
        SLOT_TEX_COORDS[slot]
    }
}

/// Number of triangles produced at `depth`, `None` if it overflows `usize`
pub fn triangle_count(depth: u32) -> Option<usize> {
    4usize.checked_pow(depth.checked_add(1)?)
}

/// Subdivide `tetrahedron` `depth` times and return the leaf faces in order
pub fn subdivide(tetrahedron: Tetrahedron, depth: u32) -> Vec<Triangle> {
    let mut out = Vec::with_capacity(triangle_count(depth).unwrap_or(0));
    subdivide_into(tetrahedron, depth, &mut out);
    out
}

/// Accumulator form of [`subdivide`]: appends to `out`
pub fn subdivide_into(tetrahedron: Tetrahedron, depth: u32, out: &mut Vec<Triangle>) {
    if depth == 0 {
        for (points, color) in tetrahedron.faces() {
            out.push(Triangle { points, color });
        }
        return;
    }

    for corner in tetrahedron.corners() {
        subdivide_into(corner, depth - 1, out);
    }
}

/// Flattened vertex streams ready for upload
///
/// The three vectors are parallel: entry `i` of each describes vertex `i`,
/// and every three consecutive vertices form one triangle in draw order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GasketGeometry {
    pub points: Vec<Vec4>,
    pub colors: Vec<[f32; 4]>,
    pub tex_coords: Vec<[f32; 2]>,
}

impl GasketGeometry {
    /// Create empty geometry
    pub fn new() -> Self {
        Self::default()
    }

    /// Subdivide and flatten in one step
    pub fn generate(tetrahedron: Tetrahedron, depth: u32) -> Self {
        Self::from_triangles(&subdivide(tetrahedron, depth))
    }

    /// Flatten a triangle list, preserving its order
    pub fn from_triangles(triangles: &[Triangle]) -> Self {
        let vertex_count = triangles.len() * 3;
        let mut geometry = Self {
            points: Vec::with_capacity(vertex_count),
            colors: Vec::with_capacity(vertex_count),
            tex_coords: Vec::with_capacity(vertex_count),
        };

        for triangle in triangles {
            let rgba = triangle.color.rgba();
            for (slot, point) in triangle.points.iter().enumerate() {
                geometry.points.push(*point);
                geometry.colors.push(rgba);
                geometry.tex_coords.push(Triangle::tex_coord(slot));
            }
        }

        geometry
    }

    /// Number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.points.len() / 3
    }

    /// True when nothing has been generated
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Tetrahedron {
        Tetrahedron::new(
            Vec4::point(0.0, 0.0, 0.0),
            Vec4::point(1.0, 0.0, 0.0),
            Vec4::point(0.0, 1.0, 0.0),
            Vec4::point(0.0, 0.0, 1.0),
        )
    }

    #[test]
    fn test_triangle_count_per_depth() {
        for depth in 0..=5 {
            let triangles = subdivide(Tetrahedron::GASKET, depth);
            let expected = 4usize.pow(depth + 1);
            assert_eq!(triangles.len(), expected, "depth {}", depth);
            assert_eq!(triangle_count(depth), Some(expected));

            let geometry = GasketGeometry::from_triangles(&triangles);
            assert_eq!(geometry.vertex_count(), 3 * expected);
            assert_eq!(geometry.colors.len(), 3 * expected);
            assert_eq!(geometry.tex_coords.len(), 3 * expected);
        }
    }

    #[test]
    fn test_depth_zero_face_order_and_colors() {
        let t = unit();
        let triangles = subdivide(t, 0);

        let expected = [
            ([t.a, t.c, t.b], FaceColor::First),
            ([t.a, t.c, t.d], FaceColor::Second),
            ([t.a, t.b, t.d], FaceColor::Third),
            ([t.b, t.c, t.d], FaceColor::Fourth),
        ];

        assert_eq!(triangles.len(), 4);
        for (triangle, (points, color)) in triangles.iter().zip(expected) {
            assert_eq!(triangle.points, points);
            assert_eq!(triangle.color, color);
        }
    }

    #[test]
    fn test_face_colors_map_to_base_colors() {
        for (i, color) in FaceColor::ALL.iter().enumerate() {
            assert_eq!(color.index(), i);
            assert_eq!(color.rgba(), BASE_COLORS[i]);
        }
    }

    #[test]
    fn test_tex_coords_follow_vertex_slot() {
        let geometry = GasketGeometry::generate(Tetrahedron::GASKET, 2);
        for (i, uv) in geometry.tex_coords.iter().enumerate() {
            assert_eq!(*uv, SLOT_TEX_COORDS[i % 3], "vertex {}", i);
        }
        assert_eq!(SLOT_TEX_COORDS, [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
    }

    #[test]
    fn test_flattened_colors_match_faces() {
        let geometry = GasketGeometry::generate(unit(), 1);
        for (i, color) in geometry.colors.iter().enumerate() {
            let face = (i / 3) % 4;
            assert_eq!(*color, BASE_COLORS[face], "vertex {}", i);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let first = subdivide(Tetrahedron::GASKET, 4);
        let second = subdivide(Tetrahedron::GASKET, 4);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            for (p, q) in a.points.iter().zip(&b.points) {
                assert_eq!(p.to_array().map(f32::to_bits), q.to_array().map(f32::to_bits));
            }
            assert_eq!(a.color, b.color);
        }
    }

    #[test]
    fn test_accumulator_appends() {
        let mut out = subdivide(unit(), 0);
        subdivide_into(unit(), 1, &mut out);
        assert_eq!(out.len(), 4 + 16);
        assert_eq!(out[..4], subdivide(unit(), 0)[..]);
        assert_eq!(out[4..], subdivide(unit(), 1)[..]);
    }

    #[test]
    fn test_corners_share_only_midpoints() {
        let t = unit();
        let corners = t.corners();

        // Each original vertex appears in exactly one corner tetrahedron
        for (i, original) in [t.a, t.b, t.c, t.d].iter().enumerate() {
            let owners: Vec<usize> = corners
                .iter()
                .enumerate()
                .filter(|(_, c)| [c.a, c.b, c.c, c.d].contains(original))
                .map(|(j, _)| j)
                .collect();
            assert_eq!(owners, vec![i]);
        }

        // Any two corners share exactly one point: the midpoint of their edge
        for i in 0..4 {
            for j in (i + 1)..4 {
                let pi = [corners[i].a, corners[i].b, corners[i].c, corners[i].d];
                let pj = [corners[j].a, corners[j].b, corners[j].c, corners[j].d];
                let shared = pi.iter().filter(|p| pj.contains(p)).count();
                assert_eq!(shared, 1, "corners {} and {}", i, j);
            }
        }
    }

    #[test]
    fn test_subdivided_points_stay_homogeneous() {
        let geometry = GasketGeometry::generate(Tetrahedron::GASKET, 3);
        assert!(geometry.points.iter().all(|p| p.w == 1.0));
    }

    #[test]
    fn test_triangle_count_overflow() {
        assert_eq!(triangle_count(10), Some(4_194_304));
        assert_eq!(triangle_count(u32::MAX), None);
        assert_eq!(triangle_count(64), None);
    }

    #[test]
    fn test_empty_geometry() {
        let geometry = GasketGeometry::new();
        assert!(geometry.is_empty());
        assert_eq!(geometry.triangle_count(), 0);
    }
}
