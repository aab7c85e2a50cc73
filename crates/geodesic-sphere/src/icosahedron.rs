//! The regular icosahedron every geodesic sphere starts from.

use glam::DVec3;

/// Golden ratio φ = (1 + √5) / 2.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Number of vertices of the base icosahedron.
pub const BASE_VERTEX_COUNT: usize = 12;

/// Number of faces of the base icosahedron.
pub const BASE_FACE_COUNT: usize = 20;

/// Corner indices of the 20 base faces.
///
/// Every triple is wound counter-clockwise when viewed from outside the
/// sphere, so `(v1 - v0) × (v2 - v0)` points away from the origin.
pub const BASE_FACES: [[u32; 3]; BASE_FACE_COUNT] = [
    [2, 1, 0],
    [2, 3, 1],
    [5, 4, 3],
    [4, 8, 3],
    [7, 6, 0],
    [6, 9, 0],
    [11, 10, 4],
    [10, 11, 6],
    [9, 5, 2],
    [5, 9, 11],
    [8, 7, 1],
    [7, 8, 10],
    [2, 5, 3],
    [8, 1, 3],
    [9, 2, 0],
    [1, 7, 0],
    [11, 9, 6],
    [7, 10, 6],
    [5, 11, 4],
    [10, 8, 4],
];

/// The 12 base vertices, projected onto the unit sphere.
///
/// Before normalization the vertices are the cyclic permutations of
/// `(0, ±1/φ, ±1)`, listed in the order [`BASE_FACES`] refers to.
#[must_use]
pub fn base_vertices() -> [DVec3; BASE_VERTEX_COUNT] {
    let a = 1.0;
    let b = 1.0 / GOLDEN_RATIO;
    [
        DVec3::new(0.0, b, -a),
        DVec3::new(b, a, 0.0),
        DVec3::new(-b, a, 0.0),
        DVec3::new(0.0, b, a),
        DVec3::new(0.0, -b, a),
        DVec3::new(-a, 0.0, b),
        DVec3::new(0.0, -b, -a),
        DVec3::new(a, 0.0, -b),
        DVec3::new(a, 0.0, b),
        DVec3::new(-a, 0.0, -b),
        DVec3::new(b, -a, 0.0),
        DVec3::new(-b, -a, 0.0),
    ]
    .map(DVec3::normalize)
}
