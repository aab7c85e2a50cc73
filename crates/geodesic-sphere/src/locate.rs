//! Point location: map a direction to the leaf face it passes through.

use glam::DVec3;

use crate::face::FaceId;
use crate::subdivision::GeodesicSphere;

/// Determinants below this magnitude are treated as a segment parallel to
/// the triangle's plane.
pub const INTERSECTION_EPSILON: f64 = 1e-12;

/// Slack allowed on the barycentric and segment bounds, so a direction that
/// lands exactly on a shared edge or vertex is not lost to rounding.
pub const BARYCENTRIC_TOLERANCE: f64 = 1e-9;

/// Length of the query segment. Every face lies inside the unit ball, so a
/// segment of length 2 from the origin always crosses the mesh shell.
pub const LOCATE_SCALE: f64 = 2.0;

/// Where a segment crosses a triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Position along the segment, 0 at `origin` and 1 at `end`.
    pub t: f64,
    /// Barycentric weight of the second corner.
    pub u: f64,
    /// Barycentric weight of the third corner.
    pub v: f64,
}

/// Möller–Trumbore intersection of the segment `origin → end` with a triangle.
///
/// Returns `None` if the segment is (nearly) parallel to the triangle, passes
/// outside it, or stops short of it.
#[must_use]
pub fn segment_triangle_intersect(
    origin: DVec3,
    end: DVec3,
    triangle: [DVec3; 3],
) -> Option<RayHit> {
    let [v0, v1, v2] = triangle;
    let dir = end - origin;
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let pvec = dir.cross(edge2);
    let det = edge1.dot(pvec);
    if det.abs() < INTERSECTION_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = origin - v0;
    let u = tvec.dot(pvec) * inv_det;
    if !(-BARYCENTRIC_TOLERANCE..=1.0 + BARYCENTRIC_TOLERANCE).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = dir.dot(qvec) * inv_det;
    if v < -BARYCENTRIC_TOLERANCE || u + v > 1.0 + BARYCENTRIC_TOLERANCE {
        return None;
    }

    let t = edge2.dot(qvec) * inv_det;
    if !(-BARYCENTRIC_TOLERANCE..=1.0 + BARYCENTRIC_TOLERANCE).contains(&t) {
        return None;
    }

    Some(RayHit { t, u, v })
}

impl GeodesicSphere {
    /// Find the leaf face that `direction` passes through.
    ///
    /// Walks down from the base faces, following only faces the query
    /// segment crosses. Returns `None` for a zero or non-finite direction;
    /// any other direction resolves to a face because the leaves cover the
    /// whole sphere. On a shared edge or vertex the first matching leaf in
    /// pre-order wins.
    #[must_use]
    pub fn locate(&self, direction: DVec3) -> Option<FaceId> {
        let direction = direction.try_normalize()?;
        let end = direction * LOCATE_SCALE;

        let found = self
            .forest()
            .roots()
            .iter()
            .find_map(|&root| self.locate_in(root, DVec3::ZERO, end));
        if found.is_none() {
            tracing::warn!(?direction, "direction did not resolve to any face");
        }
        found
    }

    fn locate_in(&self, id: FaceId, origin: DVec3, end: DVec3) -> Option<FaceId> {
        let triangle = self.face_positions(id)?;
        segment_triangle_intersect(origin, end, triangle)?;

        let face = self.face(id)?;
        if face.is_leaf() {
            return Some(id);
        }
        face.children()
            .find_map(|child| self.locate_in(child, origin, end))
    }
}
