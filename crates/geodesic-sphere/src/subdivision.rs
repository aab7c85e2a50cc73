//! Recursive 1-to-4 subdivision of the base icosahedron.
//!
//! [`GeodesicSphere`] owns the vertex buffer, the [`FaceForest`] and the
//! [`MidpointCache`]. The cache lives as long as the sphere, so an edge
//! shared by two faces (in the same or in different base subtrees) always
//! resolves to the same midpoint vertex.

use glam::DVec3;
use rustc_hash::FxHashMap;

use crate::adjacency;
use crate::face::{Face, FaceId};
use crate::forest::FaceForest;
use crate::icosahedron::{BASE_FACES, base_vertices};

/// Deepest subdivision level a sphere may be refined to.
///
/// Level 10 already holds 20·4¹⁰ leaves; recursion depth in subdivision and
/// adjacency resolution is bounded by this value.
pub const MAX_SUBDIVISION_LEVEL: u32 = 10;

/// Errors that can occur while refining a sphere.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubdivisionError {
    /// The requested refinement would exceed [`MAX_SUBDIVISION_LEVEL`].
    #[error("subdivision to level {requested} exceeds the maximum of {max}")]
    LevelTooDeep {
        /// Level the sphere would have reached.
        requested: u32,
        /// The supported maximum.
        max: u32,
    },
}

/// Map from an unordered edge `(min, max)` to the vertex created at its midpoint.
#[derive(Clone, Debug, Default)]
pub struct MidpointCache {
    midpoints: FxHashMap<(u32, u32), u32>,
    hits: usize,
}

impl MidpointCache {
    fn key(i: u32, j: u32) -> (u32, u32) {
        (i.min(j), i.max(j))
    }

    /// Cached midpoint of edge `(i, j)`, in either order.
    #[must_use]
    pub fn get(&self, i: u32, j: u32) -> Option<u32> {
        self.midpoints.get(&Self::key(i, j)).copied()
    }

    /// Number of edges with a cached midpoint.
    #[must_use]
    pub fn len(&self) -> usize {
        self.midpoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.midpoints.is_empty()
    }

    /// How many midpoint requests were answered from the cache.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits
    }
}

/// A geodesic sphere: an icosahedron refined into a forest of triangles
/// whose vertices all lie on the unit sphere.
#[derive(Clone, Debug)]
pub struct GeodesicSphere {
    vertices: Vec<DVec3>,
    forest: FaceForest,
    midpoints: MidpointCache,
    level: u32,
}

impl Default for GeodesicSphere {
    fn default() -> Self {
        Self::new()
    }
}

impl GeodesicSphere {
    /// Build the un-subdivided base icosahedron with adjacency resolved.
    #[must_use]
    pub fn new() -> Self {
        let mut sphere = Self {
            vertices: Vec::with_capacity(base_vertices().len()),
            forest: FaceForest::new(),
            midpoints: MidpointCache::default(),
            level: 0,
        };
        sphere.build_base();
        adjacency::resolve(&mut sphere.forest);
        sphere
    }

    /// Build the base icosahedron and refine it to `level`.
    pub fn with_level(level: u32) -> Result<Self, SubdivisionError> {
        let mut sphere = Self::new();
        sphere.subdivide(level)?;
        Ok(sphere)
    }

    fn build_base(&mut self) {
        self.vertices.extend(base_vertices());
        for indices in BASE_FACES {
            self.forest.push_root(Face::new(indices, 0));
        }
        tracing::debug!(
            vertices = self.vertices.len(),
            faces = self.forest.len(),
            "built base icosahedron"
        );
    }

    /// The vertex buffer. Every entry has unit length.
    #[must_use]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Position of vertex `index`, if it exists.
    #[must_use]
    pub fn vertex(&self, index: u32) -> Option<DVec3> {
        self.vertices.get(index as usize).copied()
    }

    #[must_use]
    pub fn forest(&self) -> &FaceForest {
        &self.forest
    }

    pub(crate) fn forest_mut(&mut self) -> &mut FaceForest {
        &mut self.forest
    }

    /// Look up a face by handle.
    #[must_use]
    pub fn face(&self, id: FaceId) -> Option<&Face> {
        self.forest.get(id)
    }

    #[must_use]
    pub fn midpoints(&self) -> &MidpointCache {
        &self.midpoints
    }

    /// Current subdivision level (depth of every leaf).
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Corner positions of a face, in winding order.
    #[must_use]
    pub fn face_positions(&self, id: FaceId) -> Option<[DVec3; 3]> {
        let [a, b, c] = self.forest.get(id)?.vertex_indices();
        Some([self.vertex(a)?, self.vertex(b)?, self.vertex(c)?])
    }

    /// Mean of a face's three corners (inside the sphere, not on it).
    #[must_use]
    pub fn centroid(&self, id: FaceId) -> Option<DVec3> {
        let [a, b, c] = self.face_positions(id)?;
        Some((a + b + c) / 3.0)
    }

    /// Index of the vertex at the midpoint of edge `(i, j)`, creating it on
    /// first use.
    ///
    /// The new vertex is the arithmetic midpoint pushed out onto the unit
    /// sphere. Returns `None` if either index is not in the buffer or the
    /// two indices are equal.
    pub fn midpoint(&mut self, i: u32, j: u32) -> Option<u32> {
        if i == j {
            return None;
        }
        if let Some(index) = self.midpoints.get(i, j) {
            self.midpoints.hits += 1;
            return Some(index);
        }

        let position = ((self.vertex(i)? + self.vertex(j)?) * 0.5).normalize();
        let index = u32::try_from(self.vertices.len()).ok()?;
        self.vertices.push(position);
        self.midpoints.midpoints.insert(MidpointCache::key(i, j), index);
        Some(index)
    }

    /// Refine every current leaf by `levels` more levels, then re-resolve
    /// adjacency for the whole forest.
    ///
    /// `subdivide(0)` is a no-op. Fails without touching the mesh if the
    /// result would be deeper than [`MAX_SUBDIVISION_LEVEL`].
    pub fn subdivide(&mut self, levels: u32) -> Result<(), SubdivisionError> {
        let target = self
            .level
            .checked_add(levels)
            .filter(|&target| target <= MAX_SUBDIVISION_LEVEL)
            .ok_or(SubdivisionError::LevelTooDeep {
                requested: self.level.saturating_add(levels),
                max: MAX_SUBDIVISION_LEVEL,
            })?;
        if levels == 0 {
            return Ok(());
        }

        let from = self.level;
        for leaf in self.forest.leaves() {
            self.subdivide_face(leaf, target);
        }
        self.level = target;
        adjacency::resolve(&mut self.forest);

        tracing::info!(
            from,
            to = target,
            vertices = self.vertices.len(),
            leaves = self.forest.leaf_count(),
            cached_edges = self.midpoints.len(),
            "subdivided geodesic sphere"
        );
        Ok(())
    }

    /// Split `id` into 3 corner triangles and 1 center triangle, then recurse
    /// into each child until `target_level` is reached.
    ///
    /// For a face `[v0, v1, v2]` with midpoints `a = mid(v0, v1)`,
    /// `b = mid(v1, v2)` and `c = mid(v2, v0)`, the children are
    /// `[v0, a, c]`, `[v1, b, a]`, `[v2, c, b]` and `[a, b, c]`, which keeps
    /// the parent's winding.
    ///
    /// The depth is taken from the face itself. Adjacency is not touched;
    /// [`subdivide`](Self::subdivide) re-resolves it once every leaf is split.
    pub(crate) fn subdivide_face(&mut self, id: FaceId, target_level: u32) {
        let Some(face) = self.forest.get(id) else {
            tracing::debug!(%id, "subdivide_face on unknown face");
            return;
        };
        let level = face.level();
        if level >= target_level {
            return;
        }
        if !face.is_leaf() {
            tracing::debug!(%id, "face already subdivided");
            return;
        }

        let [v0, v1, v2] = face.vertex_indices();
        let (Some(a), Some(b), Some(c)) = (
            self.midpoint(v0, v1),
            self.midpoint(v1, v2),
            self.midpoint(v2, v0),
        ) else {
            tracing::warn!(%id, "face references a vertex outside the buffer");
            return;
        };

        let child_level = level + 1;
        let mut children = Vec::with_capacity(4);
        for indices in [[v0, a, c], [v1, b, a], [v2, c, b], [a, b, c]] {
            if let Some(child) = self.forest.push_child(id, Face::new(indices, child_level)) {
                children.push(child);
            }
        }
        tracing::trace!(%id, level, "split face into four");

        for child in children {
            self.subdivide_face(child, target_level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_vertices(level: u32) -> usize {
        10 * 4usize.pow(level) + 2
    }

    fn expected_leaves(level: u32) -> usize {
        20 * 4usize.pow(level)
    }

    #[test]
    fn test_base_sphere_counts() {
        let sphere = GeodesicSphere::new();
        assert_eq!(sphere.vertices().len(), 12);
        assert_eq!(sphere.forest().len(), 20);
        assert_eq!(sphere.forest().roots().len(), 20);
        assert_eq!(sphere.level(), 0);
        assert!(sphere.midpoints().is_empty());
    }

    #[test]
    fn test_base_build_is_deterministic() {
        let a = GeodesicSphere::new();
        let b = GeodesicSphere::new();
        assert_eq!(a.vertices(), b.vertices());
        for (&ra, &rb) in a.forest().roots().iter().zip(b.forest().roots()) {
            assert_eq!(
                a.face(ra).unwrap().vertex_indices(),
                b.face(rb).unwrap().vertex_indices()
            );
        }
    }

    #[test]
    fn test_counts_per_level() {
        for level in 0..=4 {
            let sphere = GeodesicSphere::with_level(level).unwrap();
            assert_eq!(sphere.vertices().len(), expected_vertices(level), "level {level}");
            assert_eq!(sphere.forest().leaf_count(), expected_leaves(level), "level {level}");
            assert_eq!(sphere.forest().depth(), level);
        }
    }

    #[test]
    fn test_vertices_stay_on_unit_sphere() {
        let sphere = GeodesicSphere::with_level(3).unwrap();
        for (i, v) in sphere.vertices().iter().enumerate() {
            assert!((v.length() - 1.0).abs() < 1e-5, "vertex {i} off sphere: {}", v.length());
        }
    }

    #[test]
    fn test_midpoint_is_order_independent_and_cached() {
        let mut sphere = GeodesicSphere::new();
        let m = sphere.midpoint(0, 1).unwrap();
        assert_eq!(m, 12);
        assert_eq!(sphere.midpoint(1, 0), Some(m));
        assert_eq!(sphere.midpoints().hits(), 1);
        assert_eq!(sphere.vertices().len(), 13);
        assert_eq!(sphere.midpoints().get(1, 0), Some(m));
    }

    #[test]
    fn test_midpoint_position_is_normalized_bisector() {
        let mut sphere = GeodesicSphere::new();
        let m = sphere.midpoint(3, 4).unwrap();
        let p = sphere.vertex(m).unwrap();
        let expected = (sphere.vertex(3).unwrap() + sphere.vertex(4).unwrap()).normalize();
        assert!((p - expected).length() < 1e-12);
    }

    #[test]
    fn test_midpoint_rejects_bad_indices() {
        let mut sphere = GeodesicSphere::new();
        assert_eq!(sphere.midpoint(0, 99), None);
        assert_eq!(sphere.midpoint(5, 5), None);
        assert_eq!(sphere.vertices().len(), 12);
    }

    #[test]
    fn test_shared_edge_reuses_midpoint() {
        // Base faces 0 = [2, 1, 0] and 1 = [2, 3, 1] share edge (1, 2).
        let mut sphere = GeodesicSphere::new();
        let roots = sphere.forest().roots().to_vec();
        sphere.subdivide_face(roots[0], 1);
        let cached = sphere.midpoints().get(1, 2).unwrap();
        let hits_before = sphere.midpoints().hits();
        let vertices_before = sphere.vertices().len();

        sphere.subdivide_face(roots[1], 1);

        assert!(sphere.midpoints().hits() > hits_before);
        assert_eq!(sphere.midpoints().get(2, 1), Some(cached));
        // Only the two unshared edges of the second face add vertices.
        assert_eq!(sphere.vertices().len(), vertices_before + 2);
        let uses_cached = sphere
            .face(roots[1])
            .unwrap()
            .children()
            .filter(|&c| sphere.face(c).unwrap().vertex_indices().contains(&cached))
            .count();
        assert_eq!(uses_cached, 3);
    }

    #[test]
    fn test_child_layout_matches_parent() {
        let mut sphere = GeodesicSphere::new();
        let root = sphere.forest().roots()[2];
        let [v0, v1, v2] = sphere.face(root).unwrap().vertex_indices();
        sphere.subdivide_face(root, 1);

        let a = sphere.midpoints().get(v0, v1).unwrap();
        let b = sphere.midpoints().get(v1, v2).unwrap();
        let c = sphere.midpoints().get(v2, v0).unwrap();
        let children: Vec<[u32; 3]> = sphere
            .face(root)
            .unwrap()
            .children()
            .map(|id| sphere.face(id).unwrap().vertex_indices())
            .collect();
        assert_eq!(children, vec![[v0, a, c], [v1, b, a], [v2, c, b], [a, b, c]]);
    }

    #[test]
    fn test_children_keep_outward_winding() {
        let sphere = GeodesicSphere::with_level(2).unwrap();
        for leaf in sphere.forest().leaves() {
            let [a, b, c] = sphere.face_positions(leaf).unwrap();
            let normal = (b - a).cross(c - a);
            assert!(normal.dot(a + b + c) > 0.0, "leaf {leaf} winds inward");
        }
    }

    #[test]
    fn test_incremental_subdivision_matches_direct() {
        let mut stepped = GeodesicSphere::new();
        stepped.subdivide(1).unwrap();
        stepped.subdivide(2).unwrap();
        let direct = GeodesicSphere::with_level(3).unwrap();
        assert_eq!(stepped.level(), 3);
        assert_eq!(stepped.vertices().len(), direct.vertices().len());
        assert_eq!(stepped.forest().leaf_count(), direct.forest().leaf_count());
    }

    #[test]
    fn test_subdivide_zero_is_noop() {
        let mut sphere = GeodesicSphere::new();
        sphere.subdivide(0).unwrap();
        assert_eq!(sphere.forest().len(), 20);
    }

    #[test]
    fn test_too_deep_is_rejected() {
        let mut sphere = GeodesicSphere::new();
        let err = sphere.subdivide(MAX_SUBDIVISION_LEVEL + 1).unwrap_err();
        assert_eq!(
            err,
            SubdivisionError::LevelTooDeep {
                requested: MAX_SUBDIVISION_LEVEL + 1,
                max: MAX_SUBDIVISION_LEVEL,
            }
        );
        assert_eq!(sphere.forest().len(), 20);
        assert_eq!(sphere.level(), 0);
    }

    #[test]
    fn test_subdivide_face_stops_at_target() {
        let mut sphere = GeodesicSphere::new();
        let root = sphere.forest().roots()[0];
        sphere.subdivide_face(root, 0);
        assert!(sphere.face(root).unwrap().is_leaf());
    }

    #[test]
    fn test_split_face_then_subdivide_stays_consistent() {
        let mut sphere = GeodesicSphere::new();
        let root = sphere.forest().roots()[0];
        sphere.subdivide_face(root, 1);

        sphere.subdivide(1).unwrap();
        assert_eq!(sphere.level(), 1);
        assert_eq!(sphere.forest().depth(), 1);
        assert_eq!(sphere.forest().leaf_count(), 80);
        for leaf in sphere.forest().leaves() {
            let face = sphere.face(leaf).unwrap();
            assert_eq!(face.level(), 1, "leaf {leaf}");
            assert_eq!(face.neighbor_count(), 3, "leaf {leaf}");
        }

        sphere.subdivide(1).unwrap();
        let child = sphere.face(root).unwrap().child(0).unwrap();
        let grandchild = sphere.face(child).unwrap().child(0).unwrap();
        assert_eq!(sphere.face(grandchild).unwrap().level(), 2);
        assert_eq!(sphere.forest().depth(), 2);
        assert_eq!(sphere.forest().leaf_count(), 320);
        assert_eq!(sphere.vertices().len(), 162);
    }
}
