//! A single triangle in the refinement forest.

use std::fmt;

/// Number of lateral neighbor slots on a face (one per edge).
pub const NEIGHBOR_SLOTS: usize = 3;

/// Number of child slots on a face (3 corners + 1 center).
pub const CHILD_SLOTS: usize = 4;

/// Stable handle to a face stored in a [`FaceForest`](crate::FaceForest).
///
/// Handles are never reused: a face keeps its id for the lifetime of the
/// forest that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(u32);

impl FaceId {
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "face index overflow: {index}");
        Self(index as u32)
    }

    /// Position of this face in the forest's arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One triangle of the geodesic mesh.
///
/// A face is either a leaf or has exactly [`CHILD_SLOTS`] children. All
/// relations (children, parent, neighbors) are [`FaceId`] handles into the
/// owning forest; the face itself owns nothing but its indices and payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    vertex_indices: [u32; 3],
    children: [Option<FaceId>; CHILD_SLOTS],
    neighbors: [Option<FaceId>; NEIGHBOR_SLOTS],
    parent: Option<FaceId>,
    level: u32,
    data: f32,
}

impl Face {
    /// Create a detached face at the given subdivision depth.
    #[must_use]
    pub fn new(vertex_indices: [u32; 3], level: u32) -> Self {
        debug_assert!(
            vertex_indices[0] != vertex_indices[1]
                && vertex_indices[1] != vertex_indices[2]
                && vertex_indices[0] != vertex_indices[2],
            "degenerate face {vertex_indices:?}"
        );
        Self {
            vertex_indices,
            children: [None; CHILD_SLOTS],
            neighbors: [None; NEIGHBOR_SLOTS],
            parent: None,
            level,
            data: 0.0,
        }
    }

    /// The three vertex buffer indices, in winding order.
    #[must_use]
    pub fn vertex_indices(&self) -> [u32; 3] {
        self.vertex_indices
    }

    pub fn set_vertex_indices(&mut self, indices: [u32; 3]) {
        self.vertex_indices = indices;
    }

    /// Depth in the refinement tree. Base faces are level 0.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn data(&self) -> f32 {
        self.data
    }

    pub fn set_data(&mut self, value: f32) {
        self.data = value;
    }

    pub(crate) fn data_mut(&mut self) -> &mut f32 {
        &mut self.data
    }

    // --- Neighbors ---

    /// Neighbor stored in `slot`, or `None` if the slot is empty or out of range.
    #[must_use]
    pub fn neighbor(&self, slot: usize) -> Option<FaceId> {
        self.neighbors.get(slot).copied().flatten()
    }

    /// Overwrite a neighbor slot. Out-of-range slots are ignored.
    pub fn set_neighbor(&mut self, slot: usize, neighbor: Option<FaceId>) {
        if let Some(entry) = self.neighbors.get_mut(slot) {
            *entry = neighbor;
        }
    }

    /// Insert `neighbor` into the first empty slot.
    ///
    /// Returns `false` without modifying the face if `neighbor` is already
    /// present or every slot is taken.
    pub fn add_neighbor(&mut self, neighbor: FaceId) -> bool {
        if self.neighbors.contains(&Some(neighbor)) {
            tracing::trace!(%neighbor, "neighbor already linked");
            return false;
        }
        let Some(slot) = self.neighbors.iter().position(Option::is_none) else {
            tracing::debug!(%neighbor, face = %self, "neighbor slots full, link dropped");
            return false;
        };
        self.neighbors[slot] = Some(neighbor);
        true
    }

    /// Iterate over the linked neighbors, skipping empty slots.
    pub fn neighbors(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.neighbors.iter().flatten().copied()
    }

    /// Number of linked neighbors.
    #[must_use]
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.iter().filter(|n| n.is_some()).count()
    }

    pub fn clear_neighbors(&mut self) {
        self.neighbors = [None; NEIGHBOR_SLOTS];
    }

    // --- Children ---

    /// Child stored in `slot`, or `None` if the slot is empty or out of range.
    #[must_use]
    pub fn child(&self, slot: usize) -> Option<FaceId> {
        self.children.get(slot).copied().flatten()
    }

    /// Overwrite a child slot. Out-of-range slots are ignored.
    pub fn set_child(&mut self, slot: usize, child: Option<FaceId>) {
        if let Some(entry) = self.children.get_mut(slot) {
            *entry = child;
        }
    }

    /// Insert `child` into the first empty slot. Returns `false` if the
    /// child is already present or all four slots are taken.
    pub fn add_child(&mut self, child: FaceId) -> bool {
        if self.children.contains(&Some(child)) {
            tracing::debug!(%child, "child already attached");
            return false;
        }
        let Some(slot) = self.children.iter().position(Option::is_none) else {
            tracing::debug!(%child, face = %self, "child slots full, child not added");
            return false;
        };
        self.children[slot] = Some(child);
        true
    }

    /// Iterate over attached children in slot order.
    pub fn children(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.children.iter().flatten().copied()
    }

    /// Returns true if this face has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    // --- Parent ---

    /// Raw parent handle. Use [`FaceForest::parent_of`](crate::FaceForest::parent_of)
    /// to resolve it against a forest.
    #[must_use]
    pub fn parent(&self) -> Option<FaceId> {
        self.parent
    }

    /// Attach the parent back-link. A parent, once set, is never replaced;
    /// returns `false` if the face already had one.
    pub fn set_parent(&mut self, parent: FaceId) -> bool {
        match self.parent {
            None => {
                self.parent = Some(parent);
                true
            }
            Some(existing) if existing == parent => true,
            Some(existing) => {
                tracing::debug!(%existing, %parent, "parent already set, ignoring");
                false
            }
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.vertex_indices;
        write!(f, "Face(vertices: [{a}, {b}, {c}], data: {})", self.data)
    }
}
