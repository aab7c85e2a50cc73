//! Arena that owns every face of the mesh.
//!
//! Faces live in a flat `Vec` and refer to each other only through
//! [`FaceId`] handles, so ownership is strictly tree-shaped: the forest owns
//! all faces, and child, parent and neighbor links are plain lookups.

use crate::face::{CHILD_SLOTS, Face, FaceId};

/// The 20 refinement trees of a geodesic sphere, stored in one arena.
#[derive(Clone, Debug, Default)]
pub struct FaceForest {
    faces: Vec<Face>,
    roots: Vec<FaceId>,
}

impl FaceForest {
    /// Create an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root face (no parent).
    pub(crate) fn push_root(&mut self, face: Face) -> FaceId {
        let id = FaceId::from_index(self.faces.len());
        self.faces.push(face);
        self.roots.push(id);
        id
    }

    /// Add `face` as the next child of `parent`, wiring both directions.
    ///
    /// Returns `None` and stores nothing if `parent` does not exist or
    /// already has all of its children.
    pub(crate) fn push_child(&mut self, parent: FaceId, mut face: Face) -> Option<FaceId> {
        let parent_face = self.faces.get(parent.index())?;
        if parent_face.children().count() >= CHILD_SLOTS {
            tracing::debug!(%parent, "parent already has all children");
            return None;
        }

        let id = FaceId::from_index(self.faces.len());
        face.set_parent(parent);
        self.faces.push(face);
        self.faces[parent.index()].add_child(id);
        Some(id)
    }

    /// Look up a face by handle.
    #[must_use]
    pub fn get(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: FaceId) -> Option<&mut Face> {
        self.faces.get_mut(id.index())
    }

    /// Resolve the parent of `id`.
    ///
    /// Returns `None` for roots and for any handle that does not resolve to
    /// a face in this forest.
    #[must_use]
    pub fn parent_of(&self, id: FaceId) -> Option<FaceId> {
        let parent = self.get(id)?.parent()?;
        self.get(parent).map(|_| parent)
    }

    /// Handles of the base faces, in construction order.
    #[must_use]
    pub fn roots(&self) -> &[FaceId] {
        &self.roots
    }

    /// Total number of faces at every level.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Iterate over every face in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (FaceId, &Face)> + '_ {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, face)| (FaceId::from_index(i), face))
    }

    /// Every face in pre-order: each root in order, a face before its
    /// children, children in slot order.
    #[must_use]
    pub fn pre_order(&self) -> Vec<FaceId> {
        let mut order = Vec::with_capacity(self.faces.len());
        let mut stack: Vec<FaceId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(face) = self.get(id) else {
                continue;
            };
            order.push(id);
            let children: Vec<FaceId> = face.children().collect();
            stack.extend(children.into_iter().rev());
        }
        order
    }

    /// Current leaf faces, in pre-order.
    #[must_use]
    pub fn leaves(&self) -> Vec<FaceId> {
        self.pre_order()
            .into_iter()
            .filter(|&id| self.get(id).is_some_and(Face::is_leaf))
            .collect()
    }

    /// Number of current leaf faces.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.faces.iter().filter(|face| face.is_leaf()).count()
    }

    /// Deepest level present in the forest.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.faces.iter().map(Face::level).max().unwrap_or(0)
    }

    /// Remove every lateral link, keeping the tree structure intact.
    pub(crate) fn clear_neighbors(&mut self) {
        for face in &mut self.faces {
            face.clear_neighbors();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_forest() -> (FaceForest, FaceId) {
        let mut forest = FaceForest::new();
        let root = forest.push_root(Face::new([0, 1, 2], 0));
        forest.push_root(Face::new([0, 2, 3], 0));
        for indices in [[0, 4, 6], [1, 5, 4], [2, 6, 5], [4, 5, 6]] {
            forest.push_child(root, Face::new(indices, 1));
        }
        (forest, root)
    }

    #[test]
    fn test_push_child_links_both_directions() {
        let (forest, root) = small_forest();
        let root_face = forest.get(root).unwrap();
        assert_eq!(root_face.children().count(), 4);
        for child in root_face.children() {
            assert_eq!(forest.parent_of(child), Some(root));
            assert_eq!(forest.get(child).unwrap().level(), 1);
        }
        assert_eq!(forest.parent_of(root), None);
    }

    #[test]
    fn test_fifth_child_is_rejected() {
        let (mut forest, root) = small_forest();
        let before = forest.len();
        assert!(forest.push_child(root, Face::new([7, 8, 9], 1)).is_none());
        assert_eq!(forest.len(), before);
    }

    #[test]
    fn test_parent_of_dangling_handle_is_none() {
        let (forest, _) = small_forest();
        assert_eq!(forest.parent_of(FaceId::from_index(999)), None);
        assert!(forest.get(FaceId::from_index(999)).is_none());
    }

    #[test]
    fn test_pre_order_visits_parent_before_children() {
        let (forest, root) = small_forest();
        let order = forest.pre_order();
        assert_eq!(order.len(), forest.len());
        assert_eq!(order[0], root);
        // Children of the first root come before the second root.
        let second_root = forest.roots()[1];
        assert_eq!(order[5], second_root);
        let children: Vec<FaceId> = forest.get(root).unwrap().children().collect();
        assert_eq!(&order[1..5], children.as_slice());
    }

    #[test]
    fn test_leaves_exclude_subdivided_faces() {
        let (forest, root) = small_forest();
        let leaves = forest.leaves();
        assert_eq!(leaves.len(), 5);
        assert_eq!(forest.leaf_count(), 5);
        assert!(!leaves.contains(&root));
        assert_eq!(forest.depth(), 1);
    }
}
