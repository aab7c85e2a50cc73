//! Lateral adjacency between faces of the same level.
//!
//! Resolution runs in two phases. The base faces are compared pairwise.
//! Every deeper face then only needs to look at its siblings and at the
//! children of its parent's neighbors ("cousins"), because an edge of a
//! child either lies inside the parent or on one of the parent's edges.
//! The walk is top-down, so a parent's neighbors are always known before
//! its children are resolved.

use crate::face::FaceId;
use crate::forest::FaceForest;

/// Returns true if two faces share exactly one edge, i.e. exactly two of
/// their three vertex indices.
#[must_use]
pub fn shares_edge(a: [u32; 3], b: [u32; 3]) -> bool {
    let mut a = a;
    let mut b = b;
    a.sort_unstable();
    b.sort_unstable();

    let (mut i, mut j, mut common) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                common += 1;
                i += 1;
                j += 1;
            }
        }
    }
    common == 2
}

/// Recompute every lateral neighbor link in the forest.
///
/// Existing links are cleared first, so calling this again after further
/// subdivision yields the same result as a fresh build.
pub fn resolve(forest: &mut FaceForest) {
    forest.clear_neighbors();
    link_roots(forest);

    let roots = forest.roots().to_vec();
    for root in roots {
        for child in children_of(forest, root) {
            resolve_face(forest, child);
        }
    }

    tracing::debug!(faces = forest.len(), "resolved face adjacency");
}

/// Phase A: brute-force comparison of every pair of base faces.
fn link_roots(forest: &mut FaceForest) {
    let roots = forest.roots().to_vec();
    for (n, &a) in roots.iter().enumerate() {
        for &b in &roots[n + 1..] {
            if edge_shared(forest, a, b) {
                link(forest, a, b);
            }
        }
    }
}

/// Phase B: find the neighbors of one non-root face, then descend.
fn resolve_face(forest: &mut FaceForest, id: FaceId) {
    let Some(parent) = forest.parent_of(id) else {
        return;
    };

    let mut found = Vec::with_capacity(3);
    for sibling in children_of(forest, parent) {
        if sibling != id && edge_shared(forest, id, sibling) {
            found.push(sibling);
        }
    }
    for uncle in neighbors_of(forest, parent) {
        for cousin in children_of(forest, uncle) {
            if edge_shared(forest, id, cousin) {
                found.push(cousin);
            }
        }
    }

    if let Some(face) = forest.get_mut(id) {
        for neighbor in found {
            face.add_neighbor(neighbor);
        }
    }

    for child in children_of(forest, id) {
        resolve_face(forest, child);
    }
}

fn edge_shared(forest: &FaceForest, a: FaceId, b: FaceId) -> bool {
    match (forest.get(a), forest.get(b)) {
        (Some(fa), Some(fb)) => shares_edge(fa.vertex_indices(), fb.vertex_indices()),
        _ => false,
    }
}

fn link(forest: &mut FaceForest, a: FaceId, b: FaceId) {
    if let Some(face) = forest.get_mut(a) {
        face.add_neighbor(b);
    }
    if let Some(face) = forest.get_mut(b) {
        face.add_neighbor(a);
    }
}

fn children_of(forest: &FaceForest, id: FaceId) -> Vec<FaceId> {
    forest
        .get(id)
        .map(|face| face.children().collect())
        .unwrap_or_default()
}

fn neighbors_of(forest: &FaceForest, id: FaceId) -> Vec<FaceId> {
    forest
        .get(id)
        .map(|face| face.neighbors().collect())
        .unwrap_or_default()
}
