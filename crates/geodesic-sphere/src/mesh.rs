//! Vertex and index buffers for the current leaf triangles.
//!
//! [`SphereVertex`] is a 12-byte `Pod` vertex so the buffers can be handed to
//! a GPU upload path without copying.

use crate::subdivision::GeodesicSphere;

/// A single mesh vertex. On the unit sphere the position doubles as the normal.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereVertex {
    /// Unit-sphere position.
    pub position: [f32; 3],
}

static_assertions::assert_eq_size!(SphereVertex, [u8; 12]);

/// Vertex and index buffers for the leaves of a [`GeodesicSphere`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SphereMesh {
    /// One entry per vertex in the sphere's buffer, same order.
    pub vertices: Vec<SphereVertex>,
    /// Three indices per leaf triangle, in each face's winding order.
    pub indices: Vec<u32>,
}

impl SphereMesh {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the number of triangles in the mesh.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the vertex data as a byte slice for GPU upload (zero-copy).
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Returns the index data as a byte slice for GPU upload (zero-copy).
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

impl GeodesicSphere {
    /// Flat triangle list for the current leaves, three indices per face in
    /// pre-order. Interior (already subdivided) faces are never included.
    #[must_use]
    pub fn leaf_indices(&self) -> Vec<u32> {
        let leaves = self.forest().leaves();
        let mut indices = Vec::with_capacity(leaves.len() * 3);
        for leaf in leaves {
            if let Some(face) = self.face(leaf) {
                indices.extend_from_slice(&face.vertex_indices());
            }
        }
        indices
    }

    /// Pack the vertex buffer and leaf triangles for rendering.
    #[must_use]
    pub fn to_mesh(&self) -> SphereMesh {
        let vertices = self
            .vertices()
            .iter()
            .map(|v| SphereVertex {
                position: v.as_vec3().to_array(),
            })
            .collect();
        SphereMesh {
            vertices,
            indices: self.leaf_indices(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icosahedron::BASE_FACES;

    #[test]
    fn test_vertex_size_is_12_bytes() {
        assert_eq!(std::mem::size_of::<SphereVertex>(), 12);
    }

    #[test]
    fn test_base_indices_match_icosahedron() {
        let sphere = GeodesicSphere::new();
        let expected: Vec<u32> = BASE_FACES.iter().flatten().copied().collect();
        assert_eq!(sphere.leaf_indices(), expected);
    }

    #[test]
    fn test_indices_only_cover_leaves() {
        let sphere = GeodesicSphere::with_level(2).unwrap();
        let mesh = sphere.to_mesh();
        assert_eq!(mesh.triangle_count(), 320);
        assert_eq!(mesh.vertices.len(), 162);
        let vertex_count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < vertex_count));
    }

    #[test]
    fn test_every_vertex_is_referenced() {
        let sphere = GeodesicSphere::with_level(1).unwrap();
        let mut used = vec![false; sphere.vertices().len()];
        for i in sphere.leaf_indices() {
            used[i as usize] = true;
        }
        assert!(used.iter().all(|&u| u));
    }

    #[test]
    fn test_byte_views_have_expected_length() {
        let mesh = GeodesicSphere::with_level(1).unwrap().to_mesh();
        assert_eq!(mesh.vertex_bytes().len(), mesh.vertices.len() * 12);
        assert_eq!(mesh.index_bytes().len(), mesh.indices.len() * 4);
        assert!(!mesh.is_empty());
    }
}
