//! Pre-order traversal that lets outside code write the per-face payload.

use glam::DVec3;

use crate::face::FaceId;
use crate::subdivision::GeodesicSphere;

/// An operation applied to every face of a sphere.
///
/// Visitors see a face's geometry but can only change its scalar payload;
/// the topology is not reachable through [`VisitedFace`]. Any
/// `FnMut(&mut VisitedFace)` closure is a visitor.
pub trait FaceVisitor {
    /// Process one face.
    fn visit(&mut self, face: &mut VisitedFace<'_>);
}

impl<F> FaceVisitor for F
where
    F: FnMut(&mut VisitedFace<'_>),
{
    fn visit(&mut self, face: &mut VisitedFace<'_>) {
        self(face);
    }
}

/// A read-only view of one face plus write access to its payload.
#[derive(Debug)]
pub struct VisitedFace<'a> {
    id: FaceId,
    level: u32,
    is_leaf: bool,
    vertex_indices: [u32; 3],
    positions: [DVec3; 3],
    data: &'a mut f32,
}

impl VisitedFace<'_> {
    #[must_use]
    pub fn id(&self) -> FaceId {
        self.id
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    #[must_use]
    pub fn vertex_indices(&self) -> [u32; 3] {
        self.vertex_indices
    }

    /// Corner positions on the unit sphere, in winding order.
    #[must_use]
    pub fn positions(&self) -> [DVec3; 3] {
        self.positions
    }

    /// Unit direction through the middle of the face.
    #[must_use]
    pub fn center_direction(&self) -> DVec3 {
        let [a, b, c] = self.positions;
        (a + b + c).normalize_or_zero()
    }

    #[must_use]
    pub fn data(&self) -> f32 {
        *self.data
    }

    pub fn set_data(&mut self, value: f32) {
        *self.data = value;
    }
}

impl GeodesicSphere {
    /// Apply `visitor` to every face, a face before its children and the
    /// base faces in order.
    pub fn apply_visitor<V>(&mut self, visitor: &mut V)
    where
        V: FaceVisitor + ?Sized,
    {
        let order = self.forest().pre_order();
        let visited = order.len();
        for id in order {
            let Some(positions) = self.face_positions(id) else {
                continue;
            };
            let Some(face) = self.forest_mut().get_mut(id) else {
                continue;
            };
            let mut view = VisitedFace {
                id,
                level: face.level(),
                is_leaf: face.is_leaf(),
                vertex_indices: face.vertex_indices(),
                positions,
                data: face.data_mut(),
            };
            visitor.visit(&mut view);
        }
        tracing::debug!(faces = visited, "applied face visitor");
    }

    /// Closure form of [`apply_visitor`](Self::apply_visitor).
    pub fn for_each_face<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut VisitedFace<'_>),
    {
        self.apply_visitor(&mut f);
    }
}
