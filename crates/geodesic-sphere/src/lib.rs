//! Geodesic sphere geometry: icosahedron subdivision, a face hierarchy with
//! lateral adjacency, and direction-to-face point location.

mod adjacency;
mod face;
mod forest;
mod icosahedron;
mod locate;
mod mesh;
mod subdivision;
mod visitor;


pub use adjacency::{resolve as resolve_adjacency, shares_edge};
pub use face::{CHILD_SLOTS, Face, FaceId, NEIGHBOR_SLOTS};
pub use forest::FaceForest;
pub use icosahedron::{
    BASE_FACE_COUNT, BASE_FACES, BASE_VERTEX_COUNT, GOLDEN_RATIO, base_vertices,
};
pub use locate::{
    BARYCENTRIC_TOLERANCE, INTERSECTION_EPSILON, LOCATE_SCALE, RayHit, segment_triangle_intersect,
};
pub use mesh::{SphereMesh, SphereVertex};
pub use subdivision::{GeodesicSphere, MAX_SUBDIVISION_LEVEL, MidpointCache, SubdivisionError};
pub use visitor::{FaceVisitor, VisitedFace};
