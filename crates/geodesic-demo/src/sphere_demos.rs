//! Geodesic sphere demonstration functions.

use geodesic_sphere::{GeodesicSphere, MAX_SUBDIVISION_LEVEL, SphereMesh, SubdivisionError};
use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use tracing::{info, warn};

/// Builds a sphere one level at a time, logging counts after each step.
pub(crate) fn demonstrate_subdivision(level: u32) -> Result<GeodesicSphere, SubdivisionError> {
    info!("Starting subdivision demonstration");
    if level > MAX_SUBDIVISION_LEVEL {
        return Err(SubdivisionError::LevelTooDeep {
            requested: level,
            max: MAX_SUBDIVISION_LEVEL,
        });
    }

    let mut sphere = GeodesicSphere::new();
    for _ in 0..level {
        sphere.subdivide(1)?;
        info!(
            "Level {}: {} vertices, {} leaves, {} faces total, {} midpoint cache hits",
            sphere.level(),
            sphere.vertices().len(),
            sphere.forest().leaf_count(),
            sphere.forest().len(),
            sphere.midpoints().hits(),
        );
    }

    info!("Subdivision demonstration completed successfully");
    Ok(sphere)
}

/// Checks that every leaf of `sphere` has three mutual neighbors.
pub(crate) fn demonstrate_adjacency(sphere: &GeodesicSphere) -> usize {
    info!("Starting adjacency demonstration");

    let mut incomplete = 0;
    for leaf in sphere.forest().leaves() {
        let Some(face) = sphere.face(leaf) else {
            continue;
        };
        let mutual = face.neighbors().all(|n| {
            sphere
                .face(n)
                .is_some_and(|other| other.neighbors().any(|back| back == leaf))
        });
        if face.neighbor_count() != 3 || !mutual {
            incomplete += 1;
        }
    }

    if incomplete == 0 {
        info!("All {} leaves have three mutual neighbors", sphere.forest().leaf_count());
    } else {
        warn!("{incomplete} leaves have incomplete adjacency");
    }
    incomplete
}

/// Locates random directions and counts how many land in a leaf.
pub(crate) fn demonstrate_point_location(sphere: &GeodesicSphere, seed: u64) -> usize {
    info!("Starting point location demonstration");

    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    let sample_count = 200;
    let mut located = 0;

    for _ in 0..sample_count {
        let theta: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
        let phi: f64 = rng.gen_range(-1.0_f64..1.0).acos();
        let dir = DVec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos());
        if sphere
            .locate(dir)
            .and_then(|id| sphere.face(id))
            .is_some_and(|face| face.is_leaf())
        {
            located += 1;
        }
    }

    info!("Located {located}/{sample_count} random directions");
    located
}

/// Packs the leaves into render buffers and reports their size.
pub(crate) fn demonstrate_mesh_export(sphere: &GeodesicSphere) -> SphereMesh {
    let mesh = sphere.to_mesh();
    info!(
        "Mesh export: {} triangles, {} vertex bytes, {} index bytes",
        mesh.triangle_count(),
        mesh.vertex_bytes().len(),
        mesh.index_bytes().len(),
    );
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdivision_demo_matches_direct_build() {
        let stepped = demonstrate_subdivision(3).unwrap();
        let direct = GeodesicSphere::with_level(3).unwrap();
        assert_eq!(stepped.level(), 3);
        assert_eq!(stepped.vertices().len(), direct.vertices().len());
        assert_eq!(stepped.forest().leaf_count(), direct.forest().leaf_count());
    }

    #[test]
    fn test_subdivision_demo_rejects_too_deep() {
        assert!(demonstrate_subdivision(MAX_SUBDIVISION_LEVEL + 1).is_err());
    }

    #[test]
    fn test_adjacency_demo_finds_no_gaps() {
        let sphere = GeodesicSphere::with_level(3).unwrap();
        assert_eq!(demonstrate_adjacency(&sphere), 0);
    }

    #[test]
    fn test_point_location_demo_locates_everything() {
        let sphere = GeodesicSphere::with_level(2).unwrap();
        assert_eq!(demonstrate_point_location(&sphere, 77), 200);
    }

    #[test]
    fn test_mesh_export_demo() {
        let sphere = GeodesicSphere::with_level(1).unwrap();
        assert_eq!(demonstrate_mesh_export(&sphere).triangle_count(), 80);
    }
}
