mod payload;
mod sphere_demos;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use geodesic_config::{CliArgs, Config};
use geodesic_sphere::GeodesicSphere;
use glam::DVec3;
use tracing::{error, info, warn};

use payload::RandomPayloadVisitor;

/// Resolve the config directory from `--config` or the platform default.
fn config_dir(args: &CliArgs) -> PathBuf {
    args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("geodesic")
    })
}

/// Locate each configured direction and log the face it lands in.
fn locate_directions(sphere: &GeodesicSphere, directions: &[[f64; 3]]) {
    for &direction in directions {
        let dir = DVec3::from_array(direction);
        match sphere.locate(dir).and_then(|id| sphere.face(id).map(|f| (id, f))) {
            Some((id, face)) => {
                info!("Direction {dir} lies in face {id} at level {}: {face}", face.level());
            }
            None => warn!("Direction {dir} was not located"),
        }
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Load or create config, then apply CLI overrides
    let config_dir = config_dir(&args);
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    geodesic_log::init_logging(cfg!(debug_assertions), Some(&config));

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    let level = config.mesh.subdivision_level;
    let mut sphere = match sphere_demos::demonstrate_subdivision(level) {
        Ok(sphere) => sphere,
        Err(e) => {
            error!("Failed to build sphere: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Built geodesic sphere at level {}: {} vertices, {} leaf faces",
        sphere.level(),
        sphere.vertices().len(),
        sphere.forest().leaf_count(),
    );

    let mut visitor =
        RandomPayloadVisitor::new(config.payload.seed, config.payload.min, config.payload.max);
    sphere.apply_visitor(&mut visitor);
    if let Some((lowest, highest)) = visitor.range() {
        info!(
            "Assigned payload to {} faces (range {lowest:.3}..{highest:.3})",
            visitor.visited()
        );
    }

    sphere_demos::demonstrate_adjacency(&sphere);
    sphere_demos::demonstrate_point_location(&sphere, config.payload.seed);
    sphere_demos::demonstrate_mesh_export(&sphere);

    locate_directions(&sphere, &config.mesh.locate);

    ExitCode::SUCCESS
}
