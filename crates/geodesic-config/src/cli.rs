//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Geodesic sphere command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "geodesic", about = "Build and query a geodesic sphere")]
pub struct CliArgs {
    /// Subdivision level.
    #[arg(long)]
    pub level: Option<u32>,

    /// Seed for the per-face payload.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Direction to locate, as `x,y,z`. May be repeated.
    #[arg(long, value_parser = parse_direction, allow_hyphen_values = true)]
    pub locate: Vec<[f64; 3]>,
}

/// Parse a direction written as three comma-separated numbers.
pub fn parse_direction(s: &str) -> Result<[f64; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let &[x, y, z] = parts.as_slice() else {
        return Err(format!("expected `x,y,z`, got `{s}`"));
    };
    let parse = |part: &str| {
        part.parse::<f64>()
            .map_err(|e| format!("invalid component `{part}`: {e}"))
    };
    Ok([parse(x)?, parse(y)?, parse(z)?])
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    ///
    /// `--locate` directions are appended to the configured ones.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(level) = args.level {
            self.mesh.subdivision_level = level;
        }
        if let Some(seed) = args.seed {
            self.payload.seed = seed;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        self.mesh.locate.extend_from_slice(&args.locate);
    }
}
