//! Configuration for geodesic sphere builds.
//!
//! Settings persist to disk as RON files and can be overridden from the
//! command line via clap.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, parse_direction};
pub use config::{Config, DebugConfig, MeshConfig, PayloadConfig};
pub use error::ConfigError;
