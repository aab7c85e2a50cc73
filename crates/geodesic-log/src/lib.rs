//! Structured logging for geodesic sphere builds.
//!
//! Installs a `tracing` subscriber with console output (uptime timestamps and
//! module paths) and, in debug builds, a JSON log file for post-mortem
//! analysis. The level comes from `RUST_LOG` if set, otherwise from the
//! config's `debug.log_level`.

use std::path::{Path, PathBuf};

use geodesic_config::Config;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

/// Filter used when neither `RUST_LOG` nor the config specify a level.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "geodesic.log";

/// Initialize the global tracing subscriber.
///
/// * `debug_build` - enables the JSON file layer when the config names a `log_dir`
/// * `config` - optional configuration for the level and log directory
///
/// If a global subscriber is already installed it is kept and a note is
/// printed to stderr.
///
/// # Examples
///
/// ```no_run
/// use geodesic_config::Config;
/// use geodesic_log::init_logging;
///
/// init_logging(false, None);
///
/// let config = Config::default();
/// init_logging(cfg!(debug_assertions), Some(&config));
/// ```
pub fn init_logging(debug_build: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_string(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(false)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    let log_dir = config.and_then(|c| c.debug.log_dir.as_deref());
    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_file_path(log_dir))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        report_init(subscriber.with(file_layer).try_init());
        return;
    }

    report_init(subscriber.try_init());
}

/// Print a failed install to stderr. Returns whether the install succeeded.
fn report_init(result: Result<(), TryInitError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            eprintln!("geodesic-log: keeping existing subscriber ({e})");
            false
        }
    }
}

/// The filter directive to use for `config`, ignoring `RUST_LOG`.
#[must_use]
pub fn filter_string(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Where the JSON log goes inside `log_dir`.
#[must_use]
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

/// Create an `EnvFilter` with the default filter string.
#[must_use]
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
