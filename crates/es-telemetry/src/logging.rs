use tracing_subscriber::{fmt, EnvFilter};

/// Build the filter from `RUST_LOG`, falling back to `default_level`
/// (e.g. "info", "es_core=debug,warn").
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install a human-readable subscriber writing to stderr.
///
/// Stdout is left to command output. Only the first call installs a
/// subscriber; later calls are no-ops.
pub fn init_logging(app_name: &str, default_level: &str) {
    fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact()
        .try_init()
        .ok();

    tracing::debug!(app = app_name, "logging initialised");
}

/// Install a JSON subscriber writing one object per line to stderr.
///
/// Only the first call installs a subscriber; later calls are no-ops.
pub fn init_logging_json(app_name: &str, default_level: &str) {
    fmt()
        .json()
        .with_env_filter(env_filter(default_level))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_current_span(false)
        .try_init()
        .ok();

    tracing::debug!(app = app_name, "logging initialised (json)");
}
