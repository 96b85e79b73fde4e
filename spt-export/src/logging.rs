//! Tracing filter selection
//!
//! The subscriber is installed before the config file is read, so the filter
//! starts from `RUST_LOG` or [`DEFAULT_LOG_LEVEL`] and is swapped for the
//! configured level once the file is loaded.

use tracing_subscriber::EnvFilter;

/// Level used until the config file has been read
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Filter to install at startup, and whether it came from `RUST_LOG`
pub fn startup_filter(rust_log: Option<&str>) -> (EnvFilter, bool) {
    match rust_log.and_then(|directives| EnvFilter::try_new(directives).ok()) {
        Some(filter) => (filter, true),
        None => (EnvFilter::new(DEFAULT_LOG_LEVEL), false),
    }
}

/// Replacement filter for the configured level
///
/// `None` when `RUST_LOG` already chose the filter.
pub fn configured_filter(from_env: bool, level: &str) -> Option<EnvFilter> {
    (!from_env).then(|| EnvFilter::new(level))
}
