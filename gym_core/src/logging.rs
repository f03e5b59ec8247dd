//! Logging infrastructure for the workout API.
//!
//! Provides centralized tracing setup for the server binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Run `f` under a temporary INFO subscriber
///
/// Used while the config file (which carries the real level) is being read.
/// RUST_LOG still takes precedence.
pub fn with_bootstrap<T>(f: impl FnOnce() -> T) -> T {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().compact().with_env_filter(filter).finish();
    tracing::subscriber::with_default(subscriber, f)
}

/// Initialize logging with a specific default level
///
/// # Arguments
/// * `default_level` - Default log level (debug, info, warn, error)
///
/// This can still be overridden by RUST_LOG environment variable.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

/// Initialize logging for tests; safe to call more than once
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
