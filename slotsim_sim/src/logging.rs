//! Tracing subscriber setup for the binary.

use tracing_subscriber::{fmt, EnvFilter};

/// Default log level (overridden by `RUST_LOG`).
pub const LOG_LEVEL: &str = "info";

/// Installs a compact fmt subscriber writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` over
/// the default. Calling this twice is harmless.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { LOG_LEVEL };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(LOG_LEVEL));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .compact()
        .with_writer(std::io::stderr)
        .try_init();
}
