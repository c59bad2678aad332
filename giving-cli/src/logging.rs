use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialise the global `tracing` subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over the configured level; an unparseable
/// level falls back to `warn`.
pub fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry().with(filter).with(layer).init();
}
