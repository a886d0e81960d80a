//! Logging setup using `tracing-subscriber`.
//!
//! Console-only: human-readable events on stderr, filtered by `RUST_LOG`.
//! Without `RUST_LOG` the level is `warn`, or `debug` with `--verbose`.

use tracing_subscriber::EnvFilter;

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Initialise logging for a one-shot CLI run.
pub fn init_cli(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
