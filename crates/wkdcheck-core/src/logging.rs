//! Logging init: tracing to stderr, so stdout stays clean for results.

use tracing_subscriber::EnvFilter;

/// Initialize structured logging to stderr.
///
/// `RUST_LOG` wins when set; otherwise `verbose` raises our own crates to
/// debug. Results go to stdout, diagnostics to stderr, so the two can be
/// piped independently.
pub fn init_logging(verbose: bool) {
    let default_directives = if verbose {
        "info,wkdcheck_core=debug,wkdcheck=debug"
    } else {
        "info"
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
