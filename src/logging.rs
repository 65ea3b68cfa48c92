//! stderr tracing subscriber for the command-line binary.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::TryInitError;

/// Filter directive for the verbosity flags: `-q` → warn, none → info,
/// `-v` → debug, `-vv` → trace.
pub fn level_for(quiet: bool, verbose: u8) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init_subscriber(level: &str) -> Result<(), TryInitError> {
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish()
        .try_init()
}
