//! Log setup for the `travel` binary.
//!
//! Everything goes to stderr so that stdout stays machine readable.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;

/// Installs a global `fmt` subscriber.
///
/// `RUST_LOG` or `TRAVEL_LOG` take precedence over the flags. Otherwise
/// `log_level` is used if given (a bare level applies to this crate, a full
/// directive is used as is), then `verbose` selects `debug` over `warn`.
pub fn init_tracing(verbose: bool, log_level: Option<&str>) -> Result<(), TryInitError> {
    let directive = match (verbose, log_level) {
        (_, Some(level)) if level.contains('=') => level.to_string(),
        (_, Some(level)) => crate_directive(level),
        (true, None) => crate_directive("debug"),
        (false, None) => crate_directive("warn"),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("TRAVEL_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()
}

fn crate_directive(level: &str) -> String {
    format!("travel_planner={level},travel={level}")
}
