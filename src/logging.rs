//! Debug logging to stderr.
//!
//! Off unless `BITHOOKER_LOG` or `--verbose` asks for it, so hook output and
//! error chains reach the server undisturbed.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "BITHOOKER_LOG";

pub fn init(verbose: bool) {
    let default = if verbose { "bithooker=debug" } else { "off" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    // Only fails if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}
