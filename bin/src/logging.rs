//! Diagnostic logging setup.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Maps `-q` and the `-v` count to a default filter directive.
const fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the flags.
///
/// Logs go to stderr so payloads written to stdout stay machine-readable.
pub(crate) fn init(verbose: u8, quiet: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {e}"))
}
