//! Tracing subscriber setup for the CLI.

use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,simplechat=debug";

/// Picks the log filter.
///
/// `verbose` wins over `RUST_LOG`, which wins over [`DEFAULT_FILTER`].
pub fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize console telemetry.
///
/// Logs go to stderr so command output on stdout stays pipeable. With `json`
/// set, each event is one JSON line.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_console_telemetry(
    verbose: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let registry = tracing_subscriber::registry().with(env_filter(verbose));

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    debug!(verbose, json, "Telemetry initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_overrides_everything() {
        assert_eq!(env_filter(true).to_string(), "debug");
    }
}
