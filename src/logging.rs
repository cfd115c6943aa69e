//! Diagnostic logging setup.
//!
//! User-facing notices go through [`crate::core::notify`]; this is only the
//! `tracing` subscriber for diagnostics, always written to stderr.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "CHATHUB_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Filter precedence: explicit `--log-level`, then `CHATHUB_LOG`, then `warn`.
/// Invalid directives fall through to the next source.
pub fn build_filter(cli_level: Option<&str>) -> EnvFilter {
    cli_level
        .and_then(|level| EnvFilter::try_new(level).ok())
        .or_else(|| EnvFilter::try_from_env(LOG_ENV_VAR).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

pub fn init_tracing(cli_level: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(cli_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
