//! Logging setup
//!
//! Logs go to stderr so stdout stays clean for JSON output. Set
//! `ELASTIC_BRIDGE_LOG_DIR` to also write a daily-rolling log file.

use anyhow::{anyhow, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_FILTER: &str = "elastic_agent_bridge=warn";
pub const LOG_DIR_ENV: &str = "ELASTIC_BRIDGE_LOG_DIR";
const LOG_FILE_PREFIX: &str = "elastic-agent-bridge.log";

/// Build the filter: explicit override, then `RUST_LOG`, then the default
pub fn build_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(level) => EnvFilter::try_new(level).map_err(|e| anyhow!("Invalid log level {:?}: {}", level, e)),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Install the global subscriber
///
/// Keep the returned guard alive for the life of the process; dropping it
/// stops the file writer.
pub fn init_logging(level: Option<&str>) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(level)?;

    let (file_layer, guard) = match std::env::var(LOG_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => {
            let appender = tracing_appender::rolling::daily(dir.trim(), LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise logging: {}", e))?;

    Ok(guard)
}
