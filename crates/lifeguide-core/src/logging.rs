//! File logging for the CLI.
//!
//! Events go to a daily-rolling `lifeguide.log` under the logs directory.
//! The filter comes from `LIFEGUIDE_LOG` (`RUST_LOG` syntax), default `warn`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::paths;

pub const LOG_ENV: &str = "LIFEGUIDE_LOG";
const LOG_FILE: &str = "lifeguide.log";
const DEFAULT_LEVEL: &str = "warn";

/// Builds the filter from `LIFEGUIDE_LOG`, falling back to `warn` when unset
/// or unparsable.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Installs the global subscriber writing to the default logs directory.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes and stops the background writer.
pub fn init() -> Result<WorkerGuard> {
    init_in(&paths::logs_dir())
}

pub fn init_in(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(env_filter())
        .try_init()
        .context("Failed to install log subscriber")?;

    tracing::debug!(dir = %dir.display(), "Logging initialized");
    Ok(guard)
}
