use anyhow::{Context, Result};
use scenesmith_infrastructure::{ClientConfig, ScenesmithPaths};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter; `RUST_LOG` is the fallback.
pub const LOG_ENV: &str = "SCENESMITH_LOG";

/// Installs the global subscriber.
///
/// Logs go to stderr. With `log_to_file` they are also written to a daily
/// rolling file under the config directory; keep the returned guard alive
/// until exit so buffered lines get flushed.
pub fn init(paths: &ScenesmithPaths, config: &ClientConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr = fmt::layer().with_writer(std::io::stderr).with_target(false);

    if !config.log_to_file {
        tracing_subscriber::registry().with(filter).with(stderr).init();
        return Ok(None);
    }

    let log_dir = paths.log_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, "scenesmith.log"));

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();
    tracing::debug!("[Logging] Writing logs to {}", log_dir.display());
    Ok(Some(guard))
}
