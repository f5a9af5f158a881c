//! Application logging functionality
//!
//! Installs the tracing subscriber: stderr always, plus a dated log file
//! (`glyphcorpus-<date>.log`, appended to) when a log directory is given.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "glyphcorpus=info";

const LOG_FILE_PREFIX: &str = "glyphcorpus";

/// Path of today's log file inside `dir`
pub fn current_log_file(dir: &Path) -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y-%m-%d");
    dir.join(format!("{LOG_FILE_PREFIX}-{timestamp}.log"))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Keep the returned guard alive until exit so buffered file output is flushed.
pub fn init(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let Some(dir) = log_dir else {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(stderr_layer)
            .try_init()
            .context("Failed to install logger")?;
        return Ok(None);
    };

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let log_file = current_log_file(dir);
    let file_name = log_file
        .file_name()
        .context("Log file path has no file name")?;
    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(stderr_layer)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .context("Failed to install logger")?;

    tracing::debug!("Logging to {}", log_file.display());
    Ok(Some(guard))
}
