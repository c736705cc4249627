//! Tracing subscriber setup.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()))
}

/// Log to stderr, keeping stdout for command output.
pub fn init_stderr(level: LogLevel) {
    tracing_subscriber::registry()
        .with(filter(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Default picker log file: `<cache dir>/typeahead/pick.log`.
pub fn default_log_file() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("typeahead").join("pick.log"))
}

/// Log to a file so the terminal UI stays clean.
///
/// Returns `None` when no log file location is available. The guard must be
/// held until exit so buffered lines are flushed.
pub fn init_file(level: LogLevel, path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_log_file) else {
        return Ok(None);
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter(level))
        .with(file_layer)
        .init();

    Ok(Some(guard))
}
