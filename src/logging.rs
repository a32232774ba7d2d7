use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

const FILTER_ENV: &str = "AGENT_TOOLKIT_LOG";
const DEFAULT_FILTER: &str = "agent_toolkit=info";
const LOG_FILE: &str = "agent-toolkit.log";

/// Initialize logging to file (never stdout).
///
/// Returns `None` and leaves logging off when the log file cannot be set
/// up. Keep the guard alive until exit so buffered lines are flushed.
pub fn init(binary: &str) -> Option<WorkerGuard> {
    let log_dir = log_dir();
    fs::create_dir_all(&log_dir).ok()?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE)
        .build(&log_dir)
        .ok()?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter =
        EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
        .ok()?;

    tracing::info!("{binary} starting");
    Some(guard)
}

fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "agent-toolkit")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("agent-toolkit"))
}
