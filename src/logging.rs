//! Log output to stdout and a session log file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

use crate::constants::LOG_FILE_NAME;
use crate::paths;

/// Filter used when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "info,rnacanvas=debug";

/// Install the global subscriber, logging to stdout and `logs_dir/rnacanvas.log`.
///
/// The returned guard flushes the file writer when dropped, keep it alive for
/// the duration of the program. Returns `None` if the logs directory cannot be
/// created. If a subscriber is already installed the new one is discarded.
pub fn setup_logging(logs_dir: &Path) -> Option<WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(logs_dir) {
        eprintln!("Failed to create logs directory {:?}: {}", logs_dir, e);
        return None;
    }

    let log_file_path = logs_dir.join(LOG_FILE_NAME);

    // Append session separator to existing log file
    if let Ok(mut file) = OpenOptions::new().append(true).open(&log_file_path) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let separator = "=".repeat(80);
        let _ = writeln!(
            file,
            "\n\n{}\n=== New Session Started at {} ===\n{}\n",
            separator, timestamp, separator
        );
    }

    let file_appender = tracing_appender::rolling::never(logs_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // No ANSI colors in the file
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_level(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
    {
        tracing::warn!("Logging already initialized: {}", e);
    }

    Some(guard)
}

/// [`setup_logging`] at the platform logs location (`./logs` in dev mode).
/// Call once at startup, before building the app.
pub fn init() -> Option<WorkerGuard> {
    setup_logging(&paths::logs_dir())
}
