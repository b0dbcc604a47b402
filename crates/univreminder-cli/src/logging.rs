//! Log setup: human-readable lines on stderr, plus a plain-text log file under
//! the data directory.
//!
//! File output goes through a non-blocking writer, so every line is queued on
//! one channel and written in order by a single worker thread.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_DIR: &str = "logs";
pub const LOG_FILE: &str = "univreminder.log";

/// Install the global subscriber. `RUST_LOG` wins over `default_level`.
///
/// The returned guard must be held until exit.
pub fn init(data_dir: &Path, default_level: &str) -> std::io::Result<WorkerGuard> {
    let log_dir = data_dir.join(LOG_DIR);
    std::fs::create_dir_all(&log_dir)?;

    let appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let file_layer = fmt::layer().with_writer(file_writer).with_ansi(false);

    // A subscriber may already be installed when running under a test harness.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    Ok(guard)
}
