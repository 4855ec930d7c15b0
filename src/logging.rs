use std::path::Path;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

use crate::error::LoggingError;

/// Name of the log file created inside the log directory.
pub const LOG_FILE_NAME: &str = "mazetrace.log";

/// Install a global subscriber writing to `dir/mazetrace.log`.
///
/// The terminal is owned by the UI, so nothing is logged to stdout or stderr.
/// The returned guard flushes pending records on drop and must be kept alive
/// for as long as logging is needed. Fails if a global subscriber is already set.
pub fn init(dir: &Path) -> Result<WorkerGuard, LoggingError> {
    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let max_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(max_level)
        .with_thread_names(true)
        .try_init()
        .map_err(LoggingError)?;

    Ok(guard)
}
