//! Logging infrastructure for geofleet.
//!
//! Provides structured logging with console output and optional file
//! output:
//! - Always prints to stdout for CLI tailing
//! - Writes to `<log_dir>/geofleet.log` when a directory is given
//!   (cleared on session start)
//! - Multi-line pretty format for readability
//! - Configurable via RUST_LOG environment variable

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer, when
/// file logging is enabled.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize logging system.
///
/// Sets up stdout output, and when `log_dir` is given also creates the
/// directory, clears the previous log file, and tees output into it.
///
/// # Arguments
///
/// * `log_dir` - Optional directory for log files (e.g., "logs")
/// * `log_file` - Log filename (e.g., "geofleet.log")
///
/// # Returns
///
/// LoggingGuard that must be kept alive for logging to work
///
/// # Errors
///
/// Returns error if the log directory cannot be created or the log file
/// cannot be cleared
pub fn init_logging(log_dir: Option<&str>, log_file: &str) -> Result<LoggingGuard, io::Error> {
    let mut file_guard = None;

    let file_layer = match log_dir {
        Some(dir) => {
            // Create logs directory if it doesn't exist
            fs::create_dir_all(dir)?;

            // Clear previous log file by writing empty content
            // This handles both existing and non-existing files
            let log_path = Path::new(dir).join(log_file);
            fs::write(&log_path, "")?;

            let file_appender = tracing_appender::rolling::never(dir, log_file);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            file_guard = Some(guard);

            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking_file)
                    .with_ansi(false) // No ANSI colors in file
                    .with_span_events(FmtSpan::CLOSE)
                    .pretty(),
            )
        }
        None => None,
    };

    // Create stdout layer with pretty multi-line format
    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_ansi(true) // ANSI colors for terminal
        .with_span_events(FmtSpan::CLOSE)
        .pretty();

    // Create env filter (defaults to INFO if RUST_LOG not set)
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Initialize global subscriber with both layers
    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Get default log file name.
pub fn default_log_file() -> &'static str {
    "geofleet.log"
}
