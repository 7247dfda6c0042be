use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Name of the log file written inside the data directory.
pub const LOG_FILE: &str = "zooport.log";

/// Maps the `-v` count to a default filter level.
///
/// - 0 (none) -> warn
/// - 1 (-v)   -> info
/// - 2 (-vv)  -> debug
/// - 3+ (-vvv)-> trace
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initializes tracing to a file in `dir`; the terminal belongs to the TUI.
///
/// `RUST_LOG` overrides the verbosity flag if set. The returned guard
/// flushes buffered lines when dropped and must outlive the app.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn init(dir: &Path, verbosity: u8) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("zooport={}", level_for(verbosity))));

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(non_blocking)
        .init();

    guard
}
