//! Rotating log system
//!
//! Logs to both console and rotating files in ./logs/

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system with rotating file logs
pub fn init_logging(log_dir: &str) -> anyhow::Result<()> {
    let log_path = Path::new(log_dir);
    if !log_path.exists() {
        std::fs::create_dir_all(log_path)?;
    }

    // Rotates daily: chaos_game.log.YYYY-MM-DD
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "chaos_game.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Logging lasts the whole program, so the flush guard is never dropped
    std::mem::forget(guard);

    // Default to INFO, RUST_LOG overrides
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,chaos_game=debug"));

    // Console goes to stderr so rendered canvases on stdout stay clean
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    tracing::info!("Logging initialized. Log directory: {}", log_dir);
    Ok(())
}

/// Log an error with context
#[macro_export]
macro_rules! log_error {
    ($msg:expr) => {
        tracing::error!(error = %$msg, "Error occurred");
    };
    ($msg:expr, $($field:tt)*) => {
        tracing::error!(error = %$msg, $($field)*, "Error occurred");
    };
}
