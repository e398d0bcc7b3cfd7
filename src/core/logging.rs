//! Logging Initialization
//!
//! Library code logs through the `log` facade. Binaries call [`init`] once to
//! install a `tracing` subscriber that receives those records:
//! - a stderr layer, pretty or JSON formatted
//! - an optional JSON file layer written through a non-blocking appender
//!
//! `RUST_LOG` overrides the configured level.

use std::io;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

/// Initialize the logging system.
///
/// Returns a `WorkerGuard` when a log file is configured; it must be kept
/// alive for the duration of the program so buffered records are flushed.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let env_filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
    };

    let (file_layer, guard) = match config.log_file {
        Some(ref path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "qreftag.log".into());

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .json()
                .with_target(true)
                .with_filter(env_filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // Stderr keeps stdout free for classification output
    let stderr_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .json()
            .with_filter(env_filter())
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_filter(env_filter())
            .boxed()
    };

    // try_init also bridges `log` records into tracing
    if let Err(e) = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
    {
        eprintln!("Failed to initialize logging: {}", e);
    }

    guard
}
