//! Tracing (logging) initialization.

use std::path::Path;

use miette::{Context, IntoDiagnostic, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};


/// Sets up the global tracing subscriber with two layers:
/// - a console layer, filtered by `console_level_filter`, and
/// - a daily-rolling file layer writing to `log_file_directory/log_file_name_prefix`,
///   filtered by `log_file_level_filter`.
///
/// The returned guard flushes the file writer when dropped,
/// so it must be kept alive until the server shuts down.
pub fn initialize_tracing<P>(
    console_level_filter: EnvFilter,
    log_file_level_filter: EnvFilter,
    log_file_directory: P,
    log_file_name_prefix: &str,
) -> Result<WorkerGuard>
where
    P: AsRef<Path>,
{
    let rolling_file_appender =
        tracing_appender::rolling::daily(log_file_directory, log_file_name_prefix);

    let (non_blocking_file_writer, guard) =
        tracing_appender::non_blocking(rolling_file_appender);


    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_filter(console_level_filter);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(non_blocking_file_writer)
        .with_filter(log_file_level_filter);


    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .into_diagnostic()
        .wrap_err("Failed to initialize global tracing subscriber.")?;

    Ok(guard)
}
