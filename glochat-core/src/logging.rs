use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::schema::LoggingConfig;

/// Initialize the logging system
///
/// Installs a stdout layer plus a daily-rolling file layer. The returned
/// guard must be held for the lifetime of the process so buffered file
/// output is flushed.
pub fn init_logging(config: &LoggingConfig) -> WorkerGuard {
    let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| config.level.clone());

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level_str));

    let format_str = std::env::var("LOG_FORMAT").unwrap_or_else(|_| config.format.clone());
    let is_json = format_str.to_lowercase() == "json";

    let file_appender = tracing_appender::rolling::daily(&config.dir, "glochat.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // is_json is runtime state, so the layer types are unified by boxing.
    let stdout_layer = if is_json {
        fmt::layer().json().with_target(true).boxed()
    } else {
        fmt::layer().with_target(true).boxed()
    };

    let file_layer = if is_json {
        fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_ansi(false)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_ansi(false)
            .boxed()
    };

    Registry::default()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}
