//! Log setup: every event goes to the console and is appended to a
//! persistent log file, as `<local time> <LEVEL> <message>`.
//!
//! The filter defaults to `info` and can be overridden through `RUST_LOG`,
//! e.g. `RUST_LOG=zillow_scrape=debug` to see which strategy matched a field.

use chrono::Local;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

use crate::errors::AppError;

struct LocalTimeFormatter;

impl FormatTime for LocalTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S,%3f"))
    }
}

/// Installs the global subscriber. Keep the returned guard alive until the
/// process exits or buffered file lines are lost.
pub fn init_logging(log_file: &Path) -> Result<WorkerGuard, AppError> {
    let file_name = log_file
        .file_name()
        .ok_or_else(|| AppError::Logging(format!("not a file path: {}", log_file.display())))?;
    let log_dir = log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(log_dir)?;

    let (file_writer, guard) = non_blocking(rolling::never(log_dir, file_name));

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::Layer::new()
        .with_writer(file_writer)
        .with_timer(LocalTimeFormatter)
        .with_target(false)
        .with_ansi(false);
    let console_layer = fmt::Layer::new()
        .with_writer(std::io::stdout)
        .with_timer(LocalTimeFormatter)
        .with_target(false);

    Registry::default()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;

    Ok(guard)
}
