use std::backtrace::Backtrace;

use anyhow::{Context, Result};
use tracing::error;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogConfig;

const DATE_PLACEHOLDER: &str = "{date}";

/// Splits a file pattern such as `stockbot-{date}.log` into the appender's
/// prefix and suffix. The appender inserts its own `.` separators.
pub fn file_parts(pattern: &str) -> (Option<String>, Option<String>) {
    let trim = |s: &str| s.trim_matches(|c: char| matches!(c, '.' | '-' | '_')).to_string();
    let non_empty = |s: String| (!s.is_empty()).then_some(s);

    match pattern.split_once(DATE_PLACEHOLDER) {
        Some((prefix, suffix)) => (non_empty(trim(prefix)), non_empty(trim(suffix))),
        None => (non_empty(trim(pattern)), None),
    }
}

fn file_appender(config: &LogConfig) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(&config.dir)
        .with_context(|| format!("create log dir {}", config.dir.display()))?;

    let (prefix, suffix) = file_parts(&config.file_pattern);

    let mut builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(config.retention_days);
    if let Some(prefix) = prefix {
        builder = builder.filename_prefix(prefix);
    }
    if let Some(suffix) = suffix {
        builder = builder.filename_suffix(suffix);
    }

    builder
        .build(&config.dir)
        .context("init rolling log file")
}

/// Installs the global subscriber and a panic hook.
///
/// The returned guard flushes the file writer on drop; keep it alive in `main`.
pub fn init(config: Option<&LogConfig>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match config {
        Some(config) => {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(config)?);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .context("init tracing subscriber")?;

    std::panic::set_hook(Box::new(|info| {
        let backtrace = Backtrace::force_capture();
        error!(panic = %info, %backtrace, "unexpected fault");
    }));

    Ok(guard)
}
