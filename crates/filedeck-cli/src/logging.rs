//! Tracing setup: stderr plus a daily rolling file under `logs/`.

use std::path::Path;

use anyhow::{Context, Result};
use filedeck_core::config::DEFAULT_LOG_LEVEL;
use filedeck_infrastructure::config_service::ENV_LOG;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE_PREFIX: &str = "filedeck.log";

/// Installs the global subscriber.
///
/// `level` already reflects `FILEDECK_LOG` when set; otherwise `RUST_LOG`
/// takes precedence over it. Keep the returned guard alive for the whole
/// run or buffered file output is lost.
pub fn init(logs_dir: &Path, level: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

fn env_filter(level: &str) -> EnvFilter {
    if std::env::var_os(ENV_LOG).is_none()
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}
