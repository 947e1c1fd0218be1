//! File-only tracing setup. The terminal belongs to the TUI.
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use directories::ProjectDirs;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Setup logging into `<cache dir>/logs/<session>/client.log`.
pub fn setup_logging(session_id: &Option<String>) -> Result<()> {
    let log_dir = log_directory();

    let session_id = session_id
        .clone()
        .unwrap_or_else(|| format!("session_{}", Utc::now().timestamp()));

    let session_log_dir = log_dir.join(&session_id);
    std::fs::create_dir_all(&session_log_dir).with_context(|| {
        format!(
            "failed to create log directory {}",
            session_log_dir.display()
        )
    })?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    // No stderr layer while the TUI owns the terminal.
    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("tracing subscriber already installed")?;

    // Keep the writer alive for the whole process.
    std::mem::forget(guard);

    tracing::info!(session = %session_id, "logging initialized");
    tracing::info!("log file: {}/client.log", session_log_dir.display());

    Ok(())
}

fn log_directory() -> PathBuf {
    ProjectDirs::from("", "", "geodle")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("geodle").join("logs"))
}
