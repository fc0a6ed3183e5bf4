//! File logging; stdout belongs to the TUI.
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Platform log root: `~/.cache/tower/logs` on Linux, `/tmp/tower/logs` as fallback.
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "tower")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/tower"))
        .join("logs")
}

/// Installs a file-only subscriber under `{log_root}/{session}/client.log`.
pub fn setup(log_root: Option<&Path>, session_id: Option<&str>) -> Result<PathBuf> {
    let session_id = match session_id {
        Some(id) => id.to_owned(),
        None => {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default();
            format!("session_{}", timestamp)
        }
    };

    let log_root = log_root.map_or_else(default_log_dir, Path::to_path_buf);
    let session_log_dir = log_root.join(&session_id);
    std::fs::create_dir_all(&session_log_dir)
        .with_context(|| format!("Failed to create log directory {}", session_log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // The writer must outlive every log call.
    std::mem::forget(guard);

    tracing::info!("Logging initialized: session={}", session_id);
    Ok(session_log_dir.join("client.log"))
}
