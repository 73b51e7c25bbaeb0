use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;
use crate::store::resolve_state_path;

/// Install a file-backed subscriber. The terminal belongs to the UI.
///
/// `RUST_LOG` wins over `[logging].level`. Returns the log file path.
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<PathBuf> {
    let path = log_path(settings);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("cannot create log directory {}", dir.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow!("cannot install logger: {e}"))?;

    Ok(path)
}

fn log_path(settings: &LoggingSettings) -> PathBuf {
    if let Some(p) = settings.file.as_ref() {
        return p.clone();
    }
    resolve_state_path()
        .and_then(|p| p.parent().map(|d| d.join("frvttae.log")))
        .unwrap_or_else(|| std::env::temp_dir().join("frvttae.log"))
}
