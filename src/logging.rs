use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Log to stderr. Quiet by default so command output stays clean.
pub(crate) fn init_cli(filter: Option<&str>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(filter, "warn"))
        .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {e}"))
}

/// Log to a file; the terminal belongs to the UI while it runs.
/// Without a path, nothing is logged.
pub(crate) fn init_tui(filter: Option<&str>, path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(filter, "info"))
        .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {e}"))
}

fn env_filter(filter: Option<&str>, default: &str) -> EnvFilter {
    filter
        .and_then(|f| EnvFilter::try_new(f).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}
