use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "grainview=info,reqwest=warn";

pub fn get_log_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("grainview").join("grainview.log"))
}

/// Send tracing output to the log file. The terminal belongs to the TUI.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_logging() -> Result<()> {
    let path = get_log_path().ok_or_else(|| anyhow::anyhow!("No config dir"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}
