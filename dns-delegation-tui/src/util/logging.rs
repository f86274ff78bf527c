//! 日志初始化
//!
//! Library crates log through the `log` facade; the subscriber installed here picks those
//! records up as well. While the wizard owns the terminal, output goes to a file so the
//! alternate screen is not corrupted.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// `RUST_LOG`, or `info` when unset or invalid.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log file used while the wizard runs.
pub fn wizard_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("dns-delegation")
        .join("wizard.log")
}

/// Log to [`wizard_log_path`]. Returns the path that is written to.
pub fn init_wizard_logging() -> Result<PathBuf> {
    let path = wizard_log_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    let file = File::create(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(env_filter())
        .try_init()
        .context("failed to install the log subscriber")?;
    Ok(path)
}

/// Log to stderr, for subcommands.
pub fn init_cli_logging() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .with(env_filter())
        .try_init()
        .context("failed to install the log subscriber")
}
