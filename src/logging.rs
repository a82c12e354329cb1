use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use tracing_subscriber::EnvFilter;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".booking-ledger";
/// Log file stored inside the application data directory.
const LOG_FILE_NAME: &str = "booking-ledger.log";
/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV_VAR: &str = "BOOKING_LEDGER_LOG";
/// Filter used when the environment variable is unset or unparsable.
const DEFAULT_FILTER: &str = "info";

/// Install a global `tracing` subscriber that appends to the log file. The
/// TUI owns stdout, so nothing is ever written to the terminal. Returns the
/// path of the log file.
pub fn init_logging() -> Result<PathBuf> {
    let log_path = log_path()?;

    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context("failed to open log file")?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("failed to install log subscriber")?;

    Ok(log_path)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Resolve the absolute path to the log file inside the user's home.
fn log_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_lives_in_data_dir() {
        if let Ok(path) = log_path() {
            assert!(path.ends_with(".booking-ledger/booking-ledger.log"));
        }
    }
}
