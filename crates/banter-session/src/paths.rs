//! Config and cache locations
//!
//! XDG-style directories via the `dirs` crate: `~/.config/banter/` and
//! `~/.cache/banter/` on Linux, the platform equivalents elsewhere.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "banter";

/// Get the application config directory, creating it if needed
pub fn config_dir() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .context("No config directory on this platform")?
        .join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the application cache directory, creating it if needed
pub fn cache_dir() -> Result<PathBuf> {
    let dir = dirs::cache_dir()
        .context("No cache directory on this platform")?
        .join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get path to the persisted credential file
pub fn credentials_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("credentials.toml"))
}
