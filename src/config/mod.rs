//! Configuration management for depot.
//!
//! Two layers of configuration exist:
//!
//! - **Project manifest** (`depot.toml`, see [`crate::manifest`]): the
//!   dependencies a project declares. Checked into version control.
//! - **Global configuration** (`~/.depot/config.toml`, [`GlobalConfig`]): remote
//!   rewrite rules and user preferences. Never committed.
//!
//! # Environment Variables
//!
//! - `DEPOT_CONFIG_PATH`: location of the global configuration file
//! - `DEPOT_CACHE_DIR`: location of the cache directory

mod global;
pub mod rules;

pub use global::GlobalConfig;
pub use rules::{
    FixRule, GenericRule, ManyToOneRule, OneToManyRule, RewriteConfig, SshRule, SubpackageRule,
};

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Root directory for depot's per-user state.
pub(crate) fn depot_home() -> Result<PathBuf> {
    let dir = if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
            .join("depot")
    } else {
        dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
            .join(".depot")
    };
    Ok(dir)
}

/// Get the cache directory, creating it if needed.
///
/// `DEPOT_CACHE_DIR` overrides the default `~/.depot/cache`
/// (`%LOCALAPPDATA%\depot\cache` on Windows).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined or the
/// directory cannot be created.
pub fn get_cache_dir() -> Result<PathBuf> {
    let cache_dir = match std::env::var("DEPOT_CACHE_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => depot_home()?.join("cache"),
    };

    if !cache_dir.exists() {
        std::fs::create_dir_all(&cache_dir).with_context(|| {
            format!("Failed to create cache directory: {}", cache_dir.display())
        })?;
    }

    Ok(cache_dir)
}
