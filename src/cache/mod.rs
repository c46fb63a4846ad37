//! The per-user cache directory.
//!
//! The cache holds state shared by every project the user updates and the
//! lock files that serialize concurrent updates:
//!
//! ```text
//! ~/.depot/cache/
//! └── .locks/
//!     └── update.lock     # held for the duration of an update
//! ```
//!
//! # Location
//!
//! - **Linux/macOS**: `~/.depot/cache/`
//! - **Windows**: `%LOCALAPPDATA%\depot\cache\`
//! - **Override**: `DEPOT_CACHE_DIR`

pub mod lock;
pub use lock::CacheLock;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs as async_fs;

use crate::constants::CACHE_CLEAR_ATTEMPTS;

/// Handle on a cache directory.
#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
}

impl Cache {
    /// Cache at the default location (see [`crate::config::get_cache_dir`]).
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: crate::config::get_cache_dir()?,
        })
    }

    /// Cache rooted at `dir`.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self {
            dir,
        }
    }

    /// Root directory of the cache.
    pub fn cache_dir(&self) -> &Path {
        &self.dir
    }

    /// Create the cache directory if missing.
    pub async fn ensure_cache_dir(&self) -> Result<()> {
        async_fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create cache directory: {}", self.dir.display()))
    }

    /// Acquire the named cache lock.
    pub async fn lock(&self, name: &str, timeout: Duration) -> Result<CacheLock> {
        CacheLock::acquire_with_timeout(&self.dir, name, timeout).await
    }

    /// Remove the cache directory and recreate it empty.
    ///
    /// Removal is attempted up to 20 times; files briefly held open by other
    /// processes (antivirus, indexers) often make the first attempts fail.
    /// Each failure is logged and the last one is returned.
    pub async fn clear_all(&self) -> Result<()> {
        let mut last_error = None;

        for attempt in 0..CACHE_CLEAR_ATTEMPTS {
            match async_fs::remove_dir_all(&self.dir).await {
                Ok(()) => {
                    last_error = None;
                    break;
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    last_error = None;
                    break;
                }
                Err(e) => {
                    tracing::warn!("Unable to clear the cache (attempt {}): {}", attempt + 1, e);
                    last_error = Some(e);
                }
            }
        }

        if let Some(e) = last_error {
            return Err(e).with_context(|| {
                format!(
                    "Unable to clear the cache at {} after {} attempts",
                    self.dir.display(),
                    CACHE_CLEAR_ATTEMPTS
                )
            });
        }

        self.ensure_cache_dir().await?;
        tracing::info!("Cache cleared: {}", self.dir.display());
        Ok(())
    }
}
