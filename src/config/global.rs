//! Global (user-level) configuration.
//!
//! The global configuration lives outside any project and carries the remote
//! rewrite rules shared by every project the user updates.
//!
//! # Location
//!
//! - **Unix/macOS**: `~/.depot/config.toml`
//! - **Windows**: `%LOCALAPPDATA%\depot\config.toml`
//! - **Override**: `DEPOT_CONFIG_PATH`, or `--config` on the command line
//!
//! A missing file is not an error; it yields [`GlobalConfig::default`], which
//! has no rules, so every remote is used as written.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

use super::rules::RewriteConfig;

/// User-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Remote rewrite and subpackage rules.
    #[serde(default)]
    pub rewrite: RewriteConfig,

    /// Seconds to wait for the cache lock before giving up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_timeout_secs: Option<u64>,
}

impl GlobalConfig {
    /// Load from the default location, or defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the default path cannot be determined or the file
    /// exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        Self::load_with_optional(None).await
    }

    /// Load from `path` when given, otherwise from the default location.
    ///
    /// A missing file yields the default configuration in both cases.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No global config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// - The file cannot be read
    /// - The file is not valid TOML or does not match the expected layout
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read global config from {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| crate::core::DepotError::ConfigError {
                message: e.to_string(),
            })
            .with_context(|| format!("Failed to parse global config from {}", path.display()))
    }

    /// Save to the default location.
    pub async fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save_to(&path).await
    }

    /// Save to a specific file, creating parent directories as needed.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize global config")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write global config to {}", path.display()))
    }

    /// Default path of the global configuration file.
    ///
    /// `DEPOT_CONFIG_PATH` takes precedence over the platform location.
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("DEPOT_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        Ok(super::depot_home()?.join("config.toml"))
    }

    /// Cache lock timeout, falling back to the built-in default.
    #[must_use]
    pub fn lock_timeout(&self) -> Duration {
        self.lock_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(crate::constants::default_lock_timeout)
    }
}
