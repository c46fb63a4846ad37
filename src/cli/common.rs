//! Helpers shared by the commands.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::CliConfig;
use crate::config::GlobalConfig;
use crate::constants::LOCK_FILE;
use crate::manifest::{Configuration, find_manifest_with_optional};

/// A loaded project: manifest, its location and where its lock file goes.
#[derive(Debug)]
pub struct CommandContext {
    pub config: Configuration,
    pub manifest_path: PathBuf,
    pub project_dir: PathBuf,
    pub lockfile_path: PathBuf,
}

impl CommandContext {
    /// Find and load the project manifest.
    ///
    /// `manifest_path` is used when given; otherwise `depot.toml` is searched
    /// for from the current directory upwards.
    pub fn load(manifest_path: Option<PathBuf>) -> Result<Self> {
        let manifest_path = find_manifest_with_optional(manifest_path)?;
        Self::from_manifest_path(&manifest_path)
    }

    pub fn from_manifest_path(manifest_path: impl AsRef<Path>) -> Result<Self> {
        let manifest_path = manifest_path.as_ref();

        let project_dir = manifest_path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Invalid manifest path"))?
            .to_path_buf();

        let config = Configuration::load(manifest_path).with_context(|| {
            format!("Failed to parse manifest file: {}", manifest_path.display())
        })?;

        let lockfile_path = project_dir.join(LOCK_FILE);

        Ok(Self {
            config,
            manifest_path: manifest_path.to_path_buf(),
            project_dir,
            lockfile_path,
        })
    }
}

/// Load the global configuration named by `--config`, or the default one.
pub async fn load_global_config(cli: &CliConfig) -> Result<GlobalConfig> {
    GlobalConfig::load_with_optional(cli.config_path.clone()).await
}
