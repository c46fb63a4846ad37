//! Manifest discovery.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::constants::MANIFEST_FILE;

/// Find `depot.toml` in the current directory or its parents.
pub fn find_manifest() -> Result<PathBuf> {
    let current = std::env::current_dir()
        .context("Cannot determine current working directory. This may indicate a permission issue or corrupted filesystem")?;
    find_manifest_from(current)
}

/// Use `explicit_path` when given (it must exist), otherwise search upwards.
pub fn find_manifest_with_optional(explicit_path: Option<PathBuf>) -> Result<PathBuf> {
    match explicit_path {
        Some(path) => {
            if path.exists() {
                Ok(path)
            } else {
                Err(crate::core::DepotError::ManifestNotFound.into())
            }
        }
        None => find_manifest(),
    }
}

/// Walk from `current` towards the filesystem root looking for `depot.toml`.
pub fn find_manifest_from(mut current: PathBuf) -> Result<PathBuf> {
    loop {
        let manifest_path = current.join(MANIFEST_FILE);
        if manifest_path.exists() {
            return Ok(manifest_path);
        }

        if !current.pop() {
            return Err(crate::core::DepotError::ManifestNotFound.into());
        }
    }
}
