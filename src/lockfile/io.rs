//! Reading and writing `depot.lock`.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::LockFile;
use crate::utils::fs::atomic_write;

const HEADER: &str = "# Auto-generated lockfile - DO NOT EDIT\n";

impl LockFile {
    /// Load a lock file.
    ///
    /// Returns `Ok(None)` when the file does not exist or is empty.
    ///
    /// # Errors
    ///
    /// - The file cannot be read
    /// - The content is not a valid lock file
    ///   ([`DepotError::LockfileParseError`](crate::core::DepotError::LockfileParseError))
    /// - The lock was written by a newer format version
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).with_context(|| {
            format!(
                "Cannot read lockfile: {}\n\n\
                    Possible causes:\n\
                    - Permission denied (check file ownership)\n\
                    - File is locked by another process",
                path.display()
            )
        })?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let lockfile: Self = toml::from_str(&content)
            .map_err(|e| crate::core::DepotError::LockfileParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            })
            .with_context(|| {
                format!(
                    "Invalid TOML syntax in lockfile: {}\n\n\
                    The lockfile may be corrupted. Delete it and run 'depot update' to regenerate it.",
                    path.display()
                )
            })?;

        if lockfile.version > Self::CURRENT_VERSION {
            return Err(crate::core::DepotError::Other {
                message: format!(
                    "Lockfile version {} is newer than supported version {}.\n\n\
                    This lockfile was created by a newer version of depot.\n\
                    Please update depot to the latest version to use this lockfile.",
                    lockfile.version,
                    Self::CURRENT_VERSION
                ),
            }
            .into());
        }

        Ok(Some(lockfile))
    }

    /// Write the lock file atomically, with a header comment.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut content = String::from(HEADER);
        content.push_str(&toml::to_string(self).context("Failed to serialize lockfile")?);

        atomic_write(path, content.as_bytes()).with_context(|| {
            format!(
                "Cannot write lockfile: {}\n\n\
                    Possible causes:\n\
                    - Permission denied\n\
                    - Disk is full or read-only",
                path.display()
            )
        })
    }
}
