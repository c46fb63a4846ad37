//! Lock file generation from a resolved configuration.
//!
//! Building and persisting are separate steps with different failure
//! semantics: a lock that cannot be built aborts the update, while a lock
//! that cannot be written leaves the in-memory resolution valid and only ends
//! the update early.

use anyhow::{Context, Result};
use std::path::Path;

use crate::lockfile::LockFile;
use crate::manifest::Configuration;

/// What happened when persisting a lock file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockWriteOutcome {
    /// The lock file was created or replaced.
    Written,
    /// The existing lock file already had the same fingerprint.
    Unchanged,
}

/// Builds lock files for one original (pre-resolution) configuration.
pub struct LockfileBuilder<'a> {
    original: &'a Configuration,
}

impl<'a> LockfileBuilder<'a> {
    /// Create a builder for the configuration as the user declared it.
    pub fn new(original: &'a Configuration) -> Self {
        Self {
            original,
        }
    }

    /// Build a lock file from the resolved (merged) configuration.
    ///
    /// # Errors
    ///
    /// Fails when the original configuration cannot be hashed or the resolved
    /// imports cannot be locked (empty or duplicate names).
    pub fn build(&self, resolved: &Configuration) -> Result<LockFile> {
        let hash = self
            .original
            .compute_hash()
            .context("Failed to hash the project configuration")?;

        LockFile::new(&resolved.imports, &resolved.dev_imports, hash)
            .context("Failed to generate the lock file")
    }
}

/// Write `lock` to `path` unless the persisted lock has the same fingerprint.
///
/// An existing lock that cannot be read or parsed is treated as absent and
/// overwritten.
///
/// # Errors
///
/// Fails when fingerprinting or writing fails.
pub fn write_if_changed(path: &Path, lock: &LockFile) -> Result<LockWriteOutcome> {
    let fingerprint = lock.fingerprint()?;

    match LockFile::load(path) {
        Ok(Some(existing)) => match existing.fingerprint() {
            Ok(previous) if previous == fingerprint => {
                tracing::debug!(target: "update", "Lock fingerprint unchanged: {}", fingerprint);
                return Ok(LockWriteOutcome::Unchanged);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(target: "update", "Cannot fingerprint existing lock: {:#}", e);
            }
        },
        Ok(None) => {}
        Err(e) => {
            tracing::debug!(
                target: "update",
                "Ignoring unreadable lock file {}: {:#}",
                path.display(),
                e
            );
        }
    }

    lock.save(path)?;
    Ok(LockWriteOutcome::Written)
}
