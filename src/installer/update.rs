//! The update pipeline.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use super::DependencyInstaller;
use crate::cache::CacheLock;
use crate::manifest::Configuration;
use crate::resolver::{
    LockWriteOutcome, LockfileBuilder, dedupe_imports, reconcile_references, write_if_changed,
};

/// Name of the cache lock held for the duration of an update.
const UPDATE_LOCK_NAME: &str = "update";

/// Settings for one update run.
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    /// Only resolve the declared dependencies; no recursive update and no lock file.
    pub skip_recursive: bool,

    /// Remove nested vendor directories after exporting.
    pub strip_vendor: bool,

    /// Where the lock file lives.
    pub lock_path: PathBuf,

    /// Cache directory holding the update lock.
    pub cache_dir: PathBuf,

    /// How long to wait for another update to release the cache lock.
    pub lock_timeout: Duration,
}

impl UpdateOptions {
    /// Default options for a lock file and cache directory.
    pub fn new(lock_path: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            skip_recursive: false,
            strip_vendor: false,
            lock_path: lock_path.into(),
            cache_dir: cache_dir.into(),
            lock_timeout: crate::constants::default_lock_timeout(),
        }
    }
}

/// What happened to the lock file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockStatus {
    /// A new lock file was written.
    Written,
    /// The resolution matched the existing lock file; nothing was written.
    Unchanged,
    /// Lock generation was skipped (`skip_recursive`).
    Skipped,
    /// Writing failed. The resolution is still valid in memory.
    WriteFailed(String),
}

/// Outcome of a completed update.
#[derive(Debug, Clone)]
pub struct UpdateReport {
    /// Number of primary dependencies after merging.
    pub dependencies: usize,
    /// Number of development dependencies after merging.
    pub dev_dependencies: usize,
    pub lock: LockStatus,
    /// The merged working configuration.
    pub resolved: Configuration,
}

/// Update dependencies and regenerate the lock file.
///
/// `config` is never modified: the pipeline works on clones of it.
///
/// # Errors
///
/// Fails when the cache lock cannot be acquired, when `checkout`, the first
/// `set_reference`, `update` or `export` fail, or when the lock file cannot be
/// built. A lock file that cannot be *written* is not an error: the report
/// carries [`LockStatus::WriteFailed`] and vendor stripping is skipped.
pub async fn run_update<I: DependencyInstaller>(
    installer: &I,
    config: &Configuration,
    options: &UpdateOptions,
) -> Result<UpdateReport> {
    let _lock =
        CacheLock::acquire_with_timeout(&options.cache_dir, UPDATE_LOCK_NAME, options.lock_timeout)
            .await
            .context("Another update is running")?;

    let mut base = config.clone();
    installer
        .checkout(&base)
        .await
        .context("Failed to do initial checkout of config")?;
    installer
        .set_reference(&mut base)
        .await
        .context("Failed to set initial config references")?;

    let mut working = base.clone();

    if !options.skip_recursive {
        installer.update(&mut working).await.context("Could not update packages")?;

        tracing::info!(target: "update", "Setting references for remaining imports");
        if let Err(e) = installer.set_reference(&mut working).await {
            tracing::error!(target: "update", "Failed to set references: {:#} (skip to cleanup)", e);
        }
    }

    let merged = dedupe_imports(&mut working.imports) + dedupe_imports(&mut working.dev_imports);
    if merged > 0 {
        tracing::debug!(target: "update", "Merged {} duplicate imports", merged);
    }

    installer
        .export(&working)
        .await
        .context("Unable to export dependencies to vendor directory")?;

    reconcile_references(&mut working.imports, &mut working.dev_imports);

    let lock = if options.skip_recursive {
        tracing::warn!(
            target: "update",
            "Skipping lockfile generation because full dependency tree is not being calculated"
        );
        LockStatus::Skipped
    } else {
        // The hash covers the configuration as declared, before any resolution.
        let lockfile = LockfileBuilder::new(config).build(&working)?;

        let status = match write_if_changed(&options.lock_path, &lockfile) {
            Ok(LockWriteOutcome::Written) => LockStatus::Written,
            Ok(LockWriteOutcome::Unchanged) => {
                tracing::info!(target: "update", "Versions did not change. Skipping lock file update.");
                LockStatus::Unchanged
            }
            Err(e) => {
                tracing::error!(
                    target: "update",
                    "Could not write lock file to {}: {:#}",
                    options.lock_path.display(),
                    e
                );
                return Ok(report(working, LockStatus::WriteFailed(format!("{e:#}"))));
            }
        };

        tracing::info!(
            target: "update",
            "Project relies on {} dependencies.",
            working.imports.len()
        );
        status
    };

    if options.strip_vendor {
        tracing::info!(target: "update", "Removing nested vendor directories...");
        if let Err(e) = installer.strip_vendor().await {
            tracing::error!(target: "update", "Unable to strip vendor directories: {:#}", e);
        }
    }

    Ok(report(working, lock))
}

fn report(resolved: Configuration, lock: LockStatus) -> UpdateReport {
    UpdateReport {
        dependencies: resolved.imports.len(),
        dev_dependencies: resolved.dev_imports.len(),
        lock,
        resolved,
    }
}
