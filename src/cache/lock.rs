//! Named, process-wide locks in the cache directory.
//!
//! Updates share the cache with every other depot process on the machine, so
//! an update holds a [`CacheLock`] for its whole duration. The lock is an
//! RAII guard: it is released when the guard is dropped, whichever way the
//! holder exits. The lock file itself stays in place; a waiter may already
//! hold it open, and a new file at the same path would not be locked by it.
//!
//! All file operations run under `spawn_blocking` so waiting for a lock never
//! stalls tokio worker threads.

use anyhow::{Context, Result};
use fs4::fs_std::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;
use tracing::debug;

use crate::constants::{MAX_BACKOFF_DELAY_MS, STARTING_BACKOFF_DELAY_MS, default_lock_timeout};
use crate::core::DepotError;

/// Exclusive lock on `{cache_dir}/.locks/{name}.lock`.
#[derive(Debug)]
pub struct CacheLock {
    _file: Arc<File>,
    name: String,
    path: PathBuf,
}

impl Drop for CacheLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&*self._file) {
            debug!(lock_name = %self.name, error = %e, "Failed to unlock {}", self.path.display());
        }
        debug!(lock_name = %self.name, "Cache lock released");
    }
}

impl CacheLock {
    /// Acquire the lock `name`, waiting up to the default timeout (two minutes).
    ///
    /// # Errors
    ///
    /// - The locks directory or lock file cannot be created
    /// - [`DepotError::LockTimeout`] when another holder keeps the lock too long
    pub async fn acquire(cache_dir: &Path, name: &str) -> Result<Self> {
        Self::acquire_with_timeout(cache_dir, name, default_lock_timeout()).await
    }

    /// Acquire the lock `name`, waiting at most `timeout`.
    ///
    /// Attempts are non-blocking with exponential backoff from 10ms up to 500ms.
    pub async fn acquire_with_timeout(
        cache_dir: &Path,
        name: &str,
        timeout: Duration,
    ) -> Result<Self> {
        debug!(lock_name = %name, "Waiting for cache lock");

        let locks_dir = cache_dir.join(".locks");
        tokio::fs::create_dir_all(&locks_dir).await.with_context(|| {
            format!("Failed to create cache locks directory: {}", locks_dir.display())
        })?;

        let path = locks_dir.join(format!("{name}.lock"));
        let open_path = path.clone();
        let file = tokio::task::spawn_blocking(move || {
            OpenOptions::new().create(true).write(true).truncate(false).open(&open_path)
        })
        .await
        .context("spawn_blocking panicked")?
        .with_context(|| format!("Failed to open lock file: {}", path.display()))?;
        let file = Arc::new(file);

        let start = std::time::Instant::now();
        let backoff = ExponentialBackoff::from_millis(STARTING_BACKOFF_DELAY_MS)
            .max_delay(Duration::from_millis(MAX_BACKOFF_DELAY_MS));

        for delay in backoff {
            let attempt = Arc::clone(&file);
            let locked = tokio::task::spawn_blocking(move || attempt.try_lock_exclusive())
                .await
                .context("spawn_blocking panicked")?;

            if let Ok(true) = locked {
                debug!(
                    lock_name = %name,
                    wait_ms = start.elapsed().as_millis(),
                    "Cache lock acquired"
                );
                return Ok(Self {
                    _file: file,
                    name: name.to_string(),
                    path,
                });
            }

            let remaining = timeout.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                break;
            }
            tokio::time::sleep(delay.min(remaining)).await;
        }

        Err(DepotError::LockTimeout {
            name: name.to_string(),
            timeout_secs: timeout.as_secs(),
        }
        .into())
    }

    /// Path of the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_cache_lock_acquire_and_release() {
        let temp_dir = TempDir::new().unwrap();
        let cache_dir = temp_dir.path();

        let lock = CacheLock::acquire(cache_dir, "update").await.unwrap();
        let lock_path = cache_dir.join(".locks").join("update.lock");
        assert!(lock_path.exists());
        assert_eq!(lock.path(), lock_path);

        drop(lock);
        assert!(lock_path.exists());

        // Released: a fresh acquire succeeds immediately.
        let _again = CacheLock::acquire_with_timeout(cache_dir, "update", Duration::from_millis(100))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cache_lock_handoff_stays_exclusive() {
        let temp_dir = TempDir::new().unwrap();
        let cache_dir = temp_dir.path().to_path_buf();

        let first = CacheLock::acquire(&cache_dir, "update").await.unwrap();

        let waiter_dir = cache_dir.clone();
        let waiter = tokio::spawn(async move {
            CacheLock::acquire_with_timeout(&waiter_dir, "update", Duration::from_secs(5)).await
        });

        // Let the waiter open the lock file and start retrying.
        tokio::time::sleep(Duration::from_millis(100)).await;
        drop(first);

        let second = waiter.await.unwrap().unwrap();

        let err = CacheLock::acquire_with_timeout(&cache_dir, "update", Duration::from_millis(300))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DepotError>(),
            Some(DepotError::LockTimeout { .. })
        ));

        drop(second);
        CacheLock::acquire_with_timeout(&cache_dir, "update", Duration::from_millis(300))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cache_lock_exclusive_blocking() {
        use std::time::Instant;
        use tokio::sync::Barrier;

        let temp_dir = TempDir::new().unwrap();
        let cache_dir = Arc::new(temp_dir.path().to_path_buf());
        let barrier = Arc::new(Barrier::new(2));

        let cache_dir1 = cache_dir.clone();
        let barrier1 = barrier.clone();
        let holder = tokio::spawn(async move {
            let _lock = CacheLock::acquire(&cache_dir1, "exclusive").await.unwrap();
            barrier1.wait().await;
            tokio::time::sleep(Duration::from_millis(100)).await;
        });

        let cache_dir2 = cache_dir.clone();
        let waiter = tokio::spawn(async move {
            barrier.wait().await;
            let start = Instant::now();
            let _lock = CacheLock::acquire(&cache_dir2, "exclusive").await.unwrap();
            assert!(start.elapsed() >= Duration::from_millis(50));
        });

        holder.await.unwrap();
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn test_cache_lock_different_names_dont_block() {
        let temp_dir = TempDir::new().unwrap();
        let _first = CacheLock::acquire(temp_dir.path(), "first").await.unwrap();

        let start = std::time::Instant::now();
        let _second = CacheLock::acquire(temp_dir.path(), "second").await.unwrap();
        assert!(start.elapsed() < Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_cache_lock_timeout() {
        let temp_dir = TempDir::new().unwrap();
        let _held = CacheLock::acquire(temp_dir.path(), "update").await.unwrap();

        let err = CacheLock::acquire_with_timeout(temp_dir.path(), "update", Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DepotError>(),
            Some(DepotError::LockTimeout { .. })
        ));
    }
}
