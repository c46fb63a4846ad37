//! Global constants used throughout the depot codebase.
//!
//! This module contains timeout durations, retry parameters, file names and
//! other fixed values that are used across multiple modules. Defining them
//! centrally keeps magic numbers discoverable.

use std::time::Duration;

/// Name of the project manifest searched for in the current directory and its parents.
pub const MANIFEST_FILE: &str = "depot.toml";

/// Name of the lock file written next to the manifest.
pub const LOCK_FILE: &str = "depot.lock";

/// Default timeout for acquiring a cache lock.
///
/// Two minutes covers a full update run by a concurrent process on a slow network.
pub fn default_lock_timeout() -> Duration {
    Duration::from_secs(120)
}

/// Maximum delay between lock acquisition attempts in milliseconds.
pub const MAX_BACKOFF_DELAY_MS: u64 = 500;

/// Initial delay between lock acquisition attempts in milliseconds.
pub const STARTING_BACKOFF_DELAY_MS: u64 = 10;

/// Timeout for `git ls-remote` invocations.
pub const GIT_LS_REMOTE_TIMEOUT: Duration = Duration::from_secs(60);

/// Number of attempts made to remove the cache directory before giving up.
pub const CACHE_CLEAR_ATTEMPTS: usize = 20;

/// Host prefix whose import paths embed the major version (`host/pkg.vN/...`).
pub const DEFAULT_VERSIONED_HOST: &str = "gopkg.in/";

/// Marker that introduces a version token inside a path segment (`pkg.v3`).
pub const VERSION_MARKER: &str = ".v";

/// Separator between path segments of an import path or remote.
pub const PATH_SEPARATOR: char = '/';
