//! Test utilities for depot
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration tests under `tests/`.
//!
//! # Example
//!
//! ```rust,no_run
//! use depot::test_utils::{TestGit, init_test_logging};
//!
//! init_test_logging(None);
//!
//! let temp = tempfile::TempDir::new().unwrap();
//! let git = TestGit::new(temp.path().join("remote"));
//! git.init_with_commit().unwrap();
//! git.tag("v1.0.0").unwrap();
//! ```

pub mod git_helper;

pub use git_helper::TestGit;

use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. With `Some(level)` that level is used;
/// with `None` logging is enabled only when `RUST_LOG` is set.
///
/// ```bash
/// RUST_LOG=update=debug,rewrite=info cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true) // Show targets like "update" and "rewrite"
            .with_thread_ids(false)
            .try_init();
    });
}

/// Write a `depot.toml` with the given imports into `dir`.
///
/// Each import is a bare name; the result is a minimal but valid manifest.
pub fn write_manifest(dir: &Path, package: &str, imports: &[&str]) -> std::io::Result<PathBuf> {
    let mut content = format!("package = \"{package}\"\n");
    for name in imports {
        content.push_str(&format!("\n[[import]]\nname = \"{name}\"\n"));
    }
    let path = dir.join(crate::constants::MANIFEST_FILE);
    std::fs::write(&path, content)?;
    Ok(path)
}
