//! Git operations for depot.
//!
//! depot talks to remotes through the system `git` binary rather than an
//! embedded implementation, so SSH agents, credential helpers and the user's
//! git configuration all apply unchanged. Every invocation goes through the
//! [`GitCommand`] builder, which captures output, enforces a timeout and
//! converts failures into [`DepotError::GitCommandError`].
//!
//! Only remote queries are needed:
//!
//! - [`GitCommand::ls_remote_heads`] verifies that a remote is reachable.
//! - [`fetch_tags`] streams a remote's tags for pin matching.

pub mod command_builder;
pub mod tags;

pub use command_builder::{GitCommand, GitCommandOutput};
pub use tags::{TagStream, fetch_tags, parse_tag_line};

use anyhow::Result;

use crate::core::DepotError;

/// Whether a working `git` binary is on the PATH.
#[must_use]
pub fn is_git_installed() -> bool {
    std::process::Command::new(crate::utils::platform::get_git_command())
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Fail with [`DepotError::GitNotFound`] when git is unavailable.
pub fn ensure_git_available() -> Result<()> {
    if !is_git_installed() {
        return Err(DepotError::GitNotFound.into());
    }
    Ok(())
}

/// Check that `remote` answers `git ls-remote --heads`.
pub async fn verify_remote(remote: &str) -> Result<()> {
    GitCommand::ls_remote_heads(remote).with_context(remote).execute_success().await
}

/// Installed git version string (e.g. `git version 2.43.0`).
pub async fn git_version() -> Result<String> {
    GitCommand::version().execute_stdout().await
}
