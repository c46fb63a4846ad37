//! Common test utilities for depot integration tests

// Not every helper is used by every test module
#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use depot::test_utils::TestGit;

/// An isolated project with its own cache and global configuration.
///
/// The layout inside the temporary directory is:
///
/// ```text
/// project/depot.toml
/// cache/
/// config.toml
/// remotes/<name>/
/// ```
pub struct TestProject {
    temp: TempDir,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        let temp = TempDir::new()?;
        std::fs::create_dir_all(temp.path().join("project"))?;
        Ok(Self {
            temp,
        })
    }

    pub fn project_path(&self) -> PathBuf {
        self.temp.path().join("project")
    }

    pub fn cache_path(&self) -> PathBuf {
        self.temp.path().join("cache")
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp.path().join("config.toml")
    }

    pub fn lockfile_path(&self) -> PathBuf {
        self.project_path().join("depot.lock")
    }

    pub fn write_manifest(&self, content: &str) -> Result<()> {
        std::fs::write(self.project_path().join("depot.toml"), content)?;
        Ok(())
    }

    pub fn write_config(&self, content: &str) -> Result<()> {
        std::fs::write(self.config_path(), content)?;
        Ok(())
    }

    pub fn read_lockfile(&self) -> Result<String> {
        Ok(std::fs::read_to_string(self.lockfile_path())?)
    }

    /// Create a local git repository usable as a remote, tagged with `tags`.
    pub fn create_remote(&self, name: &str, tags: &[&str]) -> Result<TestGit> {
        let git = TestGit::new(self.temp.path().join("remotes").join(name));
        git.init_with_commit()?;
        for tag in tags {
            git.tag(tag)?;
        }
        Ok(git)
    }

    /// `depot` running in the project directory with isolated state.
    pub fn depot(&self) -> Command {
        let mut cmd = depot_cmd(self.cache_path(), self.config_path());
        cmd.current_dir(self.project_path());
        cmd
    }
}

/// `depot` with cache and config pointed at the given paths.
pub fn depot_cmd(cache_dir: impl AsRef<Path>, config_path: impl AsRef<Path>) -> Command {
    let mut cmd = Command::cargo_bin("depot").expect("depot binary is built for integration tests");
    cmd.env("DEPOT_CACHE_DIR", cache_dir.as_ref())
        .env("DEPOT_CONFIG_PATH", config_path.as_ref())
        .env_remove("RUST_LOG");
    cmd
}

pub fn git_available() -> bool {
    depot::git::is_git_installed()
}
