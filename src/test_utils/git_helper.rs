//! Local git repositories for tests that talk to a real remote.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Drives the system `git` inside a test repository.
pub struct TestGit {
    repo_path: PathBuf,
}

impl TestGit {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    fn run_git_command(&self, args: &[&str], action: &str) -> Result<std::process::Output> {
        // Identity and signing are set per command so the user's git config never applies.
        let output = Command::new(crate::utils::platform::get_git_command())
            .args([
                "-c",
                "user.name=Test User",
                "-c",
                "user.email=test@depot.example",
                "-c",
                "commit.gpgsign=false",
                "-c",
                "tag.gpgsign=false",
            ])
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .with_context(|| action.to_string())?;

        if !output.status.success() {
            bail!("{} failed: {}", action, String::from_utf8_lossy(&output.stderr));
        }

        Ok(output)
    }

    /// Initialize a repository with one empty commit.
    pub fn init_with_commit(&self) -> Result<()> {
        std::fs::create_dir_all(&self.repo_path)
            .with_context(|| format!("Failed to create {}", self.repo_path.display()))?;
        self.run_git_command(&["init", "-q"], "Failed to initialize git repository")?;
        self.commit("Initial commit")
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        self.run_git_command(
            &["commit", "-q", "--allow-empty", "-m", message],
            "Failed to create git commit",
        )?;
        Ok(())
    }

    /// Create a lightweight tag.
    pub fn tag(&self, tag_name: &str) -> Result<()> {
        self.run_git_command(&["tag", tag_name], &format!("Failed to create tag: {tag_name}"))?;
        Ok(())
    }

    /// Create an annotated tag, listed twice by `ls-remote` (tag and peeled commit).
    pub fn annotated_tag(&self, tag_name: &str, message: &str) -> Result<()> {
        self.run_git_command(
            &["tag", "-a", tag_name, "-m", message],
            &format!("Failed to create annotated tag: {tag_name}"),
        )?;
        Ok(())
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// The repository as a remote argument for `git ls-remote`.
    pub fn remote(&self) -> String {
        self.repo_path.display().to_string()
    }
}
