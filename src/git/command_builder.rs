//! Builder for `git` invocations with consistent timeout and error handling.

use anyhow::{Context, Result};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::constants::GIT_LS_REMOTE_TIMEOUT;
use crate::core::DepotError;
use crate::utils::platform::get_git_command;

/// Fluent builder for a single `git` command.
///
/// Output is always captured. A non-zero exit status becomes a
/// [`DepotError::GitCommandError`] carrying git's stderr, and a command that
/// exceeds its timeout is killed and reported the same way.
///
/// # Examples
///
/// ```rust,no_run
/// use depot::git::GitCommand;
///
/// # async fn example() -> anyhow::Result<()> {
/// let heads = GitCommand::ls_remote_heads("https://github.com/acme/log")
///     .with_context("github.com/acme/log")
///     .execute_stdout()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct GitCommand {
    args: Vec<String>,
    env_vars: Vec<(String, String)>,
    timeout_duration: Option<Duration>,
    context: Option<String>,
}

impl Default for GitCommand {
    fn default() -> Self {
        Self {
            args: Vec::new(),
            env_vars: Vec::new(),
            timeout_duration: Some(Duration::from_secs(300)),
            context: None,
        }
    }
}

impl GitCommand {
    /// Empty command with a 5 minute timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for this invocation only.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.push((key.into(), value.into()));
        self
    }

    /// Set a custom timeout (None for no timeout).
    pub const fn with_timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout_duration = duration;
        self
    }

    /// Label included in log lines, typically the dependency name.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    fn operation(&self) -> String {
        self.args.first().cloned().unwrap_or_else(|| "unknown".to_string())
    }

    fn log_prefix(&self) -> String {
        self.context.as_ref().map(|c| format!("({c}) ")).unwrap_or_default()
    }

    /// Run the command and return its captured output.
    ///
    /// # Errors
    ///
    /// - git cannot be spawned
    /// - the timeout elapses
    /// - git exits unsuccessfully
    pub async fn execute(self) -> Result<GitCommandOutput> {
        let start = std::time::Instant::now();
        let git_command = get_git_command();
        let prefix = self.log_prefix();
        let command_line = self.args.join(" ");

        let mut cmd = Command::new(git_command);
        cmd.args(&self.args);
        for (key, value) in &self.env_vars {
            tracing::trace!(target: "git", "Setting env var: {}={}", key, value);
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        tracing::debug!(target: "git", "{}Executing command: {} {}", prefix, git_command, command_line);

        let output_future = cmd.output();
        let output = if let Some(duration) = self.timeout_duration {
            match timeout(duration, output_future).await {
                Ok(result) => {
                    result.with_context(|| format!("Failed to execute git {command_line}"))?
                }
                Err(_) => {
                    tracing::warn!(
                        target: "git",
                        "{}Command timed out after {} seconds: git {}",
                        prefix,
                        duration.as_secs(),
                        command_line
                    );
                    return Err(DepotError::GitCommandError {
                        operation: self.operation(),
                        stderr: format!(
                            "Git command timed out after {} seconds. This may indicate:\n\
                            - Network connectivity issues\n\
                            - Authentication prompts waiting for input\n\
                            Try running the command manually: git {}",
                            duration.as_secs(),
                            command_line
                        ),
                    }
                    .into());
                }
            }
        } else {
            output_future.await.with_context(|| format!("Failed to execute git {command_line}"))?
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            tracing::debug!(
                target: "git",
                "{}Command failed with exit code: {:?}",
                prefix,
                output.status.code()
            );
            if !stderr.is_empty() {
                tracing::debug!(target: "git", "{}Error: {}", prefix, stderr.trim());
            }
            return Err(DepotError::GitCommandError {
                operation: self.operation(),
                stderr: if stderr.trim().is_empty() { stdout } else { stderr },
            }
            .into());
        }

        let elapsed = start.elapsed();
        if elapsed.as_secs() > 1 {
            tracing::info!(
                target: "git::perf",
                "{}Git {} took {:.2}s",
                prefix,
                self.operation(),
                elapsed.as_secs_f64()
            );
        } else if elapsed.as_millis() > 100 {
            tracing::debug!(
                target: "git::perf",
                "{}Git {} took {}ms",
                prefix,
                self.operation(),
                elapsed.as_millis()
            );
        }

        Ok(GitCommandOutput {
            stdout,
            stderr,
        })
    }

    /// Run the command and return trimmed stdout.
    pub async fn execute_stdout(self) -> Result<String> {
        let output = self.execute().await?;
        Ok(output.stdout.trim().to_string())
    }

    /// Run the command, discarding its output.
    pub async fn execute_success(self) -> Result<()> {
        self.execute().await?;
        Ok(())
    }
}

/// Captured output of a git command.
#[derive(Debug, Clone)]
pub struct GitCommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl GitCommandOutput {
    /// Stdout followed by stderr, as a terminal would interleave them.
    pub fn combined(&self) -> String {
        let mut combined = String::with_capacity(self.stdout.len() + self.stderr.len() + 1);
        combined.push_str(&self.stdout);
        if !self.stderr.is_empty() {
            if !combined.is_empty() && !combined.ends_with('\n') {
                combined.push('\n');
            }
            combined.push_str(&self.stderr);
        }
        combined
    }
}

// Convenience builders for remote queries. Prompts are disabled so an
// unreachable private remote fails instead of waiting for credentials.

impl GitCommand {
    /// `git ls-remote <url>`: every ref the remote advertises.
    pub fn ls_remote(url: &str) -> Self {
        Self::new()
            .args(["ls-remote", url])
            .env("GIT_TERMINAL_PROMPT", "0")
            .with_timeout(Some(GIT_LS_REMOTE_TIMEOUT))
    }

    /// `git ls-remote --heads <url>`: branch heads only.
    pub fn ls_remote_heads(url: &str) -> Self {
        Self::new()
            .args(["ls-remote", "--heads", url])
            .env("GIT_TERMINAL_PROMPT", "0")
            .with_timeout(Some(GIT_LS_REMOTE_TIMEOUT))
    }

    /// `git --version`.
    pub fn version() -> Self {
        Self::new().arg("--version").with_timeout(Some(Duration::from_secs(10)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ls_remote_args() {
        let cmd = GitCommand::ls_remote("https://github.com/acme/log");
        assert_eq!(cmd.args, vec!["ls-remote", "https://github.com/acme/log"]);
        assert_eq!(cmd.timeout_duration, Some(GIT_LS_REMOTE_TIMEOUT));
        assert!(cmd.env_vars.contains(&("GIT_TERMINAL_PROMPT".to_string(), "0".to_string())));

        let heads = GitCommand::ls_remote_heads("r");
        assert_eq!(heads.args, vec!["ls-remote", "--heads", "r"]);
    }

    #[test]
    fn test_combined_output() {
        let output = GitCommandOutput {
            stdout: "a".to_string(),
            stderr: "b\n".to_string(),
        };
        assert_eq!(output.combined(), "a\nb\n");

        let empty_err = GitCommandOutput {
            stdout: "a\n".to_string(),
            stderr: String::new(),
        };
        assert_eq!(empty_err.combined(), "a\n");
    }

    #[tokio::test]
    async fn test_failed_command_is_git_error() {
        let err = GitCommand::new()
            .arg("definitely-not-a-git-subcommand")
            .execute()
            .await
            .unwrap_err();
        // Either git is missing (spawn error) or git rejects the subcommand.
        if let Some(depot_err) = err.downcast_ref::<DepotError>() {
            assert!(matches!(depot_err, DepotError::GitCommandError { .. }));
        }
    }
}
