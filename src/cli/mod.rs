//! Command-line interface for depot.
//!
//! # Commands
//!
//! - `update` - Resolve dependencies, merge duplicates and regenerate `depot.lock`
//! - `rewrite` - Show the canonical remote (and branch) for an import path
//! - `split` - Show how an import path divides into repository root and subpackage
//! - `tags` - List a remote's tags as they arrive
//! - `cache` - Inspect or clear the per-user cache
//!
//! # Global Options
//!
//! - `--verbose` / `-v`: debug logging
//! - `--quiet` / `-q`: no logging and no progress messages
//! - `--config` / `-c`: global configuration file (defaults to `~/.depot/config.toml`)
//! - `--manifest-path`: explicit `depot.toml` instead of searching parent directories
//!
//! `RUST_LOG` takes precedence over `--verbose` and `--quiet`.

mod cache;
pub mod common;
mod rewrite;
mod update;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Settings derived from the global flags and shared by every command.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter when `RUST_LOG` is unset; `None` disables logging.
    pub log_level: Option<String>,

    /// Suppress progress and summary output.
    pub quiet: bool,

    /// Global configuration file given with `--config`.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber.
    ///
    /// Logs go to stderr so command output on stdout stays parseable.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if let Some(level) = &self.log_level {
            EnvFilter::new(level)
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

#[derive(Parser)]
#[command(
    name = "depot",
    about = "Merge dependencies, generate lock files and canonicalize remotes",
    version,
    long_about = "depot resolves a project's declared imports against their canonical remotes, \
                  merges duplicate entries discovered during recursive resolution and writes \
                  depot.lock when the resolution changed."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the global configuration file
    #[arg(short, long, global = true, env = "DEPOT_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Path to depot.toml
    #[arg(long, global = true)]
    manifest_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Update dependencies and regenerate the lock file
    Update(update::UpdateCommand),

    /// Print the canonical remote for an import path
    Rewrite(rewrite::RewriteCommand),

    /// Split an import path into repository root and subpackage
    Split(rewrite::SplitCommand),

    /// Stream the tags of a remote
    Tags(rewrite::TagsCommand),

    /// Manage the cache directory
    Cache(cache::CacheCommand),
}

impl Cli {
    /// Configure logging and run the selected command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            quiet: self.quiet,
            config_path: self.config.clone(),
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Update(cmd) => cmd.execute(&config, self.manifest_path).await,
            Commands::Rewrite(cmd) => cmd.execute(&config).await,
            Commands::Split(cmd) => cmd.execute(&config).await,
            Commands::Tags(cmd) => cmd.execute(&config).await,
            Commands::Cache(cmd) => cmd.execute(&config).await,
        }
    }
}
