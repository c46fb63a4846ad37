//! Commands that expose the rewrite engine, the subpackage splitter and the
//! tag fetcher directly.

use anyhow::{Context, Result};
use clap::Args;

use super::CliConfig;
use super::common::load_global_config;
use crate::git::{ensure_git_available, fetch_tags};
use crate::rewrite::{RewriteEngine, SubpackageSplitter};

/// Print the canonical remote for an import path.
#[derive(Args, Debug)]
pub struct RewriteCommand {
    /// Import path or remote URL to canonicalize
    remote: String,
}

impl RewriteCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let global = load_global_config(cli).await?;
        let engine = RewriteEngine::from_config(&global.rewrite);

        let rewrite = engine.rewrite(&self.remote);
        println!("remote: {}", rewrite.remote);
        if let Some(branch) = rewrite.branch {
            println!("branch: {branch}");
        }
        Ok(())
    }
}

/// Split an import path into its repository root and subpackage.
#[derive(Args, Debug)]
pub struct SplitCommand {
    /// Import path to split
    path: String,
}

impl SplitCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let global = load_global_config(cli).await?;
        let splitter = SubpackageSplitter::from_config(&global.rewrite);

        match splitter.split(&self.path) {
            Some(split) => {
                println!("root: {}", split.root);
                println!("subpackage: {}", split.subpackage);
            }
            None => println!("root: {}", self.path),
        }
        Ok(())
    }
}

/// List the tags of a remote.
#[derive(Args, Debug)]
pub struct TagsCommand {
    /// Import path or remote URL
    remote: String,

    /// Query the remote exactly as given, without applying rewrite rules
    #[arg(long)]
    no_rewrite: bool,
}

impl TagsCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        ensure_git_available()?;

        let remote = if self.no_rewrite {
            self.remote
        } else {
            let global = load_global_config(cli).await?;
            RewriteEngine::from_config(&global.rewrite).rewrite(&self.remote).remote
        };

        let mut tags = fetch_tags(&remote);
        while let Some(tag) = tags.next_tag().await {
            let tag = tag.with_context(|| format!("Failed to list tags of {remote}"))?;
            println!("{tag}");
        }
        Ok(())
    }
}
