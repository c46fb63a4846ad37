//! `depot cache`: inspect or clear the per-user cache.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use super::CliConfig;
use crate::cache::Cache;

#[derive(Args, Debug)]
pub struct CacheCommand {
    #[command(subcommand)]
    command: CacheSubcommands,
}

#[derive(Subcommand, Debug)]
enum CacheSubcommands {
    /// Remove everything in the cache directory
    Clear,

    /// Print the cache directory
    Path,
}

impl CacheCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let cache = Cache::new()?;

        match self.command {
            CacheSubcommands::Clear => {
                cache.clear_all().await?;
                if !cli.quiet {
                    println!("{} Cache cleared", "✓".green());
                }
            }
            CacheSubcommands::Path => println!("{}", cache.cache_dir().display()),
        }
        Ok(())
    }
}
