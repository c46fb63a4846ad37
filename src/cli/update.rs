//! `depot update`: resolve dependencies and regenerate the lock file.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::time::Duration;

use super::CliConfig;
use super::common::{CommandContext, load_global_config};
use crate::config::get_cache_dir;
use crate::constants::LOCK_FILE;
use crate::git::ensure_git_available;
use crate::installer::{LockStatus, RemoteInstaller, UpdateOptions, UpdateReport, run_update};

/// Update the project's dependencies.
///
/// Declared imports are resolved against their canonical remotes, imports
/// discovered recursively are merged with them and `depot.lock` is rewritten
/// when the result differs from the existing lock file.
#[derive(Args, Debug)]
pub struct UpdateCommand {
    /// Only resolve the declared imports; the lock file is not generated
    #[arg(long)]
    pub(super) skip_recursive: bool,

    /// Remove vendor directories nested in dependencies
    #[arg(long)]
    pub(super) strip_vendor: bool,
}

impl UpdateCommand {
    pub async fn execute(self, cli: &CliConfig, manifest_path: Option<PathBuf>) -> Result<()> {
        let ctx = CommandContext::load(manifest_path)?;
        let global = load_global_config(cli).await?;

        if ctx.config.all_imports().next().is_some() {
            ensure_git_available()?;
        }

        let installer = RemoteInstaller::from_config(&global.rewrite);
        let mut options = UpdateOptions::new(ctx.lockfile_path.clone(), get_cache_dir()?);
        options.skip_recursive = self.skip_recursive;
        options.strip_vendor = self.strip_vendor;
        options.lock_timeout = global.lock_timeout();

        if !cli.quiet {
            println!("🔄 Updating dependencies of {}", ctx.config.package);
        }

        let spinner = (!cli.quiet).then(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_message("Resolving dependencies");
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });

        let result = run_update(&installer, &ctx.config, &options).await;
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        let report = result?;

        if !cli.quiet {
            print_summary(&report);
        }
        Ok(())
    }
}

fn print_summary(report: &UpdateReport) {
    match &report.lock {
        LockStatus::Written => println!(
            "{} Wrote {} ({} dependencies, {} dev dependencies)",
            "✓".green(),
            LOCK_FILE,
            report.dependencies,
            report.dev_dependencies
        ),
        LockStatus::Unchanged => {
            println!("{} No changes to {}", "✓".green(), LOCK_FILE);
        }
        LockStatus::Skipped => println!(
            "{} {} not generated (--skip-recursive)",
            "⚠".yellow(),
            LOCK_FILE
        ),
        LockStatus::WriteFailed(reason) => {
            eprintln!("{} Could not write {}: {}", "⚠".yellow(), LOCK_FILE, reason);
        }
    }
}
