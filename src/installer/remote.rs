//! Installer backed by remote git queries.

use anyhow::{Context, Result};

use super::DependencyInstaller;
use crate::config::RewriteConfig;
use crate::git::{fetch_tags, verify_remote};
use crate::manifest::{Configuration, Import};
use crate::rewrite::{Rewrite, RewriteEngine, SubpackageSplitter};

/// Resolves imports against their canonical remotes.
///
/// Vendor tree placement belongs to the host tool, so [`export`] and
/// [`strip_vendor`] only record what was resolved.
///
/// [`export`]: DependencyInstaller::export
/// [`strip_vendor`]: DependencyInstaller::strip_vendor
#[derive(Debug)]
pub struct RemoteInstaller {
    engine: RewriteEngine,
    splitter: SubpackageSplitter,
}

impl RemoteInstaller {
    pub fn new(engine: RewriteEngine, splitter: SubpackageSplitter) -> Self {
        Self {
            engine,
            splitter,
        }
    }

    /// Installer using the rules of `config`.
    pub fn from_config(config: &RewriteConfig) -> Self {
        Self::new(RewriteEngine::from_config(config), SubpackageSplitter::from_config(config))
    }

    /// The remote an import is fetched from.
    ///
    /// An explicit `repo` is used verbatim; otherwise the import name is
    /// rewritten.
    pub fn remote_for(&self, import: &Import) -> Rewrite {
        match import.repo.as_deref().filter(|r| !r.is_empty()) {
            Some(repo) => Rewrite::remote(repo),
            None => self.engine.rewrite(&import.name),
        }
    }

    /// Move nested import paths onto their repository roots.
    ///
    /// `github.com/acme/log/hooks` becomes `github.com/acme/log` with
    /// subpackage `hooks`. Entries are not merged here; that happens after
    /// resolution.
    ///
    /// The remote and branch a rule derived from the nested path are kept on
    /// the folded import: `gopkg.in/check.v1/internal` folds to
    /// `gopkg.in/check`, which alone no longer names `go-check/check` at `v1`.
    pub fn fold_subpackages(&self, config: &mut Configuration) {
        for import in config.all_imports_mut() {
            let Some(split) = self.splitter.split(&import.name) else {
                continue;
            };
            tracing::debug!(
                target: "update",
                "{} -> {} (subpackage {})",
                import.name,
                split.root,
                split.subpackage
            );

            let rewritten = import
                .repo
                .as_deref()
                .is_none_or(str::is_empty)
                .then(|| self.engine.rewrite(&import.name))
                .filter(|rewrite| rewrite.remote != import.name);

            import.name = split.root;
            import.add_subpackage(split.subpackage);

            if let Some(original) = rewritten {
                let folded = self.engine.rewrite(&import.name);
                if folded.remote != original.remote {
                    import.repo = Some(original.remote);
                }
                if !import.has_reference()
                    && folded.branch != original.branch
                    && let Some(branch) = original.branch
                {
                    import.reference = Some(branch);
                }
            }
        }
    }

    /// Find a reference for an unresolved import.
    ///
    /// A branch implied by the rewrite wins; otherwise the first remote tag
    /// equal to the pin.
    async fn resolve_reference(&self, import: &Import) -> Result<Option<String>> {
        let rewrite = self.remote_for(import);
        if let Some(branch) = rewrite.branch {
            return Ok(Some(branch));
        }

        let Some(pin) = import.pin.as_deref().filter(|p| !p.is_empty()) else {
            return Ok(None);
        };

        let mut tags = fetch_tags(&rewrite.remote);
        while let Some(tag) = tags.next_tag().await {
            let tag = tag.with_context(|| format!("Failed to list tags of {}", rewrite.remote))?;
            if tag == pin {
                return Ok(Some(tag));
            }
        }
        Ok(None)
    }
}

impl DependencyInstaller for RemoteInstaller {
    async fn checkout(&self, config: &Configuration) -> Result<()> {
        for import in config.all_imports() {
            let rewrite = self.remote_for(import);
            verify_remote(&rewrite.remote).await.with_context(|| {
                format!("Cannot reach {} for import '{}'", rewrite.remote, import.name)
            })?;
        }
        Ok(())
    }

    async fn update(&self, config: &mut Configuration) -> Result<()> {
        self.fold_subpackages(config);
        Ok(())
    }

    async fn set_reference(&self, config: &mut Configuration) -> Result<()> {
        let mut failures = Vec::new();

        for import in config.all_imports_mut() {
            if import.has_reference() {
                continue;
            }
            match self.resolve_reference(import).await {
                Ok(Some(reference)) => {
                    tracing::debug!(target: "update", "{} -> {}", import.name, reference);
                    import.reference = Some(reference);
                }
                Ok(None) => {}
                Err(e) => failures.push(format!("{}: {:#}", import.name, e)),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(anyhow::anyhow!(
                "Failed to set references for {} imports:\n  - {}",
                failures.len(),
                failures.join("\n  - ")
            ))
        }
    }

    async fn export(&self, config: &Configuration) -> Result<()> {
        for import in config.all_imports() {
            tracing::debug!(
                target: "update",
                "Resolved {} at {}",
                import.name,
                import.resolved_reference().unwrap_or("(unpinned)")
            );
        }
        Ok(())
    }
}
