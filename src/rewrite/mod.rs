//! Remote rewriting: mapping import paths to canonical fetchable remotes.
//!
//! Import paths are not always the address a repository can be fetched from.
//! Vanity hosts, renamed organizations and versioned import hosts all need a
//! translation step before `git` can reach them. The [`RewriteEngine`] applies
//! user-configured rules (the `[rewrite]` table of
//! [`GlobalConfig`](crate::config::GlobalConfig)) and returns a [`Rewrite`]: the
//! canonical remote plus, for versioned paths, the branch or tag to check out.
//!
//! # Rule Precedence
//!
//! Rules are grouped into categories consulted in a fixed order:
//!
//! 1. SSH ([`SshRule`](crate::config::SshRule))
//! 2. Fix ([`FixRule`](crate::config::FixRule))
//! 3. Many-to-one ([`ManyToOneRule`](crate::config::ManyToOneRule))
//! 4. One-to-many ([`OneToManyRule`](crate::config::OneToManyRule))
//! 5. Generic and versioned ([`GenericRule`](crate::config::GenericRule))
//!
//! Within a category rules are tried in configured order. The first rule whose
//! output differs from its input wins; if none does, the remote is returned
//! unchanged with no branch.
//!
//! # Example
//!
//! ```rust
//! use depot::config::{FixRule, RewriteConfig};
//! use depot::rewrite::RewriteEngine;
//!
//! let mut config = RewriteConfig::default();
//! config.fix.push(FixRule {
//!     old_url: "legacy.acme.com".to_string(),
//!     new_url: "github.com/acme".to_string(),
//!     xfix: "-legacy".to_string(),
//! });
//!
//! let engine = RewriteEngine::from_config(&config);
//! let rewrite = engine.rewrite("legacy.acme.com/widget");
//! assert_eq!(rewrite.remote, "https://github.com/acme/widget-legacy");
//! assert_eq!(rewrite.branch, None);
//! ```

mod rules;
mod subpackage;
mod versioned;

#[cfg(test)]
mod tests;

pub use subpackage::{SplitPath, SubpackageSplitter};
pub use versioned::split_versioned_segment;

use crate::config::RewriteConfig;
use crate::constants::PATH_SEPARATOR;

/// Result of rewriting a remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Canonical remote to fetch from.
    pub remote: String,

    /// Branch or tag implied by the import path, if any.
    pub branch: Option<String>,
}

impl Rewrite {
    /// A rewrite with no branch.
    pub fn remote(remote: impl Into<String>) -> Self {
        Self {
            remote: remote.into(),
            branch: None,
        }
    }

    /// A rewrite that also selects a branch or tag.
    pub fn with_branch(remote: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            remote: remote.into(),
            branch: Some(branch.into()),
        }
    }
}

/// One rewrite rule.
///
/// Implementations return `None` when the rule does not apply. The engine also
/// treats an output equal to the input as no match, so rules need not check
/// for that themselves.
pub trait RewriteRule: Send + Sync {
    /// Category name used in log output.
    fn category(&self) -> &'static str;

    /// Attempt to rewrite `remote`.
    fn try_rewrite(&self, remote: &str) -> Option<Rewrite>;
}

/// Ordered dispatch table of rewrite rules.
pub struct RewriteEngine {
    rules: Vec<Box<dyn RewriteRule>>,
}

impl RewriteEngine {
    /// Build the table from configuration, in category precedence order.
    pub fn from_config(config: &RewriteConfig) -> Self {
        let mut rules: Vec<Box<dyn RewriteRule>> = Vec::new();
        rules.extend(config.ssh.iter().cloned().map(|r| Box::new(r) as Box<dyn RewriteRule>));
        rules.extend(config.fix.iter().cloned().map(|r| Box::new(r) as Box<dyn RewriteRule>));
        rules.extend(
            config.many_to_one.iter().cloned().map(|r| Box::new(r) as Box<dyn RewriteRule>),
        );
        rules.extend(
            config.one_to_many.iter().cloned().map(|r| Box::new(r) as Box<dyn RewriteRule>),
        );
        rules.extend(config.generic.iter().cloned().map(|r| Box::new(r) as Box<dyn RewriteRule>));
        Self {
            rules,
        }
    }

    /// Build an engine from an explicit rule list.
    pub fn with_rules(rules: Vec<Box<dyn RewriteRule>>) -> Self {
        Self {
            rules,
        }
    }

    /// Number of configured rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are configured.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rewrite `remote` with the first rule that changes it.
    ///
    /// Returns the input unchanged, with no branch, when nothing matches.
    pub fn rewrite(&self, remote: &str) -> Rewrite {
        for rule in &self.rules {
            let Some(rewrite) = rule.try_rewrite(remote) else {
                continue;
            };
            if rewrite.remote == remote {
                continue;
            }
            tracing::info!(
                target: "rewrite",
                "{} rule: {} -> {}{}",
                rule.category(),
                remote,
                rewrite.remote,
                rewrite.branch.as_deref().map(|b| format!(" ({b})")).unwrap_or_default()
            );
            return rewrite;
        }
        Rewrite::remote(remote)
    }
}

impl std::fmt::Debug for RewriteEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewriteEngine")
            .field("rules", &self.rules.iter().map(|r| r.category()).collect::<Vec<_>>())
            .finish()
    }
}

/// Split a remote into its `/`-separated segments.
pub(crate) fn segments(remote: &str) -> Vec<&str> {
    remote.split(PATH_SEPARATOR).collect()
}

/// `https://<host>/<path>` with exactly one separator between the two.
pub(crate) fn https_join(host: &str, path: &str) -> String {
    format!(
        "https://{}{}{}",
        host.trim_end_matches(PATH_SEPARATOR),
        PATH_SEPARATOR,
        path.trim_start_matches(PATH_SEPARATOR)
    )
}
