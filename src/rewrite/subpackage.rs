//! Splitting nested import paths into repository root and subpackage.
//!
//! An import such as `github.com/acme/log/hooks/syslog` lives in the repository
//! `github.com/acme/log`; `hooks/syslog` is a subpackage of it. The
//! [`SubpackageSplitter`] decides where the repository root ends:
//!
//! 1. Versioned host paths (`gopkg.in/pkg.v2/foo`): the root ends before the
//!    `.v<N>/` marker. A versioned host path without the marker is never split.
//! 2. Index rules ([`SubpackageRule`]): the first `index` segments are the root.
//! 3. SSH rules ([`SshRule`]): the first three segments are the root.
//!
//! When nothing applies the whole path is the root and `split` returns `None`.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::{RewriteConfig, SshRule, SubpackageRule};
use crate::constants::{PATH_SEPARATOR, VERSION_MARKER};

static VERSION_DIRECTORY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(&format!(r"{}\d+/", regex::escape(VERSION_MARKER))).ok());

/// A nested import path split at its repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPath {
    /// Repository root import path.
    pub root: String,

    /// Path below the root, without a leading separator.
    pub subpackage: String,
}

/// Decides repository roots for nested import paths.
#[derive(Debug, Clone)]
pub struct SubpackageSplitter {
    versioned_host: String,
    index_rules: Vec<SubpackageRule>,
    ssh_rules: Vec<SshRule>,
}

impl SubpackageSplitter {
    /// Build a splitter from the rewrite configuration.
    pub fn from_config(config: &RewriteConfig) -> Self {
        Self {
            versioned_host: config.versioned_host().to_string(),
            index_rules: config.subpackage.clone(),
            ssh_rules: config.ssh.clone(),
        }
    }

    /// Split `path` into root and subpackage, or `None` when the whole path is the root.
    pub fn split(&self, path: &str) -> Option<SplitPath> {
        if path.contains(&self.versioned_host) {
            return split_at_version(path);
        }

        if let Some(split) = self.index_rules.iter().find_map(|rule| split_by_index(rule, path)) {
            return Some(split);
        }

        self.ssh_rules.iter().find_map(|rule| split_by_ssh(rule, path))
    }
}

fn split_at_version(path: &str) -> Option<SplitPath> {
    let found = VERSION_DIRECTORY.as_ref()?.find(path)?;
    let subpackage = &path[found.end()..];
    if subpackage.is_empty() {
        return None;
    }
    Some(SplitPath {
        root: path[..found.start()].to_string(),
        subpackage: subpackage.to_string(),
    })
}

fn split_by_index(rule: &SubpackageRule, path: &str) -> Option<SplitPath> {
    if rule.index == 0 || !rule.markers.iter().any(|m| !m.is_empty() && path.contains(m.as_str()))
    {
        return None;
    }
    split_segments(path, rule.index)
}

fn split_by_ssh(rule: &SshRule, path: &str) -> Option<SplitPath> {
    if rule.old_url.is_empty() || !path.contains(&rule.old_url) {
        return None;
    }
    split_segments(path, 3)
}

/// Root is the first `index` segments; requires at least one segment after it.
fn split_segments(path: &str, index: usize) -> Option<SplitPath> {
    let segs: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    if segs.len() <= index {
        return None;
    }
    let sep = PATH_SEPARATOR.to_string();
    Some(SplitPath {
        root: segs[..index].join(&sep),
        subpackage: segs[index..].join(&sep),
    })
}
