//! Project configuration (`depot.toml`) and dependency declarations.
//!
//! The manifest declares the project's package name and two ordered dependency
//! lists: primary imports and development imports. Each entry is an [`Import`]
//! keyed by its canonical import path.
//!
//! # File Format
//!
//! ```toml
//! package = "example.com/acme/service"
//!
//! [[import]]
//! name = "gopkg.in/yaml.v2"
//! version = "^2.0"                 # pin: the constraint as declared
//!
//! [[import]]
//! name = "github.com/acme/log"
//! reference = "v1.4.0"             # resolved commit, tag or branch
//! subpackages = ["hooks", "writer"]
//!
//! [[dev_import]]
//! name = "github.com/acme/testkit"
//! repo = "git@git.acme.com:acme/testkit.git"
//! vcs = "git"
//! ```
//!
//! # Working Copies
//!
//! The update pipeline never mutates the loaded [`Configuration`] directly: it
//! clones it, resolves and merges the clone, and hashes the pristine original
//! with [`Configuration::compute_hash`] so the lock file records what the user
//! actually declared.

mod helpers;
mod manifest_io;

#[cfg(test)]
mod manifest_hash_tests;

pub use helpers::{find_manifest, find_manifest_from, find_manifest_with_optional};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One dependency declaration.
///
/// `name` is the unique key within a list once merging has completed. An
/// absent or empty `reference` means the dependency is not resolved yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// Canonical import path (e.g. `github.com/acme/log`).
    pub name: String,

    /// Version constraint as originally declared.
    #[serde(default, rename = "version", skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,

    /// Resolved VCS commit, tag or branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Explicit remote that overrides the import path when fetching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    /// Repository kind (`git`, `hg`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcs: Option<String>,

    /// Subpackage paths of this repository imported by the project, in first-seen order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subpackages: Vec<String>,
}

impl Import {
    /// Create an unresolved import with no pin.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder: set the declared pin.
    #[must_use]
    pub fn with_pin(mut self, pin: impl Into<String>) -> Self {
        self.pin = Some(pin.into());
        self
    }

    /// Builder: set the resolved reference.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Builder: append subpackages.
    #[must_use]
    pub fn with_subpackages<I, S>(mut self, subpackages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for sub in subpackages {
            self.add_subpackage(sub);
        }
        self
    }

    /// The reference, if present and non-empty.
    #[must_use]
    pub fn resolved_reference(&self) -> Option<&str> {
        self.reference.as_deref().filter(|r| !r.is_empty())
    }

    /// Whether a non-empty reference is set.
    #[must_use]
    pub fn has_reference(&self) -> bool {
        self.resolved_reference().is_some()
    }

    /// Add a subpackage unless it is already listed. Returns whether it was added.
    pub fn add_subpackage(&mut self, subpackage: impl Into<String>) -> bool {
        let subpackage = subpackage.into();
        if self.subpackages.contains(&subpackage) {
            return false;
        }
        self.subpackages.push(subpackage);
        true
    }

    /// The remote to canonicalize: `repo` when set, otherwise the import path.
    #[must_use]
    pub fn remote(&self) -> &str {
        self.repo.as_deref().filter(|r| !r.is_empty()).unwrap_or(&self.name)
    }
}

/// A project's declared dependency set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Import path of the project itself.
    #[serde(default)]
    pub package: String,

    /// Primary dependencies, in declaration order.
    #[serde(default, rename = "import", skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<Import>,

    /// Development-only dependencies, in declaration order.
    #[serde(default, rename = "dev_import", skip_serializing_if = "Vec::is_empty")]
    pub dev_imports: Vec<Import>,
}

impl Configuration {
    /// Create an empty configuration for `package`.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }

    /// Iterate over primary then development imports.
    pub fn all_imports(&self) -> impl Iterator<Item = &Import> {
        self.imports.iter().chain(self.dev_imports.iter())
    }

    /// Iterate mutably over primary then development imports.
    pub fn all_imports_mut(&mut self) -> impl Iterator<Item = &mut Import> {
        self.imports.iter_mut().chain(self.dev_imports.iter_mut())
    }

    /// Compute a SHA-256 content hash of this configuration.
    ///
    /// The package name and both lists are hashed in declaration order, each
    /// import as a JSON document so field additions with defaults stay stable.
    /// The result is formatted as `sha256:<hex>`.
    ///
    /// # Errors
    ///
    /// Returns an error when an import cannot be serialized. Callers building a
    /// lock file treat this as fatal: there is nothing meaningful to lock
    /// without the hash.
    pub fn compute_hash(&self) -> Result<String> {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(b"package:");
        hasher.update(self.package.as_bytes());
        hasher.update(b"\n");

        for (section, imports) in [("import", &self.imports), ("dev_import", &self.dev_imports)] {
            for import in imports {
                let json = serde_json::to_string(import).with_context(|| {
                    format!("Failed to serialize import '{}' for hashing", import.name)
                })?;
                hasher.update(section.as_bytes());
                hasher.update(b":");
                hasher.update(json.as_bytes());
                hasher.update(b"\n");
            }
        }

        Ok(format!("sha256:{}", hex::encode(hasher.finalize())))
    }
}
