//! Lock file (`depot.lock`) for reproducible dependency resolution.
//!
//! The lock file records the exact reference every dependency resolved to,
//! together with the hash of the configuration it was generated from. It is a
//! derived artifact: it is rebuilt from the resolved configuration on every
//! update and only written when its content actually changed.
//!
//! # Format
//!
//! ```toml
//! # Auto-generated lockfile - DO NOT EDIT
//! version = 1
//! hash = "sha256:9f2c..."
//! updated = "2024-05-01T12:00:00Z"
//!
//! [[import]]
//! name = "github.com/acme/log"
//! version = "v1.4.0"
//! subpackages = ["hooks"]
//!
//! [[dev_import]]
//! name = "github.com/acme/testkit"
//! version = "3f9a1c0"
//! pin = "^0.3"
//! ```
//!
//! Entries are sorted by name so two lock files built from the same resolution
//! are identical apart from `updated`.
//!
//! # Change Detection
//!
//! [`LockFile::fingerprint`] digests everything except `updated`. The update
//! pipeline compares the fingerprint of the freshly built lock against the one
//! on disk and skips the write when they match, so re-running an update that
//! resolves identically leaves the file untouched.

mod checksum;
mod io;


use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::DepotError;
use crate::manifest::Import;

/// A locked dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedImport {
    /// Canonical import path.
    pub name: String,

    /// Resolved reference (commit, tag or branch).
    #[serde(default, rename = "version", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Declared constraint the reference was resolved from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcs: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subpackages: Vec<String>,
}

impl From<&Import> for LockedImport {
    fn from(import: &Import) -> Self {
        Self {
            name: import.name.clone(),
            reference: import.resolved_reference().map(str::to_string),
            pin: import.pin.clone().filter(|p| !p.is_empty()),
            repo: import.repo.clone().filter(|r| !r.is_empty()),
            vcs: import.vcs.clone().filter(|v| !v.is_empty()),
            subpackages: import.subpackages.clone(),
        }
    }
}

/// The lock file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockFile {
    /// Format version.
    pub version: u32,

    /// Hash of the configuration as declared, before resolution.
    pub hash: String,

    /// When this lock was generated. Excluded from the fingerprint.
    pub updated: DateTime<Utc>,

    #[serde(default, rename = "import", skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<LockedImport>,

    #[serde(default, rename = "dev_import", skip_serializing_if = "Vec::is_empty")]
    pub dev_imports: Vec<LockedImport>,
}

impl LockFile {
    /// Current lock file format version.
    pub const CURRENT_VERSION: u32 = 1;

    /// Build a lock file from resolved import lists.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::InvalidDependency`] when an import has an empty
    /// name or a name appears twice in the same list (the lists were not
    /// merged).
    pub fn new(imports: &[Import], dev_imports: &[Import], hash: impl Into<String>) -> Result<Self> {
        Ok(Self {
            version: Self::CURRENT_VERSION,
            hash: hash.into(),
            updated: Utc::now(),
            imports: lock_list(imports)?,
            dev_imports: lock_list(dev_imports)?,
        })
    }

    /// Look up a locked primary import by name.
    pub fn get_import(&self, name: &str) -> Option<&LockedImport> {
        self.imports.iter().find(|i| i.name == name)
    }

    /// Look up a locked development import by name.
    pub fn get_dev_import(&self, name: &str) -> Option<&LockedImport> {
        self.dev_imports.iter().find(|i| i.name == name)
    }

    /// Total number of locked entries.
    pub fn len(&self) -> usize {
        self.imports.len() + self.dev_imports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.dev_imports.is_empty()
    }
}

fn lock_list(imports: &[Import]) -> Result<Vec<LockedImport>> {
    let mut seen = HashSet::with_capacity(imports.len());
    let mut locked = Vec::with_capacity(imports.len());

    for import in imports {
        if import.name.trim().is_empty() {
            return Err(DepotError::InvalidDependency {
                name: import.name.clone(),
                reason: "cannot lock an import without a name".to_string(),
            }
            .into());
        }
        if !seen.insert(import.name.as_str()) {
            return Err(DepotError::InvalidDependency {
                name: import.name.clone(),
                reason: "import appears more than once".to_string(),
            }
            .into());
        }
        locked.push(LockedImport::from(import));
    }

    locked.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(locked)
}
