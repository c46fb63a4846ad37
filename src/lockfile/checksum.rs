//! Content fingerprint of a lock file.

use anyhow::{Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::{LockFile, LockedImport};

/// The fingerprinted part of a lock file: everything but the timestamp.
#[derive(Serialize)]
struct FingerprintView<'a> {
    version: u32,
    hash: &'a str,
    imports: &'a [LockedImport],
    dev_imports: &'a [LockedImport],
}

impl LockFile {
    /// SHA-256 digest of the lock content, excluding `updated`.
    ///
    /// Two lock files built from the same resolution have equal fingerprints
    /// even when generated at different times. Formatted as `sha256:<hex>`.
    pub fn fingerprint(&self) -> Result<String> {
        let view = FingerprintView {
            version: self.version,
            hash: &self.hash,
            imports: &self.imports,
            dev_imports: &self.dev_imports,
        };
        let json = serde_json::to_vec(&view).context("Failed to serialize lockfile for fingerprinting")?;

        let mut hasher = Sha256::new();
        hasher.update(&json);
        Ok(format!("sha256:{}", hex::encode(hasher.finalize())))
    }

    /// Whether `other` has the same fingerprint as `self`.
    pub fn same_content(&self, other: &Self) -> Result<bool> {
        Ok(self.fingerprint()? == other.fingerprint()?)
    }
}
