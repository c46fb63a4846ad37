//! Loading and saving `depot.toml`.

use anyhow::{Context, Result};
use std::path::Path;

use super::Configuration;
use crate::utils::fs::safe_write;

impl Configuration {
    /// Load a configuration from a manifest file.
    ///
    /// # Errors
    ///
    /// - The file cannot be read
    /// - The content is not valid TOML or does not match the manifest layout
    ///   ([`DepotError::ManifestParseError`](crate::core::DepotError::ManifestParseError))
    /// - An import has an empty name
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| crate::core::DepotError::ManifestParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            })
            .with_context(|| {
                format!(
                    "Invalid TOML syntax in manifest file: {}\n\n\
                    Common TOML syntax errors:\n\
                    - Missing quotes around strings\n\
                    - [[import]] written as [import]\n\
                    - Invalid characters in keys or values",
                    path.display()
                )
            })?;

        config.validate()?;

        Ok(config)
    }

    /// Serialize to TOML and write atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string(self).with_context(|| "Failed to serialize manifest data to TOML format")?;
        safe_write(path, &content)
            .with_context(|| format!("Failed to write manifest file: {}", path.display()))
    }

    /// Reject declarations that cannot be keyed.
    fn validate(&self) -> Result<()> {
        if let Some(import) = self.all_imports().find(|i| i.name.trim().is_empty()) {
            return Err(crate::core::DepotError::InvalidDependency {
                name: import.name.clone(),
                reason: "import name is empty".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
