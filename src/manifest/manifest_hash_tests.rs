//! Tests for configuration content hashing.
//!
//! The hash of the original configuration is recorded in the lock file, so it
//! must be deterministic and sensitive to every declared field.

use crate::manifest::{Configuration, Import};

fn create_config() -> Configuration {
    let mut config = Configuration::new("example.com/acme/service");
    config.imports.push(Import::new("github.com/acme/log").with_pin("^1.0"));
    config.imports.push(Import::new("gopkg.in/yaml.v2"));
    config.dev_imports.push(Import::new("github.com/acme/testkit"));
    config
}

#[test]
fn test_hash_deterministic() {
    let config = create_config();
    let hash1 = config.compute_hash().unwrap();
    let hash2 = config.compute_hash().unwrap();
    assert_eq!(hash1, hash2, "Same configuration should produce same hash");
}

#[test]
fn test_hash_format() {
    let hash = create_config().compute_hash().unwrap();
    assert!(hash.starts_with("sha256:"), "Hash should have sha256: prefix");
    assert_eq!(hash.len(), 7 + 64, "Hash should be sha256: + 64 hex chars");
}

#[test]
fn test_hash_changes_on_pin_change() {
    let config1 = create_config();
    let mut config2 = create_config();
    config2.imports[0].pin = Some("^2.0".to_string());

    assert_ne!(config1.compute_hash().unwrap(), config2.compute_hash().unwrap());
}

#[test]
fn test_hash_changes_on_reference_change() {
    let config1 = create_config();
    let mut config2 = create_config();
    config2.imports[1].reference = Some("v2.4.0".to_string());

    assert_ne!(config1.compute_hash().unwrap(), config2.compute_hash().unwrap());
}

#[test]
fn test_hash_distinguishes_dev_from_primary() {
    let mut config1 = Configuration::new("p");
    config1.imports.push(Import::new("github.com/acme/log"));

    let mut config2 = Configuration::new("p");
    config2.dev_imports.push(Import::new("github.com/acme/log"));

    assert_ne!(config1.compute_hash().unwrap(), config2.compute_hash().unwrap());
}
