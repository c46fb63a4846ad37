//! `depot cache path` and `depot cache clear`.

use anyhow::Result;
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_cache_path_honors_override() -> Result<()> {
    let project = TestProject::new()?;
    let cache = project.cache_path();

    project
        .depot()
        .args(["cache", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(cache.display().to_string()));

    // The directory is created on first use.
    assert!(cache.is_dir());
    Ok(())
}

#[test]
fn test_cache_clear_empties_directory() -> Result<()> {
    let project = TestProject::new()?;
    let cache = project.cache_path();
    std::fs::create_dir_all(cache.join(".locks"))?;
    std::fs::write(cache.join(".locks").join("stale.lock"), "")?;
    std::fs::write(cache.join("leftover"), "data")?;

    project
        .depot()
        .args(["cache", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache cleared"));

    assert!(cache.is_dir());
    assert_eq!(std::fs::read_dir(&cache)?.count(), 0);
    Ok(())
}

#[test]
fn test_cache_clear_quiet() -> Result<()> {
    let project = TestProject::new()?;

    project.depot().args(["--quiet", "cache", "clear"]).assert().success().stdout("");
    Ok(())
}
