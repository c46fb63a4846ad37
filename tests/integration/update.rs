//! `depot update`: the full pipeline against local remotes.

use anyhow::Result;
use predicates::prelude::*;

use crate::common::{TestProject, depot_cmd, git_available};

fn manifest_with_remote(name: &str, pin: &str, remote: &str) -> String {
    format!(
        "package = \"example.com/acme/app\"\n\n\
         [[import]]\n\
         name = \"{name}\"\n\
         version = \"{pin}\"\n\
         repo = '{remote}'\n"
    )
}

#[test]
fn test_update_without_imports_writes_lock() -> Result<()> {
    let project = TestProject::new()?;
    project.write_manifest("package = \"example.com/acme/app\"\n")?;

    project
        .depot()
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote depot.lock (0 dependencies, 0 dev dependencies)"));

    let lock = project.read_lockfile()?;
    assert!(lock.starts_with("# Auto-generated lockfile - DO NOT EDIT"));
    assert!(lock.contains("hash = \"sha256:"));
    Ok(())
}

#[test]
fn test_second_update_leaves_lock_untouched() -> Result<()> {
    let project = TestProject::new()?;
    project.write_manifest("package = \"example.com/acme/app\"\n")?;

    project.depot().arg("update").assert().success();
    let first = project.read_lockfile()?;

    project
        .depot()
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes to depot.lock"));
    assert_eq!(project.read_lockfile()?, first);
    Ok(())
}

#[test]
fn test_skip_recursive_does_not_generate_lock() -> Result<()> {
    let project = TestProject::new()?;
    project.write_manifest("package = \"example.com/acme/app\"\n")?;

    project
        .depot()
        .args(["update", "--skip-recursive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not generated"));
    assert!(!project.lockfile_path().exists());
    Ok(())
}

#[test]
fn test_update_quiet_prints_nothing() -> Result<()> {
    let project = TestProject::new()?;
    project.write_manifest("package = \"example.com/acme/app\"\n")?;

    project.depot().args(["update", "-q"]).assert().success().stdout("");
    assert!(project.lockfile_path().exists());
    Ok(())
}

#[test]
fn test_update_missing_manifest_fails() -> Result<()> {
    let project = TestProject::new()?;

    project
        .depot()
        .arg("update")
        .assert()
        .failure()
        .stderr(predicate::str::contains("depot.toml not found"));
    Ok(())
}

#[test]
fn test_update_with_manifest_path() -> Result<()> {
    let project = TestProject::new()?;
    project.write_manifest("package = \"example.com/acme/app\"\n")?;
    let elsewhere = tempfile::TempDir::new()?;

    depot_cmd(project.cache_path(), project.config_path())
        .current_dir(elsewhere.path())
        .arg("update")
        .arg("--manifest-path")
        .arg(project.project_path().join("depot.toml"))
        .assert()
        .success();

    assert!(project.lockfile_path().exists());
    Ok(())
}

#[test]
fn test_update_resolves_pin_from_remote_tags() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let project = TestProject::new()?;
    let remote = project.create_remote("widgets", &["v1.0.0", "v1.2.0"])?;
    project.write_manifest(&manifest_with_remote(
        "example.com/acme/widgets",
        "v1.2.0",
        &remote.remote(),
    ))?;

    project
        .depot()
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote depot.lock (1 dependencies"));

    let lock = project.read_lockfile()?;
    assert!(lock.contains("name = \"example.com/acme/widgets\""));
    assert!(lock.contains("version = \"v1.2.0\""));
    assert!(lock.contains("pin = \"v1.2.0\""));
    Ok(())
}

#[test]
fn test_update_unreachable_remote_fails_before_lock() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let project = TestProject::new()?;
    let missing = project.project_path().join("missing-remote");
    project.write_manifest(&manifest_with_remote(
        "example.com/acme/gone",
        "v1.0.0",
        &missing.display().to_string(),
    ))?;

    project
        .depot()
        .arg("update")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to do initial checkout of config"));
    assert!(!project.lockfile_path().exists());
    Ok(())
}

#[test]
fn test_update_merges_subpackage_imports() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let project = TestProject::new()?;
    let remote = project.create_remote("log", &["v1.4.0"])?;
    project.write_config(
        "[[rewrite.subpackage]]\nindex = 3\nmarkers = [\"github.com/\"]\n",
    )?;
    project.write_manifest(&format!(
        "package = \"example.com/acme/app\"\n\n\
         [[import]]\n\
         name = \"github.com/acme/log\"\n\
         version = \"v1.4.0\"\n\
         repo = '{remote}'\n\n\
         [[import]]\n\
         name = \"github.com/acme/log/hooks\"\n\
         version = \"v1.4.0\"\n\
         repo = '{remote}'\n",
        remote = remote.remote()
    ))?;

    project.depot().arg("update").assert().success();

    let lock = project.read_lockfile()?;
    assert_eq!(lock.matches("name = \"github.com/acme/log\"").count(), 1);
    assert!(lock.contains("subpackages = [\"hooks\"]"));
    Ok(())
}
