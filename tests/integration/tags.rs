//! `depot tags` against local remotes.

use anyhow::Result;
use predicates::prelude::*;

use crate::common::{TestProject, git_available};

#[test]
fn test_tags_lists_in_remote_order() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let project = TestProject::new()?;
    let remote = project.create_remote("widgets", &["v1.0.0", "v1.2.0"])?;
    remote.annotated_tag("v2.0.0", "major release")?;

    project
        .depot()
        .args(["tags", "--no-rewrite"])
        .arg(remote.remote())
        .assert()
        .success()
        .stdout("v1.0.0\nv1.2.0\nv2.0.0\nv2.0.0\n");
    Ok(())
}

#[test]
fn test_tags_without_tags_prints_nothing() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let project = TestProject::new()?;
    let remote = project.create_remote("empty", &[])?;

    project.depot().args(["tags"]).arg(remote.remote()).assert().success().stdout("");
    Ok(())
}

#[test]
fn test_tags_unreachable_remote_fails() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let project = TestProject::new()?;
    let missing = project.project_path().join("no-such-remote");

    project
        .depot()
        .args(["tags", "--no-rewrite"])
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to list tags"));
    Ok(())
}
