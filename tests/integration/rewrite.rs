//! `depot rewrite` and `depot split` with rules from the global configuration.

use anyhow::Result;
use predicates::prelude::*;

use crate::common::TestProject;

const RULES: &str = r#"
[[rewrite.fix]]
old_url = "legacy.example.com"
new_url = "github.com/acme-archive"
xfix = "-legacy"

[[rewrite.ssh]]
old_url = "git.corp.example.com"

[[rewrite.generic]]
package = "gopkg.in"
repo = "github.com"
versioned = true

[[rewrite.subpackage]]
index = 3
markers = ["github.com/"]
"#;

#[test]
fn test_rewrite_without_config_is_identity() -> Result<()> {
    let project = TestProject::new()?;

    project
        .depot()
        .args(["rewrite", "example.com/acme/app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remote: example.com/acme/app"))
        .stdout(predicate::str::contains("branch").not());
    Ok(())
}

#[test]
fn test_rewrite_fix_rule() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config(RULES)?;

    project
        .depot()
        .args(["rewrite", "legacy.example.com/widget"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remote: https://github.com/acme-archive/widget-legacy"));
    Ok(())
}

#[test]
fn test_rewrite_versioned_package_reports_branch() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config(RULES)?;

    project
        .depot()
        .args(["rewrite", "gopkg.in/yaml.v2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remote: https://github.com/go-yaml/yaml"))
        .stdout(predicate::str::contains("branch: v2"));
    Ok(())
}

#[test]
fn test_rewrite_explicit_config_flag() -> Result<()> {
    let project = TestProject::new()?;
    let other = project.project_path().join("rules.toml");
    std::fs::write(&other, RULES)?;

    project
        .depot()
        .args(["rewrite", "git.corp.example.com/team/app/pkg", "--config"])
        .arg(&other)
        .assert()
        .success()
        .stdout(predicate::str::contains("remote: git@git.git.corp.example.com:team/app.git"));
    Ok(())
}

#[test]
fn test_rewrite_invalid_config_fails() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config("[[rewrite.fix]]\nold_url = 3\n")?;

    project
        .depot()
        .args(["rewrite", "example.com/a/b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
    Ok(())
}

#[test]
fn test_split_versioned_host() -> Result<()> {
    let project = TestProject::new()?;

    project
        .depot()
        .args(["split", "gopkg.in/pkg.v2/foo/bar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("root: gopkg.in/pkg"))
        .stdout(predicate::str::contains("subpackage: foo/bar"));
    Ok(())
}

#[test]
fn test_split_with_index_rule() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config(RULES)?;

    project
        .depot()
        .args(["split", "github.com/acme/log/hooks/syslog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("root: github.com/acme/log"))
        .stdout(predicate::str::contains("subpackage: hooks/syslog"));
    Ok(())
}

#[test]
fn test_split_repository_root() -> Result<()> {
    let project = TestProject::new()?;

    project
        .depot()
        .args(["split", "example.com/acme/app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("root: example.com/acme/app"))
        .stdout(predicate::str::contains("subpackage").not());
    Ok(())
}
