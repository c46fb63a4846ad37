//! Generic package substitution with versioned import path support.
//!
//! Versioned hosts encode the major version in a path segment:
//!
//! | Import path             | Remote                          | Branch |
//! |-------------------------|---------------------------------|--------|
//! | `host/pkg.v3`           | `https://host/go-pkg/pkg`       | `v3`   |
//! | `host/user/pkg.v3/sub`  | `https://host/user/pkg`         | `v3`   |
//!
//! Version tokens are `v<N>`, `v<N>.<N>` or `v<N>.<N>.<N>`.

use regex::Regex;
use std::sync::LazyLock;

use super::{Rewrite, RewriteRule, segments};
use crate::config::GenericRule;

static VERSIONED_SEGMENT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(.+)\.(v\d+(?:\.\d+){0,2})$").ok());

/// Split a path segment such as `yaml.v2` into `("yaml", "v2")`.
///
/// The version is the last `.v<N>` token; everything before it is the
/// package name, dots included (`go.uuid.v1` gives `("go.uuid", "v1")`).
/// Returns `None` for segments without a version token.
pub fn split_versioned_segment(segment: &str) -> Option<(&str, &str)> {
    let caps = VERSIONED_SEGMENT.as_ref()?.captures(segment)?;
    let package = caps.get(1)?.as_str();
    let version = caps.get(2)?.as_str();
    Some((package, version))
}

impl GenericRule {
    /// `host/pkg.vN/...` to `https://host/go-pkg/pkg` on branch `vN`, falling
    /// back to the `host/user/pkg.vN` convention.
    fn versioned_rewrite(&self, remote: &str) -> Option<Rewrite> {
        if !self.versioned || self.package.is_empty() || !remote.contains(&self.package) {
            return None;
        }

        let substituted = remote.replace(&self.package, &self.repo);
        let segs = segments(&substituted);
        if segs.len() < 2 {
            return None;
        }

        if let Some((pkg, version)) = split_versioned_segment(segs[1]) {
            return Some(Rewrite::with_branch(
                format!("https://{}/go-{pkg}/{pkg}", segs[0]),
                version,
            ));
        }

        user_package_rewrite(&segs)
    }

    /// Plain substitution reduced to `https://<s0>/<s1>/<s2>`.
    fn substitution_rewrite(&self, remote: &str) -> Option<Rewrite> {
        if self.package.is_empty() || !remote.contains(&self.package) {
            return None;
        }

        let substituted = remote.replace(&self.package, &self.repo);
        let segs = segments(&substituted);
        if segs.len() < 3 {
            return None;
        }
        Some(Rewrite::remote(format!("https://{}/{}/{}", segs[0], segs[1], segs[2])))
    }
}

/// `host/user/pkg.vN/...` to `https://host/user/pkg` on branch `vN`.
fn user_package_rewrite(segs: &[&str]) -> Option<Rewrite> {
    if segs.len() < 3 {
        return None;
    }
    let (pkg, version) = split_versioned_segment(segs[2])?;
    Some(Rewrite::with_branch(format!("https://{}/{}/{pkg}", segs[0], segs[1]), version))
}

impl RewriteRule for GenericRule {
    fn category(&self) -> &'static str {
        if self.versioned { "versioned" } else { "generic" }
    }

    fn try_rewrite(&self, remote: &str) -> Option<Rewrite> {
        self.versioned_rewrite(remote).or_else(|| self.substitution_rewrite(remote))
    }
}
