//! Host-level rewrite rules: SSH, fix, many-to-one and one-to-many.

use super::{Rewrite, RewriteRule, https_join, segments};
use crate::config::{FixRule, ManyToOneRule, OneToManyRule, SshRule};
use crate::constants::PATH_SEPARATOR;

impl RewriteRule for SshRule {
    fn category(&self) -> &'static str {
        "ssh"
    }

    /// `host/owner/repo/...` becomes `<user>@git.host:owner/repo.git`.
    fn try_rewrite(&self, remote: &str) -> Option<Rewrite> {
        if self.old_url.is_empty() || !remote.contains(&self.old_url) {
            return None;
        }
        let segs = segments(remote);
        if segs.len() < 3 {
            return None;
        }
        Some(Rewrite::remote(format!(
            "{}@git.{}:{}/{}.git",
            self.user, segs[0], segs[1], segs[2]
        )))
    }
}

impl RewriteRule for FixRule {
    fn category(&self) -> &'static str {
        "fix"
    }

    fn try_rewrite(&self, remote: &str) -> Option<Rewrite> {
        if self.old_url.is_empty() || !remote.contains(&self.old_url) {
            return None;
        }
        let segs = segments(remote);
        if segs.len() < 2 {
            return None;
        }
        let name = segs[1];

        let repo = if self.xfix.starts_with('-') {
            format!("{name}{}", self.xfix)
        } else if self.xfix.ends_with('-') {
            format!("{}{name}", self.xfix)
        } else {
            return None;
        };
        Some(Rewrite::remote(https_join(&self.new_url, &repo)))
    }
}

impl RewriteRule for ManyToOneRule {
    fn category(&self) -> &'static str {
        "many-to-one"
    }

    fn try_rewrite(&self, remote: &str) -> Option<Rewrite> {
        self.old_paths.iter().find_map(|old_path| {
            let repo = format!("{}{}", self.old_url, old_path);
            if repo.is_empty() || !remote.contains(&repo) {
                return None;
            }
            let last = repo.rsplit(PATH_SEPARATOR).next().unwrap_or(&repo);
            Some(Rewrite::remote(https_join(&self.new_url, last)))
        })
    }
}

impl RewriteRule for OneToManyRule {
    fn category(&self) -> &'static str {
        "one-to-many"
    }

    fn try_rewrite(&self, remote: &str) -> Option<Rewrite> {
        if self.old_url.is_empty() || !remote.contains(&self.old_url) {
            return None;
        }

        if let Some(path) =
            self.new_paths.iter().find(|path| remote.contains(&format!("{}{}", self.old_url, path)))
        {
            return Some(Rewrite::remote(https_join(&self.new_url, path)));
        }

        let segs = segments(remote);
        if segs.len() < 2 || segs[1].is_empty() {
            return None;
        }
        let name = segs[1];

        let path = self.new_paths.iter().find(|path| path.contains(name))?;
        let leading = path.split(PATH_SEPARATOR).next().unwrap_or(path);

        // Only the package segment is renamed; the host and deeper segments
        // may contain the same text.
        let mut renamed = segs;
        renamed[1] = leading;
        let rewritten = renamed.join("/").replacen(&self.old_url, &self.new_url, 1);
        Some(Rewrite::remote(format!("https://{rewritten}")))
    }
}
