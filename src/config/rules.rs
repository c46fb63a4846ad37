//! Remote rewrite and subpackage rule tables.
//!
//! These types are the `[rewrite]` section of the global configuration. Each
//! array corresponds to one rule category; an absent array disables the
//! category. Rule order inside an array is significant: the first rule that
//! changes a remote wins.
//!
//! ```toml
//! [rewrite]
//! versioned_host = "gopkg.in/"
//!
//! [[rewrite.ssh]]
//! old_url = "code.acme.com"
//!
//! [[rewrite.fix]]
//! old_url = "legacy.acme.com"
//! new_url = "github.com/acme"
//! xfix = "-legacy"
//!
//! [[rewrite.many_to_one]]
//! old_url = "golang.org/x/"
//! old_paths = ["net", "sys"]
//! new_url = "github.com/golang"
//!
//! [[rewrite.one_to_many]]
//! old_url = "k8s.io"
//! new_url = "github.com/kubernetes"
//! new_paths = ["client-go", "apimachinery"]
//!
//! [[rewrite.generic]]
//! package = "gopkg.in/yaml"
//! repo = "github.com/go-yaml/yaml"
//! rule = true
//!
//! [[rewrite.subpackage]]
//! index = 3
//! markers = ["github.com/", "bitbucket.org/"]
//! ```

use serde::{Deserialize, Serialize};

fn default_ssh_user() -> String {
    "git".to_string()
}

/// Rewrite a host-qualified path to an scp-style SSH remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshRule {
    /// Host fragment that selects this rule.
    pub old_url: String,

    /// Login user placed before `@`.
    #[serde(default = "default_ssh_user")]
    pub user: String,
}

/// Rename a repository by adding a prefix or suffix to its second segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixRule {
    pub old_url: String,
    pub new_url: String,

    /// Suffix when it starts with `-`, prefix when it ends with `-`.
    pub xfix: String,
}

/// Collapse several paths under one host onto a single new host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManyToOneRule {
    pub old_url: String,
    #[serde(default)]
    pub old_paths: Vec<String>,
    pub new_url: String,
}

/// Fan one host out to several repositories on a new host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneToManyRule {
    pub old_url: String,
    pub new_url: String,
    #[serde(default)]
    pub new_paths: Vec<String>,
}

/// Package substitution, optionally aware of versioned import paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericRule {
    /// Fragment to replace.
    pub package: String,

    /// Replacement for `package`.
    pub repo: String,

    /// Enables versioned substitution (`host/pkg.vN` to `host/go-pkg/pkg` on branch `vN`).
    #[serde(default, alias = "rule")]
    pub versioned: bool,
}

/// Split nested import paths at a fixed segment index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubpackageRule {
    /// Number of leading segments that form the repository root.
    pub index: usize,

    /// Fragments that select this rule.
    #[serde(default)]
    pub markers: Vec<String>,
}

/// All rule categories, in the order they are consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ssh: Vec<SshRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fix: Vec<FixRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub many_to_one: Vec<ManyToOneRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub one_to_many: Vec<OneToManyRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic: Vec<GenericRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subpackage: Vec<SubpackageRule>,

    /// Host whose paths embed the major version. Defaults to `gopkg.in/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versioned_host: Option<String>,
}

impl RewriteConfig {
    /// The configured versioned host, or the built-in default.
    #[must_use]
    pub fn versioned_host(&self) -> &str {
        self.versioned_host
            .as_deref()
            .filter(|h| !h.is_empty())
            .unwrap_or(crate::constants::DEFAULT_VERSIONED_HOST)
    }

    /// True when no rewrite category has any rule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ssh.is_empty()
            && self.fix.is_empty()
            && self.many_to_one.is_empty()
            && self.one_to_many.is_empty()
            && self.generic.is_empty()
    }
}
