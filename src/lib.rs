//! depot - dependency merge, lock generation and remote rewriting
//!
//! depot maintains the lock file of a vendoring package manager. A project
//! declares its imports in `depot.toml`; an update resolves them against their
//! canonical remotes, merges the duplicates discovered while resolving
//! recursively and writes `depot.lock` only when the resolution changed.
//!
//! # Architecture Overview
//!
//! - `depot.toml` declares imports and development imports with optional pins
//! - `depot.lock` records the resolved reference of every import plus a hash of
//!   the declaring configuration
//! - Remotes are canonicalized by user-configured rewrite rules kept in the
//!   global configuration (`~/.depot/config.toml`)
//! - Remote tags are listed with the system `git` binary
//!
//! # Core Modules
//!
//! ## Update Pipeline
//! - [`installer`] - The update pipeline and the collaborator trait it drives
//! - [`resolver`] - Duplicate merging, reference reconciliation and lock building
//! - [`lockfile`] - Lock file format, fingerprinting and atomic persistence
//! - [`manifest`] - Manifest parsing and configuration hashing
//!
//! ## Remotes
//! - [`rewrite`] - Rewrite rule engine and subpackage splitter
//! - [`git`] - Git command builder and the tag stream fetcher
//!
//! ## Supporting Modules
//! - [`cache`] - Cache directory and the cross-process update lock
//! - [`cli`] - Command-line interface
//! - [`config`] - Global configuration and rewrite rule definitions
//! - [`core`] - Error types and user-facing error formatting
//! - [`utils`] - File system and platform helpers
//!
//! # Manifest Format (depot.toml)
//!
//! ```toml
//! package = "example.com/acme/service"
//!
//! [[import]]
//! name = "github.com/acme/log"
//! version = "v1.4.0"
//! subpackages = ["hooks"]
//!
//! [[import]]
//! name = "gopkg.in/yaml.v2"
//!
//! [[dev_import]]
//! name = "github.com/acme/testkit"
//! repo = "https://mirror.example.com/testkit"
//! ```
//!
//! # Rewrite Rules (~/.depot/config.toml)
//!
//! ```toml
//! [rewrite]
//! versioned_host = "gopkg.in/"
//!
//! [[rewrite.ssh]]
//! old_url = "git.corp.example.com"
//!
//! [[rewrite.fix]]
//! old_url = "legacy.example.com"
//! new_url = "github.com/acme-archive"
//! xfix = "-legacy"
//!
//! [[rewrite.generic]]
//! package = "gopkg.in"
//! repo = "github.com"
//! versioned = true
//! ```
//!
//! Categories are tried in a fixed order (ssh, fix, many-to-one, one-to-many,
//! generic) and the first rule producing a different remote wins.

pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod git;
pub mod installer;
pub mod lockfile;
pub mod manifest;
pub mod resolver;
pub mod rewrite;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
