//! Integration test suite for depot
//!
//! End-to-end tests that run the `depot` binary against temporary projects,
//! local git remotes and isolated cache directories. No network access is
//! needed; tests that require git are skipped when it is not installed.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cache**: `cache path` and `cache clear`
//! - **rewrite**: `rewrite` and `split` with configured rules
//! - **tags**: `tags` against local remotes
//! - **update**: The update pipeline and lock file generation

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cache;
mod rewrite;
mod tags;
mod update;
