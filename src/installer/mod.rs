//! Dependency installation and the update pipeline.
//!
//! The update pipeline ([`run_update`]) is independent of how dependencies are
//! actually fetched. It drives a [`DependencyInstaller`] through a fixed
//! sequence of steps, merges the results and produces the lock file:
//!
//! ```text
//! acquire cache lock
//!   └─ checkout ─ set_reference            (configuration as declared)
//!       └─ update ─ set_reference          (working copy, unless --skip-recursive)
//!           └─ dedupe ─ export ─ reconcile
//!               └─ hash ─ build lock ─ write if fingerprint changed
//!                   └─ strip_vendor        (with --strip-vendor)
//! ```
//!
//! [`RemoteInstaller`] is the default installer: it canonicalizes remotes with
//! the [`RewriteEngine`](crate::rewrite::RewriteEngine), checks that they are
//! reachable and resolves pins against remote tags.

mod remote;
mod update;


pub use remote::RemoteInstaller;
pub use update::{LockStatus, UpdateOptions, UpdateReport, run_update};

use anyhow::Result;
use std::future::Future;

use crate::manifest::Configuration;

/// The collaborator that fetches and resolves dependencies for the update pipeline.
///
/// Each step receives the configuration it should act on. Errors from
/// `checkout`, `update` and `export` abort the update; an error from the second
/// `set_reference` pass and from `strip_vendor` is logged and the update
/// continues.
pub trait DependencyInstaller: Sync {
    /// Fetch the declared dependencies.
    fn checkout(&self, config: &Configuration) -> impl Future<Output = Result<()>> + Send;

    /// Resolve dependencies recursively, adding discovered imports to `config`.
    fn update(&self, config: &mut Configuration) -> impl Future<Output = Result<()>> + Send;

    /// Fill in the `reference` of imports that do not have one yet.
    fn set_reference(&self, config: &mut Configuration)
    -> impl Future<Output = Result<()>> + Send;

    /// Place the resolved dependencies where the project consumes them.
    fn export(&self, config: &Configuration) -> impl Future<Output = Result<()>> + Send;

    /// Remove vendor directories nested inside exported dependencies.
    fn strip_vendor(&self) -> impl Future<Output = Result<()>> + Send {
        async { Ok(()) }
    }
}
