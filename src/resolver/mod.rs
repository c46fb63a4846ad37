//! Post-resolution processing of a configuration.
//!
//! After the installer has resolved a working copy of the configuration, two
//! steps turn it into something lockable:
//!
//! 1. **Merging** ([`merge`]): recursive discovery produces one entry per
//!    nested import path folded onto its repository. [`dedupe_imports`]
//!    collapses entries that share a name, unioning their subpackages and
//!    keeping the last non-empty reference. [`reconcile_references`] then
//!    shares references between primary and development lists when both
//!    sides declare the same pin.
//! 2. **Locking** ([`lockfile_builder`]): [`LockfileBuilder`] hashes the
//!    configuration as declared and builds a [`LockFile`](crate::lockfile::LockFile)
//!    from the merged lists; [`write_if_changed`] persists it only when its
//!    fingerprint differs from the lock already on disk.
//!
//! Both steps are synchronous and operate on in-memory data only, apart from
//! the final write.

pub mod lockfile_builder;
pub mod merge;

pub use lockfile_builder::{LockWriteOutcome, LockfileBuilder, write_if_changed};
pub use merge::{dedupe_imports, reconcile_references};
