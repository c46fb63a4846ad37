//! Cross-platform utilities shared across depot.
//!
//! - [`fs`] - atomic writes and directory creation
//! - [`platform`] - platform detection and git executable lookup

pub mod fs;
pub mod platform;

pub use fs::{atomic_write, ensure_dir, safe_write};
