//! Core types for depot
//!
//! This module holds the error taxonomy shared by every other module.
//!
//! # Error Management
//!
//! - **Strongly-typed errors** ([`DepotError`]) for precise error handling in code
//! - **User-friendly contexts** ([`ErrorContext`]) with actionable suggestions for CLI users
//! - **Automatic conversion** from I/O and TOML errors
//!
//! Operations return [`anyhow::Result`] and attach context with `.context()`;
//! the CLI entry point converts the final error with [`user_friendly_error`].

pub mod error;

pub use error::{DepotError, ErrorContext, user_friendly_error};
