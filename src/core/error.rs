//! Error handling for depot
//!
//! This module provides the error types and user-facing error reporting for depot.
//! The error system follows two principles:
//! 1. **Strongly-typed errors** for precise handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`DepotError`] - Enumerated error types for the failure cases of depot
//! - [`ErrorContext`] - Wrapper that adds suggestions and details for display
//!
//! # Error Categories
//!
//! - **Git Operations**: [`DepotError::GitNotFound`], [`DepotError::GitCommandError`]
//! - **Configuration**: [`DepotError::ConfigError`], [`DepotError::ManifestNotFound`],
//!   [`DepotError::ManifestParseError`], [`DepotError::LockfileParseError`]
//! - **Dependencies**: [`DepotError::InvalidDependency`]
//! - **Cache**: [`DepotError::LockTimeout`], [`DepotError::FileSystemError`]
//!
//! Standard library and serialization errors convert automatically:
//! - [`std::io::Error`] → [`DepotError::IoError`]
//! - [`toml::de::Error`] → [`DepotError::TomlError`]
//! - [`toml::ser::Error`] → [`DepotError::TomlSerError`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use depot::core::{DepotError, user_friendly_error};
//!
//! fn load() -> anyhow::Result<()> {
//!     Err(DepotError::ManifestNotFound.into())
//! }
//!
//! if let Err(e) = load() {
//!     let ctx = user_friendly_error(e);
//!     ctx.display();
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for depot operations.
///
/// Each variant carries enough context (paths, remotes, reasons) to produce a
/// useful message without consulting the call site.
#[derive(Error, Debug)]
pub enum DepotError {
    /// A git command exited unsuccessfully or timed out.
    #[error("Git operation failed: {operation}")]
    GitCommandError {
        /// The git subcommand that failed (e.g. "ls-remote")
        operation: String,
        /// Captured standard error output
        stderr: String,
    },

    /// The git executable could not be run.
    #[error("Git is not installed or not found in PATH")]
    GitNotFound,

    /// Global or rule configuration is invalid.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// No `depot.toml` in the current directory or any parent.
    #[error("Manifest file depot.toml not found in current directory or any parent directory")]
    ManifestNotFound,

    /// The manifest could not be parsed.
    #[error("Invalid manifest file syntax in {file}")]
    ManifestParseError {
        /// Manifest path
        file: String,
        /// Parser message
        reason: String,
    },

    /// The lock file could not be parsed.
    #[error("Invalid lockfile syntax in {file}")]
    LockfileParseError {
        /// Lock file path
        file: String,
        /// Parser message
        reason: String,
    },

    /// A dependency declaration cannot be locked or resolved.
    #[error("Invalid dependency specification for '{name}': {reason}")]
    InvalidDependency {
        /// Import name (may be empty when the name itself is the problem)
        name: String,
        /// Description of the problem
        reason: String,
    },

    /// A cache lock could not be acquired within its timeout.
    #[error("Timeout acquiring cache lock '{name}' after {timeout_secs}s")]
    LockTimeout {
        /// Lock name
        name: String,
        /// Timeout that elapsed
        timeout_secs: u64,
    },

    /// A filesystem operation failed.
    #[error("File system error: {operation}")]
    FileSystemError {
        /// Operation that failed
        operation: String,
        /// Path involved
        path: String,
    },

    /// Standard I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML deserialization error.
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    /// Any other error, carried as a message.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl Clone for DepotError {
    fn clone(&self) -> Self {
        match self {
            Self::GitCommandError {
                operation,
                stderr,
            } => Self::GitCommandError {
                operation: operation.clone(),
                stderr: stderr.clone(),
            },
            Self::GitNotFound => Self::GitNotFound,
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            Self::ManifestNotFound => Self::ManifestNotFound,
            Self::ManifestParseError {
                file,
                reason,
            } => Self::ManifestParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::LockfileParseError {
                file,
                reason,
            } => Self::LockfileParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::InvalidDependency {
                name,
                reason,
            } => Self::InvalidDependency {
                name: name.clone(),
                reason: reason.clone(),
            },
            Self::LockTimeout {
                name,
                timeout_secs,
            } => Self::LockTimeout {
                name: name.clone(),
                timeout_secs: *timeout_secs,
            },
            Self::FileSystemError {
                operation,
                path,
            } => Self::FileSystemError {
                operation: operation.clone(),
                path: path.clone(),
            },
            // Source errors are not Clone; keep their message
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::TomlSerError(e) => Self::Other {
                message: format!("TOML serialization error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// An error paired with an optional suggestion and details for display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: DepotError,
    /// What the user can do about it
    pub suggestion: Option<String>,
    /// Additional explanation
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error without suggestion or details.
    #[must_use]
    pub const fn new(error: DepotError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with suggestions where the error is recognized.
///
/// Known [`DepotError`] variants, I/O errors and TOML errors get tailored
/// suggestions. Anything else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(depot_error) = error.downcast_ref::<DepotError>() {
        let mut context = create_error_context(depot_error.clone());
        // Keep the outermost context, which says what depot was doing.
        let outer = error.to_string();
        if outer != depot_error.to_string() {
            context.details = Some(match context.details.take() {
                Some(details) => format!("{outer}\n{details}"),
                None => outer,
            });
        }
        return context;
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(DepotError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check file ownership and permissions of the project and cache directories")
                .with_details("depot could not read or write a file it needs");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(DepotError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(DepotError::ManifestParseError {
            file: "depot.toml".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax in your depot.toml file. Verify quotes, brackets, and array tables");
    }

    // Generic error - include the full error chain
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(DepotError::Other {
        message,
    })
}

fn create_error_context(error: DepotError) -> ErrorContext {
    match &error {
        DepotError::GitNotFound => ErrorContext::new(error)
            .with_suggestion("Install git from https://git-scm.com/ or your package manager (e.g., 'brew install git', 'apt install git')")
            .with_details("depot runs the system git to list remote references"),

        DepotError::GitCommandError { operation, stderr } => {
            let suggestion = match operation.as_str() {
                "ls-remote" => "Check the remote URL, your network connection and credentials. Try 'git ls-remote <remote>' manually",
                _ => "Check your git configuration and repository access. Try running the git command manually for more details",
            };
            let details = stderr.trim().to_string();
            let context = ErrorContext::new(error).with_suggestion(suggestion);
            if details.is_empty() {
                context
            } else {
                context.with_details(details)
            }
        }

        DepotError::ManifestNotFound => ErrorContext::new(error)
            .with_suggestion("Create a depot.toml file in your project directory or pass --manifest-path")
            .with_details("depot looks for depot.toml in the current directory and parent directories up to the filesystem root"),

        DepotError::ManifestParseError { file, .. } => {
            let suggestion = format!(
                "Check the TOML syntax in {file}. Imports are declared as [[import]] and [[dev_import]] tables"
            );
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        DepotError::LockfileParseError { .. } => ErrorContext::new(error)
            .with_suggestion("Delete depot.lock and run 'depot update' to regenerate it")
            .with_details("An unreadable lock file is treated as absent during update and rewritten"),

        DepotError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Check the [rewrite] section of ~/.depot/config.toml or the file named by DEPOT_CONFIG_PATH"),

        DepotError::LockTimeout { .. } => ErrorContext::new(error)
            .with_suggestion("Another depot process is updating. Wait for it to finish and retry")
            .with_details("Updates hold an exclusive lock in the cache directory for their whole duration"),

        _ => ErrorContext::new(error),
    }
}
