//! Error types for run-sql.
//!
//! Fatal errors abort a run before any statement is sent. Per-statement
//! failures are not errors at this level; they are recorded as
//! [`crate::runner::ExecutionResult`] values.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for run-sql operations.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// The SQL script could not be read (missing, unreadable, not UTF-8).
    #[error("Cannot read {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors (invalid config file, missing URL or key, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level request failures (timeout, DNS, connection refused).
    #[error("{0}")]
    Transport(String),

    /// OS keyring errors.
    #[error("Secret storage error: {0}")]
    Secrets(String),
}

impl RunnerError {
    /// Creates a file access error for the given path.
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a transport error with the given message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates a secret storage error with the given message.
    pub fn secrets(msg: impl Into<String>) -> Self {
        Self::Secrets(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::FileAccess { .. } => "File Error",
            Self::Config(_) => "Configuration Error",
            Self::Transport(_) => "Request Error",
            Self::Secrets(_) => "Secret Storage Error",
        }
    }
}

/// Result type alias using RunnerError.
pub type Result<T> = std::result::Result<T, RunnerError>;
