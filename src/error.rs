//! Error types for the CoreMark-PRO plugin.
//!
//! Every failure that terminates a step is represented here. A benchmark run
//! that exits non-zero is *not* an error in this sense: it is reported to the
//! workflow as an `ErrorOutput` (see [`crate::schema::ErrorOutput`]).

use std::borrow::Borrow;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the plugin.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid step input
    #[error("Validation error: {message}")]
    Validation {
        /// Detailed error message
        message: String,
        /// Field that caused the error, if applicable
        field: Option<String>,
    },

    /// Malformed benchmark log or benchmark output
    #[error("Parse error{}: {message}", at_line(.line))]
    Parse {
        /// Detailed error message
        message: String,
        /// Line number (1-based) where the error occurred, if applicable
        line: Option<usize>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Detailed error message
        message: String,
        /// Configuration key that caused the error
        key: Option<String>,
    },

    /// Failure reading or writing one of the benchmark's files
    #[error("Cannot access {}: {source}", .path.display())]
    FileAccess {
        /// File that could not be accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Internal error (unexpected condition)
    #[error("Internal error: {message}")]
    Internal {
        /// Detailed error message
        message: String,
    },
}

impl Error {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a validation error with field context.
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse {
            message: message.into(),
            line: None,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: None,
        }
    }

    /// Create a configuration error for a specific key.
    pub fn config_key(message: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Create a file access error.
    pub fn file_access(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::FileAccess {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }

    /// Get the error category for structured logs.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Validation { .. } => "validation",
            Error::Parse { .. } => "parse",
            Error::Config { .. } => "config",
            Error::FileAccess { .. } => "file_access",
            Error::Io(_) => "io",
            Error::Serialization(_) => "serialization",
            Error::Yaml(_) => "yaml",
            Error::Internal { .. } => "internal",
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::config(err.to_string())
    }
}

fn at_line<L: Borrow<Option<usize>>>(line: L) -> String {
    match line.borrow() {
        Some(line) => format!(" at line {line}"),
        None => String::new(),
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Add field context to validation errors.
    fn with_field(self, field: impl Into<String>) -> Result<T>;

    /// Add a line number to parse errors that do not carry one yet.
    fn with_line(self, line: usize) -> Result<T>;
}

impl<T> ErrorContext<T> for Result<T> {
    fn with_field(self, field: impl Into<String>) -> Result<T> {
        self.map_err(|e| match e {
            Error::Validation { message, .. } => Error::Validation {
                message,
                field: Some(field.into()),
            },
            other => other,
        })
    }

    fn with_line(self, line: usize) -> Result<T> {
        self.map_err(|e| match e {
            Error::Parse {
                message,
                line: None,
            } => Error::Parse {
                message,
                line: Some(line),
            },
            other => other,
        })
    }
}
