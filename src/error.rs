//! Custom error types for bkpfile
//!
//! This module defines the error hierarchy for the library using thiserror.
//! Filesystem failures keep their `io::Error` so callers can still classify
//! them (permission denied, disk full) after context has been attached.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for bkpfile operations
#[derive(Error, Debug)]
pub enum BkpfileError {
    /// An existing configuration file could not be read
    #[error("failed to read config file {}: {source}", .path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    /// A configuration file is not valid YAML or holds a value of the wrong type
    #[error("failed to parse config file {}: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// A filesystem operation failed on a specific path
    #[error("failed to {action} {}: {source}", .path.display())]
    File {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    /// A path could not be resolved against the working directory
    #[error("failed to resolve path {}: {source}", .path.display())]
    PathResolution { path: PathBuf, source: io::Error },

    /// Any other I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl BkpfileError {
    /// Attach an action and path to an I/O error
    pub fn file(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::File {
            action,
            path: path.into(),
            source,
        }
    }

    /// The wrapped I/O error, without the path context added around it
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::ConfigRead { source, .. }
            | Self::File { source, .. }
            | Self::PathResolution { source, .. } => Some(source),
            Self::Io(err) => Some(err),
            Self::ConfigParse { .. } => None,
        }
    }

    /// The underlying I/O error kind, if this error wraps one
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        self.io_error().map(io::Error::kind)
    }

    /// Check if this error was caused by missing permissions
    pub fn is_permission_denied(&self) -> bool {
        self.io_kind() == Some(io::ErrorKind::PermissionDenied)
    }

    /// Check if this error was caused by a missing file or directory
    pub fn is_not_found(&self) -> bool {
        self.io_kind() == Some(io::ErrorKind::NotFound)
    }

    /// Check if this is a configuration parse error
    pub fn is_config_parse(&self) -> bool {
        matches!(self, Self::ConfigParse { .. })
    }
}

/// Result type alias for bkpfile operations
pub type BkpfileResult<T> = Result<T, BkpfileError>;
