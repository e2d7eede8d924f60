//! Error and warning types for notein
//!
//! Validation failures (`InvalidPath`, `InvalidName`, `InvalidState`) are
//! raised before anything is touched on disk. `Io` always carries the path the
//! failing operation was working on.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using notein's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by workspace, category and note operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or non-relative path
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// Rename target is not a legal file name
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// Underlying filesystem operation failed
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Referenced file or directory does not exist
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// Attribute line that cannot be stored in an attribute block
    #[error("Invalid attribute '{attribute}': {reason}")]
    InvalidAttribute {
        attribute: String,
        reason: &'static str,
    },

    /// Operation needs state the object does not have (e.g. an unbound note)
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),

    /// Configuration file is not valid TOML for `WorkspaceConfig`
    #[error("Invalid config '{}': {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration could not be serialized
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Wrap an I/O error, mapping `NotFound` to `PathNotFound`.
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Error::PathNotFound(path)
        } else {
            Error::Io { path, source }
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Non-fatal conditions reported while traversing a workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A directory was reached a second time (typically through a symlink)
    /// and was skipped.
    CycleDetected {
        /// Workspace-relative path of the skipped entry
        path: PathBuf,
        /// Canonical directory it resolved to
        target: PathBuf,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::CycleDetected { path, target } => write!(
                f,
                "Cycle detected: '{}' resolves to already visited '{}'",
                path.display(),
                target.display()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_maps_not_found() {
        let err = Error::from_io("a/b.md", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, Error::PathNotFound(ref p) if p == &PathBuf::from("a/b.md")));
    }

    #[test]
    fn test_from_io_keeps_other_kinds() {
        let err = Error::from_io("a", io::Error::from(io::ErrorKind::PermissionDenied));
        match err {
            Error::Io { path, source } => {
                assert_eq!(path, PathBuf::from("a"));
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = Error::InvalidName {
            name: "a/b".to_string(),
            reason: "contains a path separator",
        };
        assert_eq!(err.to_string(), "Invalid name 'a/b': contains a path separator");

        let err = Error::InvalidState("note has no path");
        assert_eq!(err.to_string(), "Invalid state: note has no path");
    }

    #[test]
    fn test_invalid_attribute_display() {
        let err = Error::InvalidAttribute {
            attribute: "---".to_string(),
            reason: "closes the attribute block",
        };
        assert_eq!(
            err.to_string(),
            "Invalid attribute '---': closes the attribute block"
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = Warning::CycleDetected {
            path: PathBuf::from("a/loop"),
            target: PathBuf::from("/ws/a"),
        };
        assert_eq!(
            warning.to_string(),
            "Cycle detected: 'a/loop' resolves to already visited '/ws/a'"
        );
    }
}
