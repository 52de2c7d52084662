//! Error types for indexing operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the few genuinely fallible operations (snapshot
/// persistence, CLI plumbing). Per-file failures during a scan are never
/// errors; they surface as [`IndexWarning`] values on the outcome.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Snapshot serialization failed.
    #[error("Snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl IndexError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Scan root was missing or not a directory.
    InvalidRoot,
    /// Error listing a directory.
    ListError,
    /// Error reading file metadata.
    MetadataError,
    /// No preview could be produced for a supported file.
    PreviewFailed,
    /// Snapshot write failed.
    PersistError,
    /// An external tool invocation failed or produced no usable output.
    ExternalTool,
}

/// Non-fatal warning collected during a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl IndexWarning {
    /// Create a new warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a warning for an unlistable directory.
    pub fn list_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        Self {
            message: format!("Failed to list directory: {error}"),
            path,
            kind: WarningKind::ListError,
        }
    }

    /// Create a warning for a supported file with no producible preview.
    pub fn preview_failed(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("No preview could be produced: {}", path.display()),
            path,
            kind: WarningKind::PreviewFailed,
        }
    }

    /// Create a warning for an invalid scan root.
    pub fn invalid_root(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Not an existing directory: {}", path.display()),
            path,
            kind: WarningKind::InvalidRoot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_error_io() {
        let err = IndexError::io(
            "/photos/album",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, IndexError::PermissionDenied { .. }));

        let err = IndexError::io(
            "/photos/missing",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, IndexError::NotFound { .. }));
    }

    #[test]
    fn test_warning_creation() {
        let warning = IndexWarning::invalid_root("/nope");
        assert_eq!(warning.kind, WarningKind::InvalidRoot);
        assert!(warning.message.contains("Not an existing directory"));

        let warning = IndexWarning::preview_failed("/photos/broken.jpg");
        assert_eq!(warning.kind, WarningKind::PreviewFailed);
    }
}
