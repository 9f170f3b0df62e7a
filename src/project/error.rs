//! Error types for loading documents, type models and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a workspace from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// IO error during read.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed type model or configuration.
    #[error("JSON error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The workspace root does not exist or is not a directory.
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// A file that is neither a def document nor a type model.
    #[error("Unsupported file extension: {}", .0.display())]
    UnsupportedExtension(PathBuf),

    /// Some files of a batch failed; the rest were loaded.
    #[error("Failed to load {} file(s)", .0.len())]
    Several(Vec<LoadError>),
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
