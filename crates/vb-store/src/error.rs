//! Store and storage error types.
//!
//! Most storage failures never reach a caller: the store absorbs them and
//! records them for diagnostics. These types surface only where a caller
//! explicitly asks for the result (flushing, saving the theme, backend tests).

use std::path::PathBuf;
use thiserror::Error;

/// Storage adapter error.
#[derive(Debug, Error)]
pub enum StorageError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete write to {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot could not be serialized.
    #[error("Failed to serialize snapshot")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Backend refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save your board to {}. Your changes are kept for this session.",
                    target_path.display()
                )
            }
            Self::Serialization { .. } => {
                "An error occurred while preparing your board for saving.".to_string()
            }
            Self::Unavailable(reason) => format!("Local storage is unavailable: {reason}"),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the data directory is readable.".into())
                } else {
                    Some("Check that you have permission to write to the data directory.".into())
                }
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or choose a different data directory.".into())
            }
            Self::Serialization { .. } => None,
            Self::Unavailable(_) => Some("Try again later.".into()),
        }
    }
}

/// Store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The id is not part of the current registry.
    #[error("Module not found: {0}")]
    UnknownModule(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
