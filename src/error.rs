//! Application error types.

use thiserror::Error;

/// Application-level errors for Curricula.
#[derive(Error, Debug)]
pub enum AppError {
    // Store errors
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Permission denied: write to '{0}' is not allowed")]
    PermissionDenied(String),

    #[error("Failed to deserialize field '{field}' of '{path}': {message}")]
    InvalidField {
        path: String,
        field: String,
        message: String,
    },

    // Snapshot errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Shorthand for an [`AppError::InvalidPath`].
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
