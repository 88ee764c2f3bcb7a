//! Error types for the ntp-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// gives the CLI a single error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to write output file: {path}")]
    OutputFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ntp-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<ntp_project::ProjectError> for AppError {
    fn from(err: ntp_project::ProjectError) -> Self {
        match err {
            ntp_project::ProjectError::Model(e) => AppError::Model(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<ntp_model::ModelError> for AppError {
    fn from(err: ntp_model::ModelError) -> Self {
        AppError::Model(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
