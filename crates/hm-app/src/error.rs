//! Error types for the hm-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// provides one error interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read table: {path}")]
    TableRead {
        path: PathBuf,
        source: csv::Error,
    },

    #[error("Failed to write table: {path}")]
    TableWrite {
        path: PathBuf,
        source: csv::Error,
    },

    #[error("Malformed table {path}: {message}")]
    TableShape { path: PathBuf, message: String },

    #[error("Failed to read manifest: {path}")]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid manifest: {0}")]
    Manifest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Calculation error: {0}")]
    Calculation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for hm-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<hm_config::ConfigError> for AppError {
    fn from(err: hm_config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<hm_calc::CalcError> for AppError {
    fn from(err: hm_calc::CalcError) -> Self {
        match err {
            hm_calc::CalcError::Config(inner) => inner.into(),
            other => AppError::Calculation(other.to_string()),
        }
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Manifest(err.to_string())
    }
}
