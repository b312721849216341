//! Result and error types for the core library

use std::path::PathBuf;

use thiserror::Error;

/// Core library error type
///
/// Parse and exchange errors are fatal to the operation that raised them.
/// Provider-signalled errors never show up here: they travel as data inside
/// [`FetchResult`](crate::domain::FetchResult).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed access URL: {0}")]
    MalformedUrl(String),

    #[error("Invalid setup token: {0}")]
    InvalidSetupToken(String),

    #[error("Failed to claim setup token: {0}")]
    ClaimFailed(String),

    #[error("SimpleFIN authentication failed: {0}")]
    Authentication(String),

    #[error("SimpleFIN provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Malformed SimpleFIN response: {0}")]
    MalformedResponse(String),

    #[error("Failed to export {}: {message}", path.display())]
    ExportWrite { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a malformed URL error
    pub fn malformed_url(msg: impl Into<String>) -> Self {
        Self::MalformedUrl(msg.into())
    }

    /// Create a malformed response error
    pub fn malformed_response(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create an export error for a specific output path
    pub fn export_write(path: impl Into<PathBuf>, msg: impl std::fmt::Display) -> Self {
        Self::ExportWrite {
            path: path.into(),
            message: msg.to_string(),
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
