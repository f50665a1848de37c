// src/error.rs

use thiserror::Error;

/// Core error types for branchdiff
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client construction error
    #[error("Failed to initialize HTTP client: {0}")]
    InitError(String),

    /// Branch export fetch failure (transport error or non-success status)
    #[error("Failed to fetch branch '{branch}': {reason}")]
    Fetch { branch: String, reason: String },

    /// A package participating in the version comparison lacks a required field
    #[error("Package '{package}' in branch '{branch}' is missing field '{field}'")]
    MissingField {
        package: String,
        branch: String,
        field: &'static str,
    },
}

/// Result type alias using branchdiff's Error type
pub type Result<T> = std::result::Result<T, Error>;
