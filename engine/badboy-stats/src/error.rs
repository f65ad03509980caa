//! Error types for bad boy scoring

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bad boy operations
pub type Result<T> = std::result::Result<T, BadBoyError>;

/// Errors that can occur while building or serving bad boy data
#[derive(Error, Debug)]
pub enum BadBoyError {
    /// I/O errors (snapshot and resource files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Offline run requested without previously saved data
    #[error("no cached bad boy data at {0}; run online with saving enabled before going offline")]
    MissingOfflineData(PathBuf),

    /// Failure propagated unchanged from the arrest data fetch
    #[error(transparent)]
    Fetch(#[from] anyhow::Error),
}
