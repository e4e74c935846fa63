//! Storage-specific error type.

use greenhouse_domain::error::GreenhouseError;

/// Errors originating from the JSON file storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing a file failed.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// Encoding a snapshot failed.
    #[error("JSON serialization error")]
    Json(#[from] serde_json::Error),
}

impl StorageError {
    /// Convert into a [`GreenhouseError::Storage`] for propagation across
    /// port boundaries.
    #[must_use]
    pub fn into_domain(self) -> GreenhouseError {
        GreenhouseError::Storage(Box::new(self))
    }
}

impl From<StorageError> for GreenhouseError {
    fn from(err: StorageError) -> Self {
        err.into_domain()
    }
}
