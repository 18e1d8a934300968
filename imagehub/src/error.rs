//! Error types for Image Hub
//!
//! All errors use thiserror for structured error handling.
//! Store failures are split by the operation that raised them so a UI
//! shell can tell an unavailable database from an aborted write.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[source] sqlx::Error),

    #[error("Write failed: {0}")]
    WriteFailed(#[source] sqlx::Error),

    #[error("Read failed: {0}")]
    ReadFailed(#[source] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image not found: {0}")]
    ImageNotFound(i64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Generic(String),
}

impl serde::Serialize for HubError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HubError>;
