//! Errors raised by the services behind project actions.

use crate::model::ProviderType;
use thiserror::Error;

/// Result type alias for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Failure of an external service call.
///
/// Project actions never recover from these: the error is returned to the
/// caller unchanged and no action is dispatched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The requested project or asset does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The storage backend rejected the operation.
    #[error("Storage error: {0}")]
    Storage(String),

    /// No export provider is registered for the project's provider type.
    #[error("No export provider registered for {0}")]
    UnknownExportProvider(ProviderType),

    /// The export provider failed while writing output.
    #[error("Export failed: {0}")]
    Export(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// General I/O error.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for ServiceError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}
