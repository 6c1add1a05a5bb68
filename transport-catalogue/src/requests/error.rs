//! Error types for request document processing.

use crate::domain::CatalogueError;
use crate::router::SettingsError;

/// Error returned when a request document cannot be processed.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Document could not be read
    #[error("failed to read request document: {0}")]
    Io(#[from] std::io::Error),

    /// Document is not valid JSON or does not match the expected shape
    #[error("malformed request document: {0}")]
    Json(#[from] serde_json::Error),

    /// A base request conflicts with the network built so far
    #[error("invalid base request: {0}")]
    Catalogue(#[from] CatalogueError),

    /// Routing settings are out of range
    #[error("invalid routing settings: {0}")]
    Settings(#[from] SettingsError),
}
