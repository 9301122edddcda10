//! Asset catalog error types.

use thiserror::Error;

/// Errors raised by catalog loaders and catalog construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No entry for the key.
    #[error("no catalog entry for {0}")]
    MissingEntry(String),
    /// Failed to read asset metadata.
    #[error("decode error: {0}")]
    Decode(String),
    /// I/O error while reading assets or the manifest.
    #[error("io error: {0}")]
    Io(String),
    /// Loader output does not match the asset kind.
    #[error("unexpected catalog entry: {0}")]
    UnexpectedShape(String),
    /// Manifest could not be parsed.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidManifest(err.to_string())
    }
}
