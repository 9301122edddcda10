//! Picture resolution error types.

use thiserror::Error;

use super::CatalogError;

/// Resolution error variants.
///
/// `Clone` so one outcome can be shared by every caller awaiting the same name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ResolveError {
    #[error("image not found in catalog: {key}")]
    NotFound { key: String },

    #[error("failed to load {key}: {message}")]
    LoadFailure { key: String, message: String },

    #[error("catalog loader panicked while loading {key}")]
    LoaderPanicked { key: String },
}

impl ResolveError {
    /// Creates not found error.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Creates load failure error from a catalog error.
    #[must_use]
    pub fn load_failure(key: impl Into<String>, source: &CatalogError) -> Self {
        Self::LoadFailure {
            key: key.into(),
            message: source.to_string(),
        }
    }

    /// Creates loader panicked error.
    #[must_use]
    pub fn loader_panicked(key: impl Into<String>) -> Self {
        Self::LoaderPanicked { key: key.into() }
    }

    /// Returns the catalog key the error refers to.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::NotFound { key } | Self::LoadFailure { key, .. } | Self::LoaderPanicked { key } => {
                key
            }
        }
    }

    /// Returns whether callers observe this as "no picture" rather than an error.
    #[must_use]
    pub const fn is_soft(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::LoadFailure { .. })
    }
}
