//! Picture resolution DTOs.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::PictureSourceSet;

/// Outcome of resolving one requested name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PictureOutcome {
    /// The picture resolved.
    Resolved {
        /// Browser-ready descriptor.
        picture: Arc<PictureSourceSet>,
    },
    /// Nothing in the catalog, or the loader failed.
    Missing,
    /// Resolution raised an error.
    Failed {
        /// Error message.
        message: String,
    },
}

impl PictureOutcome {
    /// Returns the picture if resolved.
    #[must_use]
    pub fn picture(&self) -> Option<&Arc<PictureSourceSet>> {
        match self {
            Self::Resolved { picture } => Some(picture),
            _ => None,
        }
    }
}

/// A requested name with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPicture {
    /// Logical name as requested.
    pub name: String,
    /// What the cache produced.
    #[serde(flatten)]
    pub outcome: PictureOutcome,
}

impl ResolvedPicture {
    /// Creates a resolved entry.
    #[must_use]
    pub fn new(name: impl Into<String>, outcome: PictureOutcome) -> Self {
        Self {
            name: name.into(),
            outcome,
        }
    }
}
