//! Batch picture resolution use case.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, info};

use crate::application::dto::{PictureOutcome, ResolvedPicture};
use crate::application::services::PictureCache;

/// Resolves several names concurrently through one shared cache.
pub struct ResolvePicturesUseCase {
    cache: Arc<PictureCache>,
}

impl ResolvePicturesUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(cache: Arc<PictureCache>) -> Self {
        Self { cache }
    }

    /// Resolves every name, preserving request order.
    ///
    /// Duplicate names share a single catalog load.
    pub async fn execute(&self, names: &[String]) -> Vec<ResolvedPicture> {
        debug!(count = names.len(), "Resolving pictures");

        let results = join_all(names.iter().map(|name| async move {
            let outcome = match self.cache.resolve(name).await {
                Ok(Some(picture)) => PictureOutcome::Resolved { picture },
                Ok(None) => PictureOutcome::Missing,
                Err(e) => PictureOutcome::Failed {
                    message: e.to_string(),
                },
            };
            ResolvedPicture::new(name.clone(), outcome)
        }))
        .await;

        let resolved = results
            .iter()
            .filter(|r| r.outcome.picture().is_some())
            .count();
        info!(
            requested = names.len(),
            resolved = resolved,
            "Picture resolution finished"
        );
        results
    }
}
