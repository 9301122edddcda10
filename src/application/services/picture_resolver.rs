//! Resolves logical image names into picture source sets.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::domain::entities::{
    ImageKind, ImageName, PictureSource, PictureSourceSet, RawDescriptor, RawRaster,
    mime_type_for_format,
};
use crate::domain::errors::{CatalogError, ResolveError};
use crate::domain::ports::AssetCatalog;

use super::url_prefixer::UrlPrefixer;

/// Default key prefix under which the catalog registers images.
pub const DEFAULT_CATALOG_ROOT: &str = "images";

/// Fallback format precedence: JPEG, then WebP, then AVIF.
const PRIMARY_FORMAT_PRECEDENCE: &[&[&str]] = &[&["jpeg", "jpg"], &["webp"], &["avif"]];

/// Configuration for the resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Key prefix joined in front of every logical name.
    pub catalog_root: String,
    /// Report misses and loader failures as warnings.
    pub dev_diagnostics: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            catalog_root: DEFAULT_CATALOG_ROOT.to_string(),
            dev_diagnostics: cfg!(debug_assertions),
        }
    }
}

/// Turns catalog entries into prefixed [`PictureSourceSet`]s.
///
/// Stateless apart from its collaborators; memoization lives in
/// [`PictureCache`](super::picture_cache::PictureCache).
pub struct PictureResolver {
    catalog: Arc<dyn AssetCatalog>,
    prefixer: UrlPrefixer,
    config: ResolverConfig,
}

impl std::fmt::Debug for PictureResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PictureResolver")
            .field("prefixer", &self.prefixer)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PictureResolver {
    /// Creates a resolver over the given catalog.
    #[must_use]
    pub fn new(catalog: Arc<dyn AssetCatalog>, prefixer: UrlPrefixer, config: ResolverConfig) -> Self {
        Self {
            catalog,
            prefixer,
            config,
        }
    }

    /// Returns the URL prefixer used during normalization.
    #[must_use]
    pub const fn prefixer(&self) -> &UrlPrefixer {
        &self.prefixer
    }

    /// Returns the resolver configuration.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves a name, collapsing not-found and load failures to `None`.
    ///
    /// Empty names return `None` without touching the catalog.
    pub async fn resolve(&self, name: &str) -> Option<PictureSourceSet> {
        let name = ImageName::new(name)?;
        self.try_resolve(&name).await.ok()
    }

    /// Resolves a name, keeping the reason for a failure.
    ///
    /// # Errors
    /// Returns [`ResolveError::NotFound`] when the catalog has no entry for the
    /// key and [`ResolveError::LoadFailure`] when its loader fails.
    pub async fn try_resolve(&self, name: &ImageName) -> Result<PictureSourceSet, ResolveError> {
        let key = name.catalog_key(&self.config.catalog_root);

        if !self.catalog.has(&key) {
            let err = ResolveError::not_found(&key);
            self.report(name, &err);
            return Err(err);
        }

        trace!(name = %name, key = %key, "Invoking catalog loader");
        let raw = match self.catalog.load(&key).await {
            Ok(raw) => raw,
            Err(e) => {
                let err = ResolveError::load_failure(&key, &e);
                self.report(name, &err);
                return Err(err);
            }
        };

        let picture = self.normalize(name.kind(), raw).map_err(|e| {
            let err = ResolveError::load_failure(&key, &e);
            self.report(name, &err);
            err
        })?;

        debug!(name = %name, vector = picture.is_vector(), "Resolved picture");
        Ok(picture)
    }

    /// Normalizes raw loader output for an asset of the given kind.
    ///
    /// # Errors
    /// Returns [`CatalogError::UnexpectedShape`] when the loader output does not
    /// match the kind derived from the name.
    pub fn normalize(
        &self,
        kind: ImageKind,
        raw: RawDescriptor,
    ) -> Result<PictureSourceSet, CatalogError> {
        match (kind, raw) {
            (ImageKind::Vector, RawDescriptor::Vector(url)) => Ok(PictureSourceSet::Vector {
                src: self.prefixer.prefix(&url),
            }),
            (ImageKind::Raster, RawDescriptor::Raster(raster)) => Ok(self.normalize_raster(raster)),
            (kind, raw) => Err(CatalogError::UnexpectedShape(format!(
                "expected a {kind} entry, got {}",
                match raw {
                    RawDescriptor::Vector(_) => ImageKind::Vector,
                    RawDescriptor::Raster(_) => ImageKind::Raster,
                }
            ))),
        }
    }

    fn normalize_raster(&self, raster: RawRaster) -> PictureSourceSet {
        let formats = &raster.sources_by_format;
        let primary = primary_format_index(formats);

        let srcset = primary
            .map(|index| self.prefixer.prefix_srcset(&formats[index].1))
            .filter(|srcset| !srcset.is_empty());

        let sources: Vec<PictureSource> = formats
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != primary)
            .filter_map(|(_, (format, srcset))| {
                let srcset = self.prefixer.prefix_srcset(srcset);
                (!srcset.is_empty()).then(|| PictureSource::new(mime_type_for_format(format), srcset))
            })
            .collect();

        PictureSourceSet::Raster {
            src: self.prefixer.prefix(&raster.image.src),
            width: raster.image.width,
            height: raster.image.height,
            srcset,
            sources: (!sources.is_empty()).then_some(sources),
        }
    }

    fn report(&self, name: &ImageName, err: &ResolveError) {
        if self.config.dev_diagnostics {
            warn!(name = %name, error = %err, "Image could not be resolved");
        } else {
            debug!(name = %name, error = %err, "Image could not be resolved");
        }
    }
}

/// Picks the format used for the fallback `src`/`srcset`.
///
/// JPEG wins over WebP, WebP over AVIF; otherwise the first format listed.
#[must_use]
pub fn primary_format_index(formats: &[(String, String)]) -> Option<usize> {
    PRIMARY_FORMAT_PRECEDENCE
        .iter()
        .find_map(|aliases| {
            formats
                .iter()
                .position(|(format, _)| aliases.iter().any(|a| format.eq_ignore_ascii_case(a)))
        })
        .or_else(|| (!formats.is_empty()).then_some(0))
}
