//! Asset catalog adapters.
//!
//! This module provides:
//! - An in-memory catalog loaded from a build manifest
//! - A catalog that scans an image directory

pub mod directory_catalog;
pub mod memory_catalog;

use std::sync::Arc;

use tracing::info;

use crate::domain::errors::CatalogError;
use crate::domain::ports::AssetCatalog;
use crate::infrastructure::config::{CatalogConfig, SiteConfig};

pub use directory_catalog::{DirectoryCatalog, DirectoryCatalogOptions, RASTER_EXTENSIONS};
pub use memory_catalog::MemoryCatalog;

/// Opens the catalog described by the configuration.
///
/// A manifest wins over an asset directory.
///
/// # Errors
/// Returns error if neither source is configured or the source cannot be read.
pub async fn open_catalog(
    catalog: &CatalogConfig,
    site: &SiteConfig,
) -> Result<Arc<dyn AssetCatalog>, CatalogError> {
    if let Some(manifest) = &catalog.manifest {
        let catalog = MemoryCatalog::from_manifest_file(manifest).await?;
        return Ok(Arc::new(catalog));
    }

    if let Some(asset_dir) = &catalog.asset_dir {
        let options = DirectoryCatalogOptions {
            catalog_root: site.catalog_root.clone(),
            url_root: catalog
                .url_root
                .clone()
                .unwrap_or_else(|| site.catalog_root.clone()),
            fingerprint: catalog.fingerprint,
        };
        info!(dir = %asset_dir.display(), "Using directory catalog");
        let catalog = DirectoryCatalog::scan(asset_dir.clone(), options).await?;
        return Ok(Arc::new(catalog));
    }

    Err(CatalogError::InvalidManifest(
        "no manifest or asset directory configured".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_without_source_fails() {
        let result = open_catalog(&CatalogConfig::default(), &SiteConfig::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_manifest_takes_precedence() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::TempDir::new()?;
        let manifest = dir.path().join("manifest.json");
        std::fs::write(&manifest, r#"{"images/a.svg": "/a.svg"}"#)?;
        let config = CatalogConfig {
            manifest: Some(manifest),
            asset_dir: Some(dir.path().join("does-not-exist")),
            ..CatalogConfig::default()
        };

        let catalog = open_catalog(&config, &SiteConfig::default()).await?;

        assert!(catalog.has("images/a.svg"));
        Ok(())
    }
}
