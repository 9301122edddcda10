//! In-memory asset catalog, optionally loaded from a JSON manifest.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::fs;
use tracing::{debug, info, trace};

use crate::domain::entities::RawDescriptor;
use crate::domain::errors::CatalogError;
use crate::domain::ports::AssetCatalog;

/// Catalog backed by a key → descriptor table.
///
/// Entries may be added after construction; the resolver picks them up on
/// the next request for a name that previously missed.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    entries: RwLock<HashMap<String, RawDescriptor>>,
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON manifest: an object mapping keys to either a vector URL
    /// string or `{ "image": {...}, "sourcesByFormat": {...} }`.
    ///
    /// # Errors
    /// Returns [`CatalogError::InvalidManifest`] if the JSON does not match.
    pub fn from_manifest_str(manifest: &str) -> Result<Self, CatalogError> {
        let entries: HashMap<String, RawDescriptor> = serde_json::from_str(manifest)?;
        debug!(entries = entries.len(), "Parsed asset manifest");
        Ok(Self {
            entries: RwLock::new(entries),
        })
    }

    /// Reads and parses a JSON manifest file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub async fn from_manifest_file(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| CatalogError::Io(format!("Failed to read {}: {e}", path.display())))?;
        let catalog = Self::from_manifest_str(&content)?;
        info!(path = %path.display(), entries = catalog.len(), "Loaded asset manifest");
        Ok(catalog)
    }

    /// Registers or replaces an entry.
    pub fn insert(&self, key: impl Into<String>, descriptor: RawDescriptor) {
        let key = key.into();
        trace!(key = %key, "Registering catalog entry");
        self.entries.write().insert(key, descriptor);
    }

    /// Removes an entry.
    pub fn remove(&self, key: &str) -> Option<RawDescriptor> {
        self.entries.write().remove(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns all keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().keys().cloned().collect();
        keys.sort_unstable();
        keys
    }
}

#[async_trait]
impl AssetCatalog for MemoryCatalog {
    fn has(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    async fn load(&self, key: &str) -> Result<RawDescriptor, CatalogError> {
        self.entries
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| CatalogError::MissingEntry(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MANIFEST: &str = r#"{
        "images/logo.svg": "images/logo.abc123.svg",
        "images/hero.jpg": {
            "image": {"src": "hero-1.jpg", "width": 800, "height": 600},
            "sourcesByFormat": {"jpeg": "hero-1.jpg 1w", "webp": "hero-1.webp 1w"}
        }
    }"#;

    #[tokio::test]
    async fn test_manifest_entries_load() {
        let catalog = MemoryCatalog::from_manifest_str(MANIFEST).unwrap();

        assert_eq!(catalog.keys(), vec!["images/hero.jpg", "images/logo.svg"]);
        assert!(catalog.has("images/logo.svg"));
        assert!(!catalog.has("logo.svg"));
        assert_eq!(
            catalog.load("images/logo.svg").await,
            Ok(RawDescriptor::vector("images/logo.abc123.svg"))
        );
    }

    #[tokio::test]
    async fn test_missing_entry() {
        let catalog = MemoryCatalog::new();
        assert!(catalog.is_empty());
        assert_eq!(
            catalog.load("images/none.png").await,
            Err(CatalogError::MissingEntry("images/none.png".to_string()))
        );
    }

    #[tokio::test]
    async fn test_late_registration() {
        let catalog = MemoryCatalog::new();
        assert!(!catalog.has("images/a.png"));

        catalog.insert("images/a.png", RawDescriptor::raster("/a.png", 1, 1));
        assert!(catalog.has("images/a.png"));

        assert!(catalog.remove("images/a.png").is_some());
        assert!(!catalog.has("images/a.png"));
    }

    #[test]
    fn test_invalid_manifest() {
        let result = MemoryCatalog::from_manifest_str(r#"{"images/a.png": 42}"#);
        assert!(matches!(result, Err(CatalogError::InvalidManifest(_))));
    }

    #[tokio::test]
    async fn test_manifest_file() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(MANIFEST.as_bytes())?;

        let catalog = MemoryCatalog::from_manifest_file(file.path()).await?;

        assert_eq!(catalog.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_manifest_file_missing() {
        let result = MemoryCatalog::from_manifest_file(Path::new("/nonexistent/manifest.json")).await;
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
