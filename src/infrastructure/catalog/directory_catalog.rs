//! Asset catalog built by scanning a directory of images.
//!
//! Every image file becomes a key `<catalog_root>/<relative path>`. Raster
//! files that share a stem within one directory (`hero.jpg`, `hero.webp`)
//! are offered as format variants of each other.
//!
//! Sibling variants are assumed to be encodes of the same picture at the same
//! size: their srcset candidates reuse the width read from the requested file
//! and only that file is decoded.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::{debug, info, trace, warn};

use crate::domain::entities::{ImageKind, ImageName, RawDescriptor, RawImage, RawRaster};
use crate::domain::errors::CatalogError;
use crate::domain::ports::AssetCatalog;

/// Raster extensions picked up by the scan.
pub const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "avif", "gif"];

/// Hex characters of the content hash used for fingerprints.
const FINGERPRINT_LEN: usize = 8;

/// Options for [`DirectoryCatalog::scan`].
#[derive(Debug, Clone)]
pub struct DirectoryCatalogOptions {
    /// Key prefix, matching the resolver's catalog root.
    pub catalog_root: String,
    /// Site path the directory is served under, e.g. `images`.
    pub url_root: String,
    /// Append `?v=<content hash>` to URLs for cache busting.
    pub fingerprint: bool,
}

impl Default for DirectoryCatalogOptions {
    fn default() -> Self {
        Self {
            catalog_root: "images".to_string(),
            url_root: "images".to_string(),
            fingerprint: false,
        }
    }
}

#[derive(Debug, Clone)]
struct AssetFile {
    relative: String,
    format: String,
    group: (String, String),
}

/// Catalog over files on disk.
#[derive(Debug)]
pub struct DirectoryCatalog {
    root_dir: PathBuf,
    options: DirectoryCatalogOptions,
    files: HashMap<String, AssetFile>,
    groups: HashMap<(String, String), Vec<String>>,
}

impl DirectoryCatalog {
    /// Scans `root_dir` recursively.
    ///
    /// # Errors
    /// Returns error if the root directory cannot be read.
    pub async fn scan(root_dir: PathBuf, options: DirectoryCatalogOptions) -> Result<Self, CatalogError> {
        let mut files = HashMap::new();
        let mut groups: HashMap<(String, String), Vec<String>> = HashMap::new();
        let mut pending = vec![root_dir.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = fs::read_dir(&dir)
                .await
                .map_err(|e| CatalogError::Io(format!("Failed to read {}: {e}", dir.display())))?;

            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| CatalogError::Io(format!("Failed to read entry: {e}")))?
            {
                let path = entry.path();
                let Ok(file_type) = entry.file_type().await else {
                    warn!(path = %path.display(), "Skipping unreadable entry");
                    continue;
                };
                if file_type.is_dir() {
                    pending.push(path);
                    continue;
                }
                let Some(asset) = Self::describe(&root_dir, &path) else {
                    trace!(path = %path.display(), "Skipping non-image file");
                    continue;
                };
                let key = join_key(&options.catalog_root, &asset.relative);
                groups
                    .entry(asset.group.clone())
                    .or_default()
                    .push(key.clone());
                files.insert(key, asset);
            }
        }

        for members in groups.values_mut() {
            members.sort_unstable();
        }

        info!(
            root = %root_dir.display(),
            files = files.len(),
            "Scanned asset directory"
        );

        Ok(Self {
            root_dir,
            options,
            files,
            groups,
        })
    }

    /// Returns the number of catalogued files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if no image files were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn describe(root_dir: &Path, path: &Path) -> Option<AssetFile> {
        let relative = path.strip_prefix(root_dir).ok()?;
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let name = ImageName::new(relative.clone())?;
        let ext = name.extension()?;

        if name.kind() == ImageKind::Raster && !RASTER_EXTENSIONS.contains(&ext.as_str()) {
            return None;
        }

        let (dir, file) = relative.rsplit_once('/').unwrap_or(("", relative.as_str()));
        let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);

        Some(AssetFile {
            group: (dir.to_string(), stem.to_string()),
            format: if ext == "jpg" { "jpeg".to_string() } else { ext },
            relative,
        })
    }

    async fn url_for(&self, asset: &AssetFile) -> Result<String, CatalogError> {
        let url_root = self.options.url_root.trim_matches('/');
        let mut url = if url_root.is_empty() {
            format!("/{}", asset.relative)
        } else {
            format!("/{url_root}/{}", asset.relative)
        };

        if self.options.fingerprint {
            let bytes = fs::read(self.root_dir.join(&asset.relative)).await?;
            let digest = hex::encode(Sha256::digest(&bytes));
            url.push_str("?v=");
            url.push_str(&digest[..FINGERPRINT_LEN]);
        }

        Ok(url)
    }

    async fn dimensions(&self, asset: &AssetFile) -> Result<(u32, u32), CatalogError> {
        let path = self.root_dir.join(&asset.relative);
        tokio::task::spawn_blocking(move || image::image_dimensions(&path))
            .await
            .map_err(|e| CatalogError::Decode(format!("Dimension task panicked: {e}")))?
            .map_err(|e| CatalogError::Decode(format!("Failed to read dimensions: {e}")))
    }
}

#[async_trait]
impl AssetCatalog for DirectoryCatalog {
    fn has(&self, key: &str) -> bool {
        self.files.contains_key(key)
    }

    async fn load(&self, key: &str) -> Result<RawDescriptor, CatalogError> {
        let asset = self
            .files
            .get(key)
            .ok_or_else(|| CatalogError::MissingEntry(key.to_string()))?;

        if asset.format == "svg" {
            return Ok(RawDescriptor::Vector(self.url_for(asset).await?));
        }

        let (width, height) = self.dimensions(asset).await?;
        let src = self.url_for(asset).await?;

        let mut sources_by_format = vec![(asset.format.clone(), format!("{src} {width}w"))];
        for sibling_key in self.groups.get(&asset.group).into_iter().flatten() {
            let Some(sibling) = self.files.get(sibling_key) else {
                continue;
            };
            if sibling_key == key
                || sibling.format == "svg"
                || sources_by_format.iter().any(|(f, _)| *f == sibling.format)
            {
                continue;
            }
            let url = self.url_for(sibling).await?;
            sources_by_format.push((sibling.format.clone(), format!("{url} {width}w")));
        }

        debug!(
            key = %key,
            width = width,
            height = height,
            formats = sources_by_format.len(),
            "Loaded raster asset"
        );

        Ok(RawDescriptor::Raster(RawRaster {
            image: RawImage {
                src,
                width: Some(width),
                height: Some(height),
            },
            sources_by_format,
        }))
    }
}

fn join_key(root: &str, relative: &str) -> String {
    let root = root.trim_matches('/');
    if root.is_empty() {
        relative.to_string()
    } else {
        format!("{root}/{relative}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path, width: u32, height: u32) -> Result<(), Box<dyn std::error::Error>> {
        let img = image::RgbImage::new(width, height);
        img.save(path)?;
        Ok(())
    }

    async fn fixture() -> Result<(tempfile::TempDir, DirectoryCatalog), Box<dyn std::error::Error>> {
        let dir = tempfile::TempDir::new()?;
        std::fs::create_dir_all(dir.path().join("projects"))?;
        write_png(&dir.path().join("projects/hero.png"), 4, 3)?;
        std::fs::write(dir.path().join("projects/hero.webp"), b"not decoded")?;
        std::fs::write(dir.path().join("logo.svg"), b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>")?;
        std::fs::write(dir.path().join("notes.txt"), b"ignored")?;

        let catalog =
            DirectoryCatalog::scan(dir.path().to_path_buf(), DirectoryCatalogOptions::default())
                .await?;
        Ok((dir, catalog))
    }

    #[tokio::test]
    async fn test_scan_registers_images_only() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, catalog) = fixture().await?;

        assert_eq!(catalog.len(), 3);
        assert!(catalog.has("images/projects/hero.png"));
        assert!(catalog.has("images/projects/hero.webp"));
        assert!(catalog.has("images/logo.svg"));
        assert!(!catalog.has("images/notes.txt"));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_vector() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, catalog) = fixture().await?;

        let raw = catalog.load("images/logo.svg").await?;

        assert_eq!(raw, RawDescriptor::vector("/images/logo.svg"));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_raster_with_sibling_formats() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, catalog) = fixture().await?;

        let raw = catalog.load("images/projects/hero.png").await?;

        let expected = RawDescriptor::raster("/images/projects/hero.png", 4, 3)
            .with_format("png", "/images/projects/hero.png 4w")
            .with_format("webp", "/images/projects/hero.webp 4w");
        assert_eq!(raw, expected);
        Ok(())
    }

    #[tokio::test]
    async fn test_undecodable_raster_fails() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, catalog) = fixture().await?;

        let result = catalog.load("images/projects/hero.webp").await;

        assert!(matches!(result, Err(CatalogError::Decode(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_fingerprinted_urls() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::TempDir::new()?;
        std::fs::write(dir.path().join("logo.svg"), b"<svg/>")?;
        let options = DirectoryCatalogOptions {
            fingerprint: true,
            ..DirectoryCatalogOptions::default()
        };
        let catalog = DirectoryCatalog::scan(dir.path().to_path_buf(), options).await?;

        let RawDescriptor::Vector(url) = catalog.load("images/logo.svg").await? else {
            panic!("expected vector");
        };

        let (path, version) = url.split_once("?v=").expect("fingerprint query");
        assert_eq!(path, "/images/logo.svg");
        assert_eq!(version.len(), FINGERPRINT_LEN);
        assert!(version.chars().all(|c| c.is_ascii_hexdigit()));
        Ok(())
    }

    #[tokio::test]
    async fn test_scan_missing_directory() {
        let result = DirectoryCatalog::scan(
            PathBuf::from("/nonexistent/assets"),
            DirectoryCatalogOptions::default(),
        )
        .await;
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
