//! Logical image names and their classification.

use serde::{Deserialize, Serialize};

/// File extensions resolved as vector assets (compared case-insensitively).
pub const VECTOR_EXTENSIONS: &[&str] = &["svg"];

/// A logical image name relative to the catalog root (e.g. `"projects/hero.jpg"`).
///
/// The name is case-sensitive and is the cache key for resolutions.
/// It can never be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageName(String);

impl ImageName {
    /// Creates a name, returning `None` for empty input.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            None
        } else {
            Some(Self(name))
        }
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the lowercase extension, if any.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let file = self.0.rsplit('/').next().unwrap_or(&self.0);
        file.rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }

    /// Classifies the asset by its extension.
    #[must_use]
    pub fn kind(&self) -> ImageKind {
        match self.extension() {
            Some(ext) if VECTOR_EXTENSIONS.contains(&ext.as_str()) => ImageKind::Vector,
            _ => ImageKind::Raster,
        }
    }

    /// Builds the catalog key `<root>/<name>`.
    ///
    /// An empty root yields the bare name.
    #[must_use]
    pub fn catalog_key(&self, root: &str) -> String {
        let root = root.trim_matches('/');
        if root.is_empty() {
            self.0.clone()
        } else {
            format!("{root}/{}", self.0)
        }
    }
}

impl std::fmt::Display for ImageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ImageName {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("image name must not be empty")
    }
}

impl From<ImageName> for String {
    fn from(name: ImageName) -> Self {
        name.0
    }
}

impl AsRef<str> for ImageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Whether an asset is a vector graphic or a raster image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    /// SVG-class asset rendered as a plain image element.
    Vector,
    /// Bitmap asset with format and size variants.
    Raster,
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vector => write!(f, "vector"),
            Self::Raster => write!(f, "raster"),
        }
    }
}
