//! Raw catalog loader output, before normalization.

use serde::{Deserialize, Serialize};

use crate::domain::serde_utils::ordered_pairs;

/// What a catalog loader yields for one key.
///
/// In a manifest a vector entry is a bare URL string and a raster entry is an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDescriptor {
    /// URL of a vector asset.
    Vector(String),
    /// Primary image plus per-format srcsets.
    Raster(RawRaster),
}

impl RawDescriptor {
    /// Creates a vector descriptor.
    #[must_use]
    pub fn vector(url: impl Into<String>) -> Self {
        Self::Vector(url.into())
    }

    /// Creates a raster descriptor without format variants.
    #[must_use]
    pub fn raster(src: impl Into<String>, width: u32, height: u32) -> Self {
        Self::Raster(RawRaster {
            image: RawImage {
                src: src.into(),
                width: Some(width),
                height: Some(height),
            },
            sources_by_format: Vec::new(),
        })
    }

    /// Appends a format variant to a raster descriptor. No-op for vectors.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>, srcset: impl Into<String>) -> Self {
        if let Self::Raster(raster) = &mut self {
            raster.sources_by_format.push((format.into(), srcset.into()));
        }
        self
    }
}

/// Raster loader output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRaster {
    /// The fallback image.
    pub image: RawImage,
    /// Format name (`jpeg`, `webp`, ...) to srcset, in catalog order.
    #[serde(with = "ordered_pairs", default)]
    pub sources_by_format: Vec<(String, String)>,
}

/// Primary image of a raster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawImage {
    /// Unprefixed URL.
    pub src: String,
    /// Intrinsic width in pixels.
    #[serde(default)]
    pub width: Option<u32>,
    /// Intrinsic height in pixels.
    #[serde(default)]
    pub height: Option<u32>,
}
