//! Resolved, browser-ready picture descriptors.

use serde::{Serialize, Serializer};

/// One alternate-format candidate list for a `<source>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PictureSource {
    /// MIME type, e.g. `image/webp`.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Prefixed srcset string.
    pub srcset: String,
}

impl PictureSource {
    /// Creates a source entry.
    #[must_use]
    pub fn new(mime_type: impl Into<String>, srcset: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            srcset: srcset.into(),
        }
    }
}

/// Normalized descriptor of an image's responsive variants.
///
/// All URLs are already prefixed with the deployment base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PictureSourceSet {
    /// SVG-class asset. Consumers render a plain image element.
    Vector {
        /// Asset URL.
        src: String,
    },
    /// Bitmap asset with optional responsive candidates.
    Raster {
        /// Fallback URL.
        src: String,
        /// Intrinsic width in pixels.
        width: Option<u32>,
        /// Intrinsic height in pixels.
        height: Option<u32>,
        /// Primary-format candidate list.
        srcset: Option<String>,
        /// Alternate formats, `None` when there are none.
        sources: Option<Vec<PictureSource>>,
    },
}

impl PictureSourceSet {
    /// Returns the fallback URL.
    #[must_use]
    pub fn src(&self) -> &str {
        match self {
            Self::Vector { src } | Self::Raster { src, .. } => src,
        }
    }

    /// Returns true for vector assets.
    #[must_use]
    pub const fn is_vector(&self) -> bool {
        matches!(self, Self::Vector { .. })
    }

    /// Returns the intrinsic width; always `None` for vectors.
    #[must_use]
    pub const fn width(&self) -> Option<u32> {
        match self {
            Self::Vector { .. } => None,
            Self::Raster { width, .. } => *width,
        }
    }

    /// Returns the intrinsic height; always `None` for vectors.
    #[must_use]
    pub const fn height(&self) -> Option<u32> {
        match self {
            Self::Vector { .. } => None,
            Self::Raster { height, .. } => *height,
        }
    }

    /// Returns the primary srcset.
    #[must_use]
    pub fn srcset(&self) -> Option<&str> {
        match self {
            Self::Vector { .. } => None,
            Self::Raster { srcset, .. } => srcset.as_deref(),
        }
    }

    /// Returns the alternate-format sources; always `None` for vectors.
    #[must_use]
    pub fn sources(&self) -> Option<&[PictureSource]> {
        match self {
            Self::Vector { .. } => None,
            Self::Raster { sources, .. } => sources.as_deref(),
        }
    }
}

/// Wire shape with an `isVector` flag, as bound into markup attributes.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PictureAttrs<'a> {
    src: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    srcset: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sources: Option<&'a [PictureSource]>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    is_vector: bool,
}

impl Serialize for PictureSourceSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        PictureAttrs {
            src: self.src(),
            width: self.width(),
            height: self.height(),
            srcset: self.srcset(),
            sources: self.sources(),
            is_vector: self.is_vector(),
        }
        .serialize(serializer)
    }
}

/// Returns true for rasters that carry alternate formats and need a `<picture>` wrapper.
#[must_use]
pub fn is_enhanced(picture: &PictureSourceSet) -> bool {
    picture.sources().is_some_and(|sources| !sources.is_empty())
}

/// Returns true when both width and height are known and positive.
#[must_use]
pub fn has_valid_dimensions(picture: &PictureSourceSet) -> bool {
    valid_dimensions(picture).is_some()
}

/// Returns `"w/h"` for sizing a placeholder, or `"1/1"` when dimensions are unknown.
#[must_use]
pub fn aspect_ratio_of(picture: &PictureSourceSet) -> String {
    valid_dimensions(picture).map_or_else(|| "1/1".to_string(), |(w, h)| format!("{w}/{h}"))
}

fn valid_dimensions(picture: &PictureSourceSet) -> Option<(u32, u32)> {
    match (picture.width(), picture.height()) {
        (Some(w), Some(h)) if w > 0 && h > 0 => Some((w, h)),
        _ => None,
    }
}

/// Maps a catalog format name to its MIME type.
#[must_use]
pub fn mime_type_for_format(format: &str) -> String {
    let format = format.to_ascii_lowercase();
    match format.as_str() {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        "svg" => "image/svg+xml".to_string(),
        "ico" => "image/x-icon".to_string(),
        _ => format!("image/{format}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn raster(width: Option<u32>, height: Option<u32>) -> PictureSourceSet {
        PictureSourceSet::Raster {
            src: "/base/a.jpg".to_string(),
            width,
            height,
            srcset: Some("/base/a.jpg 1w".to_string()),
            sources: None,
        }
    }

    #[test]
    fn test_vector_has_no_raster_fields() {
        let picture = PictureSourceSet::Vector {
            src: "/base/logo.svg".to_string(),
        };
        assert!(picture.is_vector());
        assert_eq!(picture.width(), None);
        assert_eq!(picture.height(), None);
        assert!(picture.sources().is_none());
        assert!(!is_enhanced(&picture));
        assert_eq!(aspect_ratio_of(&picture), "1/1");
    }

    #[test]
    fn test_enhanced_requires_sources() {
        let mut picture = raster(Some(10), Some(10));
        assert!(!is_enhanced(&picture));

        if let PictureSourceSet::Raster { sources, .. } = &mut picture {
            *sources = Some(vec![PictureSource::new("image/webp", "/base/a.webp 1w")]);
        }
        assert!(is_enhanced(&picture));
    }

    #[test_case(Some(800), Some(600), true, "800/600" ; "known")]
    #[test_case(Some(0), Some(600), false, "1/1" ; "zero_width")]
    #[test_case(None, Some(600), false, "1/1" ; "missing_width")]
    #[test_case(Some(800), None, false, "1/1" ; "missing_height")]
    fn test_dimensions(width: Option<u32>, height: Option<u32>, valid: bool, ratio: &str) {
        let picture = raster(width, height);
        assert_eq!(has_valid_dimensions(&picture), valid);
        assert_eq!(aspect_ratio_of(&picture), ratio);
    }

    #[test_case("jpeg", "image/jpeg")]
    #[test_case("JPG", "image/jpeg")]
    #[test_case("webp", "image/webp")]
    #[test_case("avif", "image/avif")]
    #[test_case("svg", "image/svg+xml")]
    fn test_mime_type_for_format(format: &str, expected: &str) {
        assert_eq!(mime_type_for_format(format), expected);
    }

    #[test]
    fn test_serialize_vector() {
        let picture = PictureSourceSet::Vector {
            src: "/base/images/logo.abc123.svg".to_string(),
        };
        let json = serde_json::to_value(&picture).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"src": "/base/images/logo.abc123.svg", "isVector": true})
        );
    }

    #[test]
    fn test_serialize_raster() {
        let picture = PictureSourceSet::Raster {
            src: "/base/hero-1.jpg".to_string(),
            width: Some(800),
            height: Some(600),
            srcset: Some("/base/hero-1.jpg 1w".to_string()),
            sources: Some(vec![PictureSource::new("image/webp", "/base/hero-1.webp 1w")]),
        };
        let json = serde_json::to_value(&picture).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "src": "/base/hero-1.jpg",
                "width": 800,
                "height": 600,
                "srcset": "/base/hero-1.jpg 1w",
                "sources": [{"type": "image/webp", "srcset": "/base/hero-1.webp 1w"}]
            })
        );
    }
}
