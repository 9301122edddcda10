//! Deployment base-path rewriting for catalog URLs and srcset strings.

use regex::Regex;
use std::sync::LazyLock;

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("valid scheme regex"));

/// Prepends a deployment base path to site-local URLs.
///
/// Left untouched: empty strings, anything with a URI scheme (`https:`,
/// `data:`, `blob:` ...), protocol-relative `//host` URLs, and
/// document-relative references (`./`, `../`, `#`, `?`). Root-relative and bare
/// catalog paths are anchored under the base path. URLs already under the base
/// path are returned unchanged, so prefixing twice is harmless.
///
/// The flip side: a root-relative URL whose first segment equals the base path
/// is taken as already prefixed. With base `/images`, `/images/hero.jpg` stays
/// `/images/hero.jpg` rather than becoming `/images/images/hero.jpg`. Pick a base
/// path that does not collide with a top-level asset directory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlPrefixer {
    base_path: String,
}

impl UrlPrefixer {
    /// Creates a prefixer. `""` and `"/"` mean the site is served from the root.
    #[must_use]
    pub fn new(base_path: &str) -> Self {
        let trimmed = base_path.trim().trim_matches('/');
        let base_path = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        Self { base_path }
    }

    /// Returns the normalized base path (`""` when serving from the root).
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Rewrites a single URL.
    #[must_use]
    pub fn prefix(&self, url: &str) -> String {
        if url.is_empty() || is_external(url) || is_document_relative(url) {
            return url.to_string();
        }

        if let Some(path) = url.strip_prefix('/') {
            if self.is_under_base(url) {
                return url.to_string();
            }
            return format!("{}/{path}", self.base_path);
        }

        format!("{}/{url}", self.base_path)
    }

    /// Rewrites the URL of every candidate in a `srcset` value.
    ///
    /// Descriptors (`150w`, `2x`) are kept verbatim; empty candidates are dropped.
    #[must_use]
    pub fn prefix_srcset(&self, srcset: &str) -> String {
        srcset
            .split(',')
            .filter_map(|candidate| {
                let mut tokens = candidate.split_whitespace();
                let url = tokens.next()?;
                let descriptor = tokens.collect::<Vec<_>>().join(" ");
                let url = self.prefix(url);
                Some(if descriptor.is_empty() {
                    url
                } else {
                    format!("{url} {descriptor}")
                })
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn is_under_base(&self, url: &str) -> bool {
        !self.base_path.is_empty()
            && url
                .strip_prefix(&self.base_path)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
}

/// Returns true for URLs with a scheme or a protocol-relative authority.
#[must_use]
pub fn is_external(url: &str) -> bool {
    url.starts_with("//") || SCHEME_RE.is_match(url)
}

fn is_document_relative(url: &str) -> bool {
    url.starts_with("./") || url.starts_with("../") || url.starts_with('#') || url.starts_with('?')
}
