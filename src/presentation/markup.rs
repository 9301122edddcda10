//! `<picture>` / `<img>` markup for resolved pictures.

use std::fmt::Write;

use crate::domain::entities::{PictureSourceSet, has_valid_dimensions, is_enhanced};

/// Attributes supplied by the rendering component.
#[derive(Debug, Clone, Default)]
pub struct MarkupOptions {
    /// Alternative text.
    pub alt: String,
    /// Emit `loading="lazy"` and `decoding="async"`.
    pub lazy: bool,
}

/// Renders markup for a resolved picture.
///
/// Vectors and rasters without alternate formats get a bare `<img>`; enhanced
/// rasters get a `<picture>` with one `<source>` per alternate format.
#[must_use]
pub fn render_picture(picture: &PictureSourceSet, options: &MarkupOptions) -> String {
    let img = render_img(picture, options);
    if !is_enhanced(picture) {
        return img;
    }

    let mut html = String::from("<picture>\n");
    for source in picture.sources().unwrap_or_default() {
        let _ = writeln!(
            html,
            "  <source type=\"{}\" srcset=\"{}\">",
            escape_attr(&source.mime_type),
            escape_attr(&source.srcset)
        );
    }
    let _ = writeln!(html, "  {img}");
    html.push_str("</picture>");
    html
}

/// Renders a plain image for when resolution produced nothing.
#[must_use]
pub fn render_fallback(src: &str, options: &MarkupOptions) -> String {
    let mut html = format!("<img src=\"{}\"", escape_attr(src));
    push_common(&mut html, options);
    html.push('>');
    html
}

fn render_img(picture: &PictureSourceSet, options: &MarkupOptions) -> String {
    let mut html = format!("<img src=\"{}\"", escape_attr(picture.src()));
    if let Some(srcset) = picture.srcset() {
        let _ = write!(html, " srcset=\"{}\"", escape_attr(srcset));
    }
    if has_valid_dimensions(picture)
        && let (Some(width), Some(height)) = (picture.width(), picture.height())
    {
        let _ = write!(html, " width=\"{width}\" height=\"{height}\"");
    }
    push_common(&mut html, options);
    html.push('>');
    html
}

fn push_common(html: &mut String, options: &MarkupOptions) {
    let _ = write!(html, " alt=\"{}\"", escape_attr(&options.alt));
    if options.lazy {
        html.push_str(" loading=\"lazy\" decoding=\"async\"");
    }
}

/// Escapes a string for use inside a double-quoted attribute.
#[must_use]
pub fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
