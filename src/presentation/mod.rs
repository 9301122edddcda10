//! Presentation layer: markup for rendering components.

pub mod markup;

pub use markup::{MarkupOptions, escape_attr, render_fallback, render_picture};
