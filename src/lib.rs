//! Folio Pictures - responsive image resolution for a portfolio site.
//!
//! This crate turns logical image names into browser-ready picture
//! descriptors. It consults a build-time asset catalog, rewrites every URL
//! under the deployment base path, and memoizes resolutions so each name is
//! loaded at most once at a time.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the resolver, cache and use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing catalog adapters and configuration.
pub mod infrastructure;
/// Presentation layer containing markup rendering.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "folio-pictures";
