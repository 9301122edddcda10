//! Application layer with services, use cases and DTOs.

/// Data transfer objects.
pub mod dto;
/// Resolution, caching and URL rewriting services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{PictureOutcome, ResolvedPicture};
pub use services::{PictureCache, PictureResolver, ResolverConfig, UrlPrefixer};
pub use use_cases::ResolvePicturesUseCase;
