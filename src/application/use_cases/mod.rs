//! Use case implementations.

mod resolve_pictures_use_case;

pub use resolve_pictures_use_case::ResolvePicturesUseCase;
