//! Data transfer objects.

mod picture_dto;

pub use picture_dto::{PictureOutcome, ResolvedPicture};
