//! Domain entity definitions.

mod image_name;
mod picture;
mod raw_descriptor;

pub use image_name::{ImageKind, ImageName, VECTOR_EXTENSIONS};
pub use picture::{
    PictureSource, PictureSourceSet, aspect_ratio_of, has_valid_dimensions, is_enhanced,
    mime_type_for_format,
};
pub use raw_descriptor::{RawDescriptor, RawImage, RawRaster};
