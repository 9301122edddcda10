//! Domain error types.

mod catalog_error;
mod resolve_error;

pub use catalog_error::CatalogError;
pub use resolve_error::ResolveError;
