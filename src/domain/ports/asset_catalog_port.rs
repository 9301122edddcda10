//! Port definition for the build-time asset catalog.

use async_trait::async_trait;

use crate::domain::entities::RawDescriptor;
use crate::domain::errors::CatalogError;

/// Port for reading the asset catalog.
///
/// Keys are `<catalog-root>/<logical name>`. Implementations never mutate
/// entries on behalf of the resolver.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetCatalog: Send + Sync {
    /// Returns true if a loader exists for exactly this key.
    fn has(&self, key: &str) -> bool;

    /// Runs the loader for the key.
    async fn load(&self, key: &str) -> Result<RawDescriptor, CatalogError>;
}
