mod asset_catalog_port;

pub use asset_catalog_port::AssetCatalog;

#[cfg(test)]
pub use asset_catalog_port::MockAssetCatalog;

#[cfg(test)]
pub mod mocks {
    pub use super::asset_catalog_port::mock::CountingCatalog;
}
