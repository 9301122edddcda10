//! Infrastructure layer with catalog adapters and configuration.

/// Asset catalog adapters.
pub mod catalog;
/// Application configuration.
pub mod config;

pub use catalog::{DirectoryCatalog, DirectoryCatalogOptions, MemoryCatalog, open_catalog};
pub use config::{AppConfig, CliArgs, Command, ConfigError, LogLevel, StorageManager};
