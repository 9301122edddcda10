//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::services::{DEFAULT_CATALOG_ROOT, ResolverConfig};

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, read from `config.toml` and CLI flags.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stderr when unset.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Report missing images and loader failures as warnings.
    /// Defaults to on in debug builds.
    #[serde(default)]
    pub dev_diagnostics: Option<bool>,

    /// Deployment settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Asset catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Deployment settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base path the site is served under, e.g. `/portfolio`.
    #[serde(default)]
    pub base_path: String,

    /// Key prefix of images in the catalog.
    #[serde(default = "default_catalog_root")]
    pub catalog_root: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            catalog_root: default_catalog_root(),
        }
    }
}

/// Where catalog entries come from. A manifest takes precedence over a directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON manifest produced by the build.
    #[serde(default)]
    pub manifest: Option<PathBuf>,

    /// Directory of images to scan.
    #[serde(default)]
    pub asset_dir: Option<PathBuf>,

    /// Site path the asset directory is served under. Defaults to the catalog root.
    #[serde(default)]
    pub url_root: Option<String>,

    /// Append content-hash query strings to scanned asset URLs.
    #[serde(default)]
    pub fingerprint: bool,
}

fn default_catalog_root() -> String {
    DEFAULT_CATALOG_ROOT.to_string()
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(dev_diagnostics) = args.dev_diagnostics {
            self.dev_diagnostics = Some(dev_diagnostics);
        }
        if let Some(base_path) = &args.base_path {
            self.site.base_path.clone_from(base_path);
        }
        if let Some(catalog_root) = &args.catalog_root {
            self.site.catalog_root.clone_from(catalog_root);
        }
        if let Some(manifest) = &args.manifest {
            self.catalog.manifest = Some(manifest.clone());
        }
        if let Some(asset_dir) = &args.asset_dir {
            self.catalog.asset_dir = Some(asset_dir.clone());
        }
        if let Some(fingerprint) = args.fingerprint {
            self.catalog.fingerprint = fingerprint;
        }
    }

    /// Builds the resolver configuration.
    #[must_use]
    pub fn resolver_config(&self) -> ResolverConfig {
        let defaults = ResolverConfig::default();
        ResolverConfig {
            catalog_root: self.site.catalog_root.clone(),
            dev_diagnostics: self.dev_diagnostics.unwrap_or(defaults.dev_diagnostics),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            dev_diagnostics: None,
            site: SiteConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
            log_level = "debug"
            dev_diagnostics = false

            [site]
            base_path = "/portfolio"

            [catalog]
            asset_dir = "public/images"
            fingerprint = true
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.site.base_path, "/portfolio");
        assert_eq!(config.site.catalog_root, "images");
        assert_eq!(config.catalog.asset_dir, Some(PathBuf::from("public/images")));
        assert!(config.catalog.fingerprint);
        assert!(config.catalog.manifest.is_none());
        assert!(!config.resolver_config().dev_diagnostics);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").expect("Failed to parse config");
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.site.base_path, "");
        assert_eq!(config.resolver_config().catalog_root, "images");
        assert_eq!(
            config.resolver_config().dev_diagnostics,
            cfg!(debug_assertions)
        );
    }

    #[test]
    fn test_args_override_file() {
        let mut config: AppConfig = toml::from_str(
            r#"
            [site]
            base_path = "/old"
            catalog_root = "img"
        "#,
        )
        .expect("Failed to parse config");

        let args = CliArgs::parse_from([
            "folio-pictures",
            "--base-path",
            "/new",
            "--manifest",
            "dist/manifest.json",
            "resolve",
            "hero.jpg",
        ]);
        config.merge_with_args(&args);

        assert_eq!(config.site.base_path, "/new");
        assert_eq!(config.site.catalog_root, "img");
        assert_eq!(
            config.catalog.manifest,
            Some(PathBuf::from("dist/manifest.json"))
        );
    }
}
