use super::app_config::AppConfig;
use directories::ProjectDirs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";
const APP_NAME: &str = "folio-pictures";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("toml deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Create a new `StorageManager`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration directory cannot be determined.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::ConfigDirNotFound)?;

        Ok(Self { config_dir })
    }

    /// Creates a new `StorageManager` with a specific directory (useful for testing).
    #[must_use]
    pub fn with_dir(path: PathBuf) -> Self {
        Self { config_dir: path }
    }

    /// Returns the configuration directory path.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Loads the configuration, writing a default file if none exists.
    ///
    /// An explicit `path_override` must exist and parse. A malformed default
    /// file falls back to the defaults with a warning.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or created, or if an
    /// explicit `path_override` is not valid TOML.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let config_path = match path_override {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::Io(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("config file not found: {}", path.display()),
                    )));
                }
                path.to_path_buf()
            }
            None => self.config_dir.join(CONFIG_FILE_NAME),
        };

        if !config_path.exists() {
            info!(
                "Config file not found at {:?}, creating default.",
                config_path
            );
            let default_config = AppConfig::default();
            fs::create_dir_all(&self.config_dir)?;
            Self::save_to_file(&config_path, &default_config)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&config_path)?;
        match toml::from_str::<AppConfig>(&content) {
            Ok(mut config) => {
                config.config = Some(config_path);
                Ok(config)
            }
            Err(e) if path_override.is_some() => Err(e.into()),
            Err(e) => {
                warn!("Failed to parse config file: {}. Using defaults.", e);
                Ok(AppConfig::default())
            }
        }
    }

    fn save_to_file<T: serde::Serialize>(path: &Path, data: &T) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(data)?;

        let parent = path
            .parent()
            .ok_or_else(|| std::io::Error::other("Invalid path"))?;
        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(path).map_err(|e| e.error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_creates_default_if_missing() {
        let dir = tempdir().unwrap();
        let config_dir = dir.path().join("folio-pictures");
        let manager = StorageManager::with_dir(config_dir.clone());

        let config = manager.load_config(None).unwrap();
        assert_eq!(config.site.catalog_root, "images");

        assert!(config_dir.join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_load_config_reads_file() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        let config_file = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_file, "[site]\nbase_path = \"/folio\"\n").unwrap();

        let config = manager.load_config(None).unwrap();

        assert_eq!(config.site.base_path, "/folio");
        assert_eq!(config.config, Some(config_file));
    }

    #[test]
    fn test_load_config_handles_malformed_file() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        let config_file = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_file, "invalid_toml = [").unwrap();

        let config = manager.load_config(None).unwrap();
        assert_eq!(config.site.base_path, "");
        let content = fs::read_to_string(&config_file).unwrap();
        assert_eq!(content, "invalid_toml = [");
    }

    #[test]
    fn test_malformed_override_is_error() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        let config_file = dir.path().join("site.toml");
        fs::write(&config_file, "[site]\nbase_path = \"/folio\"\nbroken = [").unwrap();

        let result = manager.load_config(Some(&config_file));

        assert!(matches!(result, Err(ConfigError::TomlDe(_))));
    }

    #[test]
    fn test_load_config_reads_override() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("unused"));
        let config_file = dir.path().join("site.toml");
        fs::write(&config_file, "[site]\nbase_path = \"/folio\"\n").unwrap();

        let config = manager.load_config(Some(&config_file)).unwrap();

        assert_eq!(config.site.base_path, "/folio");
        assert!(!dir.path().join("unused").exists());
    }

    #[test]
    fn test_missing_override_is_error() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());

        let result = manager.load_config(Some(&dir.path().join("absent.toml")));

        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
