//! Configuration manager - main API for config operations

use crate::app_config::LogLevel;
use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult};
use directories::ProjectDirs;
use std::path::PathBuf;

/// File name of the TOML config inside the config directory
pub const CONFIG_FILE_NAME: &str = "bookscan.toml";

/// Environment variable overriding `storage.data_dir`
pub const ENV_DATA_DIR: &str = "BOOKSCAN_STORAGE_DATA_DIR";

/// Environment variable overriding `app.log_level`
pub const ENV_LOG_LEVEL: &str = "BOOKSCAN_APP_LOG_LEVEL";

/// Main configuration manager
///
/// Owns the config directory. Relative storage paths in the config are
/// resolved against it.
pub struct ConfigManager {
    persistence: ConfigPersistence,
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager using the default config directory
    ///
    /// - Linux: `~/.config/bookscan/`
    /// - macOS: `~/Library/Application Support/bookscan/`
    /// - Windows: `%APPDATA%\bookscan\`
    pub fn new() -> ConfigResult<Self> {
        let config_dir = Self::default_config_dir()?;
        Self::with_directory(config_dir)
    }

    /// Creates a config manager with a custom config directory
    pub fn with_directory(config_dir: PathBuf) -> ConfigResult<Self> {
        let persistence = ConfigPersistence::new(config_dir.join(CONFIG_FILE_NAME));

        Ok(Self {
            persistence,
            config_dir,
        })
    }

    fn default_config_dir() -> ConfigResult<PathBuf> {
        ProjectDirs::from("", "", "bookscan")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: "Could not determine user config directory".to_string(),
            })
    }

    /// Returns the config directory path
    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    /// Returns the full config file path
    pub fn config_path(&self) -> PathBuf {
        self.persistence.config_path().to_path_buf()
    }

    /// Path of the books document for `config`
    pub fn books_path(&self, config: &Config) -> PathBuf {
        config.storage.books_path(&self.config_dir)
    }

    /// Path of the settings document for `config`
    pub fn settings_path(&self, config: &Config) -> PathBuf {
        config.storage.settings_path(&self.config_dir)
    }

    /// Loads the configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    /// Loads the configuration, falling back to defaults on any error
    pub fn load_or_default(&self) -> Config {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config: {}, using defaults", e);
                Config::default()
            }
        }
    }

    /// Saves the configuration to file
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.persistence.save(config)
    }

    /// Loads, applies `update_fn`, and saves
    pub fn update<F>(&self, update_fn: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.load()?;
        update_fn(&mut config);
        self.save(&config)
    }

    /// Writes a default config file if one doesn't exist
    ///
    /// Returns Ok(true) if a new file was created.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path().exists() {
            log::info!(
                "Config file already exists at {}",
                self.config_path().display()
            );
            return Ok(false);
        }

        self.save(&Config::default())?;
        Ok(true)
    }

    /// Overwrites the config file with default values
    pub fn reset(&self) -> ConfigResult<()> {
        self.save(&Config::default())
    }

    /// Loads the config and applies environment variable overrides
    ///
    /// Recognised variables are `BOOKSCAN_STORAGE_DATA_DIR` and
    /// `BOOKSCAN_APP_LOG_LEVEL`. Unparsable values are ignored with a warning.
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;

        if let Ok(data_dir) = std::env::var(ENV_DATA_DIR) {
            if !data_dir.trim().is_empty() {
                config.storage.data_dir = PathBuf::from(data_dir);
            }
        }

        if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
            match level.parse::<LogLevel>() {
                Ok(level) => config.app.log_level = level,
                Err(e) => log::warn!("Ignoring {}: {}", ENV_LOG_LEVEL, e),
            }
        }

        if let Err(errors) = config.validate() {
            log::warn!(
                "Config validation warnings after env overrides: {:?}",
                errors
            );
        }

        Ok(config)
    }
}
