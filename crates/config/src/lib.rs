//! bookscan configuration and document storage
//!
//! - **Config**: the TOML application config (`bookscan.toml`), loaded and
//!   saved through [`ConfigManager`]. Sections implement [`ConfigSection`].
//! - **Documents**: whole-document JSON storage behind [`DocumentStore`],
//!   with a file backend ([`JsonFile`]) and an in-memory backend
//!   ([`MemoryDocument`]).
//! - **Settings**: the [`SettingsStore`], a name → value mapping kept in a
//!   JSON document.
//!
//! All writes replace files atomically.
//!
//! # Example
//!
//! ```rust,no_run
//! use bookscan_config::{ConfigManager, SettingsStore, AUTOFILL_978};
//!
//! let manager = ConfigManager::new().expect("Failed to initialize config");
//! let config = manager.load_or_default();
//!
//! let settings = SettingsStore::open(manager.settings_path(&config));
//! let autofill = settings.is_enabled(AUTOFILL_978).unwrap_or(false);
//! println!("Autofill 978-: {}", autofill);
//! ```

mod atomic;
mod error;
mod manager;
mod persistence;
mod validation;

pub mod document;
pub mod settings;

// Config sections
pub mod app_config;
mod storage_config;

pub use document::{Document, DocumentStore, JsonFile, MemoryDocument};
pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::{ConfigManager, CONFIG_FILE_NAME, ENV_DATA_DIR, ENV_LOG_LEVEL};
pub use settings::{Settings, SettingsStore, AUTOFILL_978, DISABLED, ENABLED, SETTINGS_FIELD};
pub use validation::{ConfigSection, Validator};

pub use app_config::{AppConfig, LogLevel};
pub use storage_config::StorageConfig;

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    /// Application-level settings
    pub app: AppConfig,

    /// Document locations
    pub storage: StorageConfig,
}

impl Config {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the entire configuration
    ///
    /// Returns all validation errors found across all sections.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(mut e) = self.app.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.storage.validate() {
            errors.append(&mut e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}
