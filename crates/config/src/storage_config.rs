//! Storage configuration section: where the books and settings documents live

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Storage locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the documents (relative to the config dir if not absolute)
    pub data_dir: PathBuf,

    /// File name of the books document
    pub books_file: String,

    /// File name of the settings document
    pub settings_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            books_file: "books.json".to_string(),
            settings_file: "settings.json".to_string(),
        }
    }
}

impl StorageConfig {
    /// Resolves the data directory against `base`
    pub fn data_dir_in(&self, base: &Path) -> PathBuf {
        if self.data_dir.is_absolute() {
            self.data_dir.clone()
        } else {
            base.join(&self.data_dir)
        }
    }

    /// Full path of the books document
    pub fn books_path(&self, base: &Path) -> PathBuf {
        self.data_dir_in(base).join(&self.books_file)
    }

    /// Full path of the settings document
    pub fn settings_path(&self, base: &Path) -> PathBuf {
        self.data_dir_in(base).join(&self.settings_file)
    }
}

impl ConfigSection for StorageConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = vec![
            Validator::file_name(&self.books_file, "storage.books_file"),
            Validator::file_name(&self.settings_file, "storage.settings_file"),
        ];

        if self.data_dir.as_os_str().is_empty() {
            results.push(Err(ValidationError::new(
                "storage.data_dir",
                "must not be empty",
            )));
        }

        if self.books_file == self.settings_file {
            results.push(Err(ValidationError::with_value(
                "storage.settings_file",
                "must differ from storage.books_file",
                &self.settings_file,
            )));
        }

        Validator::collect_errors(results)
    }

}
