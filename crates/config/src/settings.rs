//! Settings store
//!
//! Settings are string flags kept under the `settings` field of a JSON
//! document, conventionally `"0"` or `"1"`. Only keys that already exist in
//! the document can be changed; `set` never creates a key.

use crate::document::{Document, DocumentStore, JsonFile};
use crate::ConfigResult;
use std::collections::BTreeMap;

/// Top-level field holding the settings mapping
pub const SETTINGS_FIELD: &str = "settings";

/// Prefill the ISBN entry with `978-`
pub const AUTOFILL_978: &str = "autofill-978";

/// Value of an enabled flag
pub const ENABLED: &str = "1";

/// Value of a disabled flag
pub const DISABLED: &str = "0";

/// Mapping of setting name to value
pub type Settings = BTreeMap<String, String>;

/// Settings a freshly initialized document starts with
pub fn default_settings() -> Settings {
    let mut settings = Settings::new();
    settings.insert(AUTOFILL_978.to_string(), DISABLED.to_string());
    settings
}

/// Reads and edits the settings document
#[derive(Debug)]
pub struct SettingsStore<S: DocumentStore> {
    store: S,
}

impl SettingsStore<JsonFile> {
    /// Opens a settings document on disk
    pub fn open(path: impl Into<std::path::PathBuf>) -> Self {
        Self::new(JsonFile::new(path))
    }
}

impl<S: DocumentStore> SettingsStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying document store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the full settings mapping
    pub fn get_all(&self) -> ConfigResult<Settings> {
        self.store.load()?.section(SETTINGS_FIELD)
    }

    /// Reads a single setting
    pub fn get(&self, name: &str) -> ConfigResult<Option<String>> {
        Ok(self.get_all()?.remove(name))
    }

    /// Returns true if the setting exists and is `"1"`
    pub fn is_enabled(&self, name: &str) -> ConfigResult<bool> {
        Ok(self.get(name)?.as_deref() == Some(ENABLED))
    }

    /// Overwrites an existing setting
    ///
    /// Unknown names are ignored. Returns true if the document was written;
    /// nothing is written when the name is unknown or the value is unchanged.
    pub fn set(&self, name: &str, value: &str) -> ConfigResult<bool> {
        let mut document = self.store.load()?;
        let mut settings: Settings = document.section(SETTINGS_FIELD)?;

        match settings.get_mut(name) {
            Some(current) if current != value => {
                log::debug!("Setting '{}' changed from '{}' to '{}'", name, current, value);
                *current = value.to_string();
            }
            Some(_) => return Ok(false),
            None => {
                log::debug!("Ignoring unknown setting '{}'", name);
                return Ok(false);
            }
        }

        document.set_section(SETTINGS_FIELD, &settings)?;
        self.store.save(&document)?;
        Ok(true)
    }

    /// Creates the settings document with default values if it is missing
    ///
    /// Returns true if a document was created.
    pub fn initialize_defaults(&self) -> ConfigResult<bool> {
        if self.store.exists() {
            return Ok(false);
        }

        let mut document = Document::new(self.store.location());
        document.set_section(SETTINGS_FIELD, &default_settings())?;
        self.store.save(&document)?;
        log::info!(
            "Initialized settings at {}",
            self.store.location().display()
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;
    use crate::ConfigError;
    use serde_json::json;

    fn store_with(value: serde_json::Value) -> SettingsStore<MemoryDocument> {
        SettingsStore::new(MemoryDocument::with_value(value))
    }

    #[test]
    fn test_get_all() {
        let settings = store_with(json!({"settings": {"autofill-978": "1", "dark": "0"}}));
        let all = settings.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["autofill-978"], "1");
    }

    #[test]
    fn test_set_existing_key() {
        let settings = store_with(json!({"settings": {"autofill-978": "1"}}));
        assert!(settings.set(AUTOFILL_978, "0").unwrap());
        assert_eq!(settings.get_all().unwrap()["autofill-978"], "0");
        assert_eq!(settings.store().save_count(), 1);
    }

    #[test]
    fn test_set_unknown_key_is_ignored() {
        let settings = store_with(json!({"settings": {"autofill-978": "0"}}));
        assert!(!settings.set("nonexistent-key", "1").unwrap());

        let all = settings.get_all().unwrap();
        assert!(!all.contains_key("nonexistent-key"));
        assert_eq!(settings.store().save_count(), 0);
    }

    #[test]
    fn test_set_unchanged_value_skips_write() {
        let settings = store_with(json!({"settings": {"autofill-978": "0"}}));
        assert!(!settings.set(AUTOFILL_978, "0").unwrap());
        assert_eq!(settings.store().save_count(), 0);
    }

    #[test]
    fn test_value_is_not_validated() {
        let settings = store_with(json!({"settings": {"autofill-978": "0"}}));
        assert!(settings.set(AUTOFILL_978, "maybe").unwrap());
        assert_eq!(settings.get(AUTOFILL_978).unwrap().as_deref(), Some("maybe"));
    }

    #[test]
    fn test_is_enabled() {
        let settings = store_with(json!({"settings": {"autofill-978": "1"}}));
        assert!(settings.is_enabled(AUTOFILL_978).unwrap());
        assert!(!settings.is_enabled("missing").unwrap());
    }

    #[test]
    fn test_other_fields_are_preserved() {
        let settings = store_with(json!({"settings": {"autofill-978": "0"}, "theme": "light"}));
        settings.set(AUTOFILL_978, "1").unwrap();
        assert_eq!(
            settings.store().snapshot(),
            Some(json!({"settings": {"autofill-978": "1"}, "theme": "light"}))
        );
    }

    #[test]
    fn test_missing_settings_field() {
        let settings = store_with(json!({"books": []}));
        assert!(matches!(
            settings.get_all(),
            Err(ConfigError::MissingField { .. })
        ));
    }

    #[test]
    fn test_initialize_defaults() {
        let settings = SettingsStore::new(MemoryDocument::empty());
        assert!(settings.initialize_defaults().unwrap());
        assert_eq!(settings.get_all().unwrap(), default_settings());
        assert!(!settings.initialize_defaults().unwrap());
    }
}
