//! Property tests for configuration serialization

use bookscan_config::{Config, ConfigManager, LogLevel};
use tempfile::TempDir;

#[test]
fn property_serialization_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let toml_string = toml::to_string(&config)?;
    let deserialized: Config = toml::from_str(&toml_string)?;
    assert_eq!(config, deserialized);
    Ok(())
}

#[test]
fn property_partial_file_fills_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let config: Config = toml::from_str("[app]\nlog_level = \"debug\"\n")?;
    assert_eq!(config.app.log_level, LogLevel::Debug);
    assert_eq!(config.storage, Config::default().storage);
    Ok(())
}

#[test]
fn property_load_save_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf())?;

    manager.save(&Config::default())?;
    let loaded = manager.load()?;
    manager.save(&loaded)?;
    let loaded2 = manager.load()?;
    assert_eq!(loaded, loaded2);
    Ok(())
}

#[test]
fn property_validation_deterministic() {
    let mut config = Config::default();
    config.storage.books_file = "../books.json".to_string();

    let result1 = config.validate();
    let result2 = config.validate();
    assert_eq!(result1, result2);
    assert!(result1.is_err());
}
