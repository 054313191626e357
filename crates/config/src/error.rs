//! Error types for configuration and document storage

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while reading or writing config files and
/// JSON documents
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Document does not exist
    #[error("Document not found at {path}")]
    DocumentNotFound { path: PathBuf },

    /// Failed to read a file
    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("Failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse the TOML config file
    #[error("Failed to parse config file at {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Failed to parse a JSON document
    #[error("Failed to parse document at {path}: {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Document parsed but is not an object with the expected field
    #[error("Document at {path} has no '{field}' field")]
    MissingField { path: PathBuf, field: String },

    /// A field is present but its content has the wrong shape
    #[error("Field '{field}' in {path} is malformed: {source}")]
    InvalidField {
        path: PathBuf,
        field: String,
        source: serde_json::Error,
    },

    /// Failed to serialize config
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Failed to serialize a JSON document
    #[error("Failed to serialize document: {0}")]
    JsonSerializeError(#[from] serde_json::Error),

    /// Config file contains invalid values
    #[error("Config validation failed: {0}")]
    ValidationError(String),

    /// Failed to create a directory
    #[error("Failed to create directory at {path}: {source}")]
    DirectoryCreationError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config directory path could not be determined
    #[error("Could not determine config directory path: {reason}")]
    PathResolutionError { reason: String },

    /// Failed to create backup of old config
    #[error("Failed to backup config file: {source}")]
    BackupError { source: std::io::Error },

    /// Generic I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Returns true if a document was missing, unreadable, or malformed
    /// when it was loaded
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(
            self,
            Self::DocumentNotFound { .. }
                | Self::ReadError { .. }
                | Self::ParseError { .. }
                | Self::JsonParseError { .. }
                | Self::MissingField { .. }
                | Self::InvalidField { .. }
        )
    }
}

/// Validation error for a specific config field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Path to the field (e.g., "storage.books_file")
    pub field: String,

    /// Human-readable error message
    pub message: String,

    /// The invalid value, if available
    pub value: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Creates a validation error with the invalid value
    pub fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: Some(value.to_string()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field '{}': {}", self.field, self.message)?;
        if let Some(ref value) = self.value {
            write!(f, " (got: {})", value)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("storage.books_file", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Field 'storage.books_file': must not be empty"
        );
    }

    #[test]
    fn test_validation_error_with_value() {
        let err = ValidationError::with_value(
            "storage.books_file",
            "must be a plain file name",
            "a/b.json",
        );
        assert_eq!(
            err.to_string(),
            "Field 'storage.books_file': must be a plain file name (got: a/b.json)"
        );
    }

    #[test]
    fn test_storage_unavailable_classification() {
        let missing = ConfigError::DocumentNotFound {
            path: PathBuf::from("books.json"),
        };
        assert!(missing.is_storage_unavailable());

        let field = ConfigError::MissingField {
            path: PathBuf::from("books.json"),
            field: "books".to_string(),
        };
        assert!(field.is_storage_unavailable());

        let write = ConfigError::WriteError {
            path: PathBuf::from("books.json"),
            source: std::io::Error::other("disk full"),
        };
        assert!(!write.is_storage_unavailable());
    }
}
