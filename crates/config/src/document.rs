//! JSON document storage
//!
//! A document is a JSON object whose top-level fields hold the data a store
//! cares about (`books`, `settings`). Stores always read and write whole
//! documents. Fields a caller does not touch are carried through unchanged.
//!
//! Two backends implement [`DocumentStore`]: [`JsonFile`] for files on disk
//! and [`MemoryDocument`] for tests and embedding.

use crate::atomic::write_atomic;
use crate::{ConfigError, ConfigResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A loaded JSON document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    location: PathBuf,
    fields: Map<String, Value>,
}

impl Document {
    /// Creates an empty document for the given location
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            fields: Map::new(),
        }
    }

    /// Wraps a parsed JSON value, which must be an object
    pub fn from_value(location: impl Into<PathBuf>, value: Value) -> ConfigResult<Self> {
        let location = location.into();
        match value {
            Value::Object(fields) => Ok(Self { location, fields }),
            _ => Err(ConfigError::MissingField {
                path: location,
                field: "<root object>".to_string(),
            }),
        }
    }

    /// Where this document was loaded from
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Returns true if the top-level field exists
    pub fn has_section(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Deserializes a top-level field
    ///
    /// A missing field is a `MissingField` error; one that does not have the
    /// expected shape is `InvalidField` carrying the parser's message.
    pub fn section<T: DeserializeOwned>(&self, field: &str) -> ConfigResult<T> {
        let value = self
            .fields
            .get(field)
            .ok_or_else(|| ConfigError::MissingField {
                path: self.location.clone(),
                field: field.to_string(),
            })?;

        T::deserialize(value).map_err(|source| ConfigError::InvalidField {
            path: self.location.clone(),
            field: field.to_string(),
            source,
        })
    }

    /// Replaces a top-level field
    pub fn set_section<T: Serialize>(&mut self, field: &str, value: &T) -> ConfigResult<()> {
        let value = serde_json::to_value(value)?;
        self.fields.insert(field.to_string(), value);
        Ok(())
    }

    /// The document as a JSON value
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Serializes the document to a JSON string
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(&self.fields)?)
    }
}

/// Backend that stores one JSON document
pub trait DocumentStore {
    /// Loads the whole document
    fn load(&self) -> ConfigResult<Document>;

    /// Replaces the whole document
    fn save(&self, document: &Document) -> ConfigResult<()>;

    /// Returns true if a document has been stored
    fn exists(&self) -> bool;

    /// Where the document lives, for messages
    fn location(&self) -> &Path;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn load(&self) -> ConfigResult<Document> {
        (**self).load()
    }

    fn save(&self, document: &Document) -> ConfigResult<()> {
        (**self).save(document)
    }

    fn exists(&self) -> bool {
        (**self).exists()
    }

    fn location(&self) -> &Path {
        (**self).location()
    }
}

/// A JSON document in a file on disk
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for JsonFile {
    fn load(&self) -> ConfigResult<Document> {
        let contents = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::DocumentNotFound {
                path: self.path.clone(),
            },
            _ => ConfigError::ReadError {
                path: self.path.clone(),
                source: e,
            },
        })?;

        if contents.trim().is_empty() {
            return Err(ConfigError::ReadError {
                path: self.path.clone(),
                source: std::io::Error::new(
                    ErrorKind::InvalidData,
                    "Document is empty or contains only whitespace",
                ),
            });
        }

        let value: Value =
            serde_json::from_str(&contents).map_err(|e| ConfigError::JsonParseError {
                path: self.path.clone(),
                source: e,
            })?;

        Document::from_value(self.path.clone(), value)
    }

    fn save(&self, document: &Document) -> ConfigResult<()> {
        let json = document.to_json()?;
        write_atomic(&self.path, &json)?;
        log::debug!("Wrote {} bytes to {}", json.len(), self.path.display());
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

/// An in-memory document
///
/// Counts saves so callers can check that an operation did not write.
#[derive(Debug)]
pub struct MemoryDocument {
    location: PathBuf,
    value: Mutex<Option<Value>>,
    saves: AtomicUsize,
}

impl MemoryDocument {
    const LOCATION: &'static str = ":memory:";

    /// A store with no document in it; loading fails with `DocumentNotFound`
    pub fn empty() -> Self {
        Self {
            location: PathBuf::from(Self::LOCATION),
            value: Mutex::new(None),
            saves: AtomicUsize::new(0),
        }
    }

    /// A store holding `value`, which need not be a valid document
    pub fn with_value(value: Value) -> Self {
        Self {
            location: PathBuf::from(Self::LOCATION),
            value: Mutex::new(Some(value)),
            saves: AtomicUsize::new(0),
        }
    }

    /// A copy of the stored value
    pub fn snapshot(&self) -> Option<Value> {
        self.value.lock().ok().and_then(|guard| guard.clone())
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn poisoned(&self) -> ConfigError {
        ConfigError::IoError(std::io::Error::other("memory document lock poisoned"))
    }
}

impl DocumentStore for MemoryDocument {
    fn load(&self) -> ConfigResult<Document> {
        let guard = self.value.lock().map_err(|_| self.poisoned())?;
        let value = guard.clone().ok_or_else(|| ConfigError::DocumentNotFound {
            path: self.location.clone(),
        })?;
        Document::from_value(self.location.clone(), value)
    }

    fn save(&self, document: &Document) -> ConfigResult<()> {
        let mut guard = self.value.lock().map_err(|_| self.poisoned())?;
        *guard = Some(document.to_value());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn exists(&self) -> bool {
        self.value.lock().map(|guard| guard.is_some()).unwrap_or(false)
    }

    fn location(&self) -> &Path {
        &self.location
    }
}
