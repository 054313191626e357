//! bookscan Library Management
//!
//! Orchestration layer over the book and settings documents. Provides the
//! book repository, the inspect-then-delete flow and ISBN-driven adds
//! through a pluggable metadata resolver.

pub mod error;
pub mod inspect;
pub mod manager;
pub mod repository;
pub mod resolver;

pub use error::{LibraryError, LibraryResult};
pub use inspect::{Inspection, RecordInspector};
pub use manager::{LibraryManager, ISBN_PREFIX};
pub use repository::{BookRepository, BOOKS_FIELD};
pub use resolver::{
    normalize_isbn, parse_resolver_output, MetadataResolver, ResolverError, StaticResolver,
};

use bookscan_config::{Config, ConfigManager};
use std::path::{Path, PathBuf};

/// Library configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Books document path
    pub books_path: PathBuf,
    /// Settings document path
    pub settings_path: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self::in_directory("data")
    }
}

impl LibraryConfig {
    pub fn new(books_path: impl Into<PathBuf>, settings_path: impl Into<PathBuf>) -> Self {
        Self {
            books_path: books_path.into(),
            settings_path: settings_path.into(),
        }
    }

    /// `books.json` and `settings.json` inside `dir`
    pub fn in_directory(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join("books.json"), dir.join("settings.json"))
    }

    /// Paths named by an application config
    pub fn from_config(manager: &ConfigManager, config: &Config) -> Self {
        Self::new(manager.books_path(config), manager.settings_path(config))
    }

    /// Directories that must exist before the documents can be written
    pub fn directories(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = [&self.books_path, &self.settings_path]
            .iter()
            .filter_map(|path| path.parent())
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .collect();
        dirs.dedup();
        dirs
    }
}
