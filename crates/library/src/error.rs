// FILE: crates/library/src/error.rs

use bookscan_config::ConfigError;
use bookscan_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Storage error: {0}")]
    Storage(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] AppError),
}

impl LibraryError {
    /// True when a backing document is missing, unreadable, or malformed
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_storage_unavailable())
    }

    /// Message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::Storage(e) if e.is_storage_unavailable() => {
                format!("Book data could not be loaded: {}", e)
            }
            Self::Storage(e) => format!("Book data could not be saved: {}", e),
            Self::Domain(e) => e.user_message(),
        }
    }
}

pub type LibraryResult<T> = std::result::Result<T, LibraryError>;
