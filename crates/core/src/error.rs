//! Domain error types for bookscan
//!
//! Storage failures live in `bookscan-config`; the errors here describe
//! problems with the records themselves and with the metadata resolver.

use std::fmt;
use thiserror::Error;

use crate::types::NOT_FOUND_MESSAGE;

/// Main domain error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A record was rejected before it reached storage
    #[error("Invalid record: {field} {reason}")]
    InvalidRecord { field: String, reason: String },

    /// A stored record lacks a field a projection needs
    #[error("Record '{title}' has no {field}")]
    RecordShape { title: String, field: String },

    /// The metadata resolver could not produce a record
    #[error("An Error Occurred : {message}")]
    ResolverFailed { message: String },

    /// Lookup matched nothing
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,
}

impl AppError {
    /// Returns a user-friendly error message suitable for display
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRecord { field, .. } => {
                format!("Please fill in the {} field before submitting.", field)
            }
            Self::RecordShape { title, .. } => format!(
                "The record '{}' is damaged and cannot be shown. Check the books file.",
                title
            ),
            // Resolver messages are shown verbatim
            Self::ResolverFailed { .. } => self.to_string(),
            Self::NotFound => NOT_FOUND_MESSAGE.to_string(),
        }
    }

    /// Helper to wrap any resolver failure
    pub fn resolver(message: impl fmt::Display) -> Self {
        Self::ResolverFailed {
            message: message.to_string(),
        }
    }
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_message_is_verbatim() {
        let err = AppError::resolver("rate limit exceeded");
        assert_eq!(err.to_string(), "An Error Occurred : rate limit exceeded");
        assert_eq!(err.user_message(), err.to_string());
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            AppError::NotFound.to_string(),
            "No books found with that title and author"
        );
    }

    #[test]
    fn test_record_shape_message() {
        let err = AppError::RecordShape {
            title: "Beowulf".to_string(),
            field: "author".to_string(),
        };
        assert_eq!(err.to_string(), "Record 'Beowulf' has no author");
        assert!(err.user_message().contains("Check the books file"));
    }

    #[test]
    fn test_invalid_record_user_message() {
        let err = AppError::InvalidRecord {
            field: "year".to_string(),
            reason: "still holds its placeholder".to_string(),
        };
        assert!(err.user_message().contains("year"));
    }
}
