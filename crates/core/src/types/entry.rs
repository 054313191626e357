//! Manual entry form
//!
//! Each field starts out holding a placeholder label. A record is only
//! produced once every field except the type has been replaced with real
//! input. An empty or untouched type falls back to `book`.

use crate::error::{AppError, Result};
use crate::types::{BookRecord, DEFAULT_RECORD_TYPE};

/// Placeholder labels shown in an untouched form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholders {
    pub kind: &'static str,
    pub title: &'static str,
    pub author: &'static str,
    pub year: &'static str,
    pub isbn: &'static str,
    pub publisher: &'static str,
}

pub const PLACEHOLDERS: Placeholders = Placeholders {
    kind: "Type",
    title: "Title",
    author: "Author",
    year: "Year",
    isbn: "ISBN",
    publisher: "Publisher",
};

/// Field values of the manual entry form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualEntry {
    pub kind: String,
    pub title: String,
    pub author: String,
    pub year: String,
    pub isbn: String,
    pub publisher: String,
}

impl Default for ManualEntry {
    fn default() -> Self {
        Self {
            kind: PLACEHOLDERS.kind.to_string(),
            title: PLACEHOLDERS.title.to_string(),
            author: PLACEHOLDERS.author.to_string(),
            year: PLACEHOLDERS.year.to_string(),
            isbn: PLACEHOLDERS.isbn.to_string(),
            publisher: PLACEHOLDERS.publisher.to_string(),
        }
    }
}

impl ManualEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores every field to its placeholder
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Converts the form into a record
    ///
    /// Hyphens are stripped from the ISBN before it is checked.
    pub fn into_record(self) -> Result<BookRecord> {
        let kind = if self.kind.is_empty() || self.kind == PLACEHOLDERS.kind {
            DEFAULT_RECORD_TYPE.to_string()
        } else {
            self.kind
        };

        let isbn = self.isbn.replace('-', "");

        for (field, value, placeholder) in [
            ("title", &self.title, PLACEHOLDERS.title),
            ("author", &self.author, PLACEHOLDERS.author),
            ("year", &self.year, PLACEHOLDERS.year),
            ("isbn", &isbn, PLACEHOLDERS.isbn),
            ("publisher", &self.publisher, PLACEHOLDERS.publisher),
        ] {
            if value == placeholder {
                return Err(AppError::InvalidRecord {
                    field: field.to_string(),
                    reason: "still holds its placeholder".to_string(),
                });
            }
        }

        if self.title.trim().is_empty() {
            return Err(AppError::InvalidRecord {
                field: "title".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(BookRecord::new(self.title, self.author, self.year, isbn, self.publisher).with_kind(kind))
    }
}
