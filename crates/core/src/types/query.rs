//! Title/author lookup queries

use crate::types::BookRecord;
use std::fmt;

/// Message shown when a query is malformed or matches nothing
pub const NOT_FOUND_MESSAGE: &str = "No books found with that title and author";

/// A parsed lookup query: a title fragment and an exact first-author name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordQuery {
    pub title_fragment: String,
    pub author: String,
}

impl RecordQuery {
    pub fn new(title_fragment: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title_fragment: title_fragment.into(),
            author: author.into(),
        }
    }

    /// Parses a raw `title | author` string
    ///
    /// Literal braces are stripped first, so a line copied from the book
    /// listing (`{The Left Hand of Darkness} | {Ursula K. Le Guin}`) parses
    /// back into its parts. Returns `None` unless there is exactly one `|`.
    pub fn parse(raw: &str) -> Option<Self> {
        let cleaned: String = raw.chars().filter(|c| !matches!(c, '{' | '}')).collect();
        let parts: Vec<&str> = cleaned.split('|').map(str::trim).collect();

        match parts.as_slice() {
            [title, author] => Some(Self::new(*title, *author)),
            _ => None,
        }
    }

    /// Returns true if the record satisfies this query
    pub fn matches(&self, record: &BookRecord) -> bool {
        record.matches(self)
    }
}

impl fmt::Display for RecordQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.title_fragment, self.author)
    }
}
