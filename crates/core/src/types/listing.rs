//! Listing projections

use crate::types::BookRecord;
use std::fmt;

/// Separator placed between title and author in a listing
pub const LIST_SEPARATOR: &str = "|";

/// One line of the book listing: title, separator, first author
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListEntry {
    pub title: String,
    pub separator: &'static str,
    pub author: String,
}

impl ListEntry {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            separator: LIST_SEPARATOR,
            author: author.into(),
        }
    }

    /// Projects a record, or `None` if it has no authors
    pub fn from_record(record: &BookRecord) -> Option<Self> {
        record
            .primary_author()
            .map(|author| Self::new(record.title.as_str(), author))
    }

    pub fn as_tuple(&self) -> (&str, &str, &str) {
        (&self.title, self.separator, &self.author)
    }
}

// Fields containing whitespace are braced so the line survives being pasted
// back in as a query. Queries have no escape syntax: a field containing `|`,
// or an author containing `{` or `}`, yields a line that does not find its
// record again.
fn braced(field: &str) -> String {
    if field.is_empty() || field.chars().any(char::is_whitespace) {
        format!("{{{}}}", field)
    } else {
        field.to_string()
    }
}

impl fmt::Display for ListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            braced(&self.title),
            self.separator,
            braced(&self.author)
        )
    }
}
