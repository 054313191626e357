//! Book record domain model
//!
//! A record mirrors one entry of the `books` array in the books document.
//! Field names on the wire follow the bibliographic JSON format produced by
//! the metadata resolver, so resolver output can be stored without reshaping.

use crate::types::{RecordQuery, Validator};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record type used when none is supplied
pub const DEFAULT_RECORD_TYPE: &str = "book";

/// Identifier type used for ISBN entries
pub const ISBN_IDENTIFIER: &str = "ISBN";

fn default_record_type() -> String {
    DEFAULT_RECORD_TYPE.to_string()
}

/// A single author entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A typed identifier such as an ISBN
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl Identifier {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Creates an ISBN identifier
    pub fn isbn(id: impl Into<String>) -> Self {
        Self::new(ISBN_IDENTIFIER, id)
    }
}

/// One book's bibliographic data as stored
///
/// Only `title` is required when reading. Missing authors surface later as
/// a `RecordShape` error from the projections that need them; the other
/// typed fields default to empty. Fields this type does not know are kept in
/// `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(rename = "type", default = "default_record_type")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub author: Vec<Author>,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub identifier: Vec<Identifier>,
    #[serde(default)]
    pub publisher: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BookRecord {
    /// Creates a record with a single author and a single ISBN identifier
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
        isbn: impl Into<String>,
        publisher: impl Into<String>,
    ) -> Self {
        Self {
            kind: default_record_type(),
            title: title.into(),
            author: vec![Author::new(author)],
            year: year.into(),
            identifier: vec![Identifier::isbn(isbn)],
            publisher: publisher.into(),
            extra: Map::new(),
        }
    }

    /// Sets the record type
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Name of the first author, if the record has any
    pub fn primary_author(&self) -> Option<&str> {
        self.author.first().map(|a| a.name.as_str())
    }

    /// First identifier of type ISBN, if present
    pub fn isbn(&self) -> Option<&str> {
        self.identifier
            .iter()
            .find(|i| i.kind.eq_ignore_ascii_case(ISBN_IDENTIFIER))
            .map(|i| i.id.as_str())
    }

    /// Returns true if the record satisfies the title/author query
    ///
    /// The author must equal the first author's name exactly and the title
    /// must contain the fragment. Both comparisons are case-sensitive.
    pub fn matches(&self, query: &RecordQuery) -> bool {
        self.primary_author() == Some(query.author.as_str())
            && self.title.contains(query.title_fragment.as_str())
    }

    /// Multi-line summary shown when a record is inspected
    pub fn summary(&self) -> String {
        [
            format!("Title : {}", self.title),
            format!("Author : {}", self.primary_author().unwrap_or_default()),
            format!("Year : {}", self.year),
            format!("Publisher : {}", self.publisher),
        ]
        .join("\n")
    }
}

impl Validator for BookRecord {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("Title cannot be empty".to_string());
        }

        if self.author.is_empty() {
            errors.push("At least one author is required".to_string());
        }

        if self.author.iter().any(|a| a.name.trim().is_empty()) {
            errors.push("Author names cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> BookRecord {
        BookRecord::new("Dune", "Herbert", "1965", "9780441013593", "Ace")
    }

    #[test]
    fn test_new_record_defaults() {
        let record = dune();
        assert_eq!(record.kind, DEFAULT_RECORD_TYPE);
        assert_eq!(record.primary_author(), Some("Herbert"));
        assert_eq!(record.isbn(), Some("9780441013593"));
    }

    #[test]
    fn test_wire_format_field_names() {
        let value = serde_json::to_value(dune()).unwrap();
        assert_eq!(value["type"], "book");
        assert_eq!(value["author"][0]["name"], "Herbert");
        assert_eq!(value["identifier"][0]["type"], "ISBN");
        assert_eq!(value["identifier"][0]["id"], "9780441013593");
    }

    #[test]
    fn test_missing_type_defaults_to_book() {
        let json = r#"{"title":"Dune","author":[{"name":"Herbert"}],"year":"1965",
            "identifier":[{"type":"ISBN","id":"9780441013593"}],"publisher":"Ace"}"#;
        let record: BookRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, "book");
    }

    #[test]
    fn test_missing_title_is_rejected() {
        let json = r#"{"author":[{"name":"Herbert"}],"year":"1965","identifier":[],"publisher":"Ace"}"#;
        assert!(serde_json::from_str::<BookRecord>(json).is_err());
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let json = r#"{"type":"book","title":"Dune","author":[{"name":"Herbert"}],
            "year":"1965","identifier":[],"publisher":"Ace","language":"en",
            "tags":["classic"]}"#;
        let record: BookRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.extra["language"], "en");

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["language"], "en");
        assert_eq!(value["tags"][0], "classic");
        assert_eq!(value["title"], "Dune");
    }

    #[test]
    fn test_non_projected_fields_default_when_missing() {
        let json = r#"{"title":"Dune","author":[{"name":"Herbert"}]}"#;
        let record: BookRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.year, "");
        assert_eq!(record.publisher, "");
        assert!(record.identifier.is_empty());
        assert_eq!(record.primary_author(), Some("Herbert"));
    }

    #[test]
    fn test_missing_author_reads_as_authorless() {
        let record: BookRecord = serde_json::from_str(r#"{"title":"Dune"}"#).unwrap();
        assert!(record.author.is_empty());
        assert!(!record.is_valid());
    }

    #[test]
    fn test_matches_requires_exact_first_author() {
        let record = dune();
        assert!(record.matches(&RecordQuery::new("Dun", "Herbert")));
        assert!(!record.matches(&RecordQuery::new("Dun", "Asimov")));
        assert!(!record.matches(&RecordQuery::new("Dun", "herbert")));
        assert!(!record.matches(&RecordQuery::new("dune", "Herbert")));
    }

    #[test]
    fn test_matches_ignores_secondary_authors() {
        let mut record = dune();
        record.author.push(Author::new("Anderson"));
        assert!(!record.matches(&RecordQuery::new("Dune", "Anderson")));
    }

    #[test]
    fn test_authorless_record_never_matches() {
        let mut record = dune();
        record.author.clear();
        assert!(!record.matches(&RecordQuery::new("", "")));
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            dune().summary(),
            "Title : Dune\nAuthor : Herbert\nYear : 1965\nPublisher : Ace"
        );
    }

    #[test]
    fn test_validation() {
        assert!(dune().is_valid());

        let mut no_title = dune();
        no_title.title = "  ".to_string();
        assert!(!no_title.is_valid());

        let mut no_author = dune();
        no_author.author.clear();
        let errors = no_author.validate().unwrap_err();
        assert_eq!(errors, vec!["At least one author is required".to_string()]);
    }
}
