// FILE: crates/library/src/repository.rs

//! Book repository
//!
//! Records live in the `books` array of a JSON document. Every operation
//! loads the whole document, works on it in memory, and, if it changed
//! anything, writes the whole document back. There is no caching between
//! calls and no locking: concurrent writers race and the last one wins.

use crate::error::LibraryResult;
use bookscan_config::{Document, DocumentStore, JsonFile};
use bookscan_core::{AppError, BookRecord, ListEntry, RecordQuery};
use std::path::PathBuf;

/// Top-level field holding the book collection
pub const BOOKS_FIELD: &str = "books";

/// Durable storage of the book collection
#[derive(Debug)]
pub struct BookRepository<S: DocumentStore> {
    store: S,
}

impl BookRepository<JsonFile> {
    /// Opens a books document on disk
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(JsonFile::new(path))
    }
}

impl<S: DocumentStore> BookRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying document store
    pub fn store(&self) -> &S {
        &self.store
    }

    fn load(&self) -> LibraryResult<(Document, Vec<BookRecord>)> {
        let document = self.store.load()?;
        let records = document.section(BOOKS_FIELD)?;
        Ok((document, records))
    }

    fn persist(&self, mut document: Document, records: &[BookRecord]) -> LibraryResult<()> {
        document.set_section(BOOKS_FIELD, &records)?;
        self.store.save(&document)?;
        Ok(())
    }

    /// Appends a record to the end of the collection
    pub fn add(&self, record: BookRecord) -> LibraryResult<()> {
        let (document, mut records) = self.load()?;
        log::debug!("Adding '{}' as record {}", record.title, records.len() + 1);
        records.push(record);
        self.persist(document, &records)
    }

    /// Title and first author of every record, in storage order
    ///
    /// Fails with `RecordShape` if any record has no authors.
    pub fn list(&self) -> LibraryResult<Vec<ListEntry>> {
        let (_, records) = self.load()?;
        records
            .iter()
            .map(|record| {
                ListEntry::from_record(record).ok_or_else(|| {
                    AppError::RecordShape {
                        title: record.title.clone(),
                        field: "author".to_string(),
                    }
                    .into()
                })
            })
            .collect()
    }

    /// Every record, in storage order
    pub fn records(&self) -> LibraryResult<Vec<BookRecord>> {
        Ok(self.load()?.1)
    }

    /// Number of stored records
    pub fn len(&self) -> LibraryResult<usize> {
        Ok(self.load()?.1.len())
    }

    pub fn is_empty(&self) -> LibraryResult<bool> {
        Ok(self.len()? == 0)
    }

    /// First record matching the query, in storage order
    pub fn find(&self, query: &RecordQuery) -> LibraryResult<Option<BookRecord>> {
        let (_, records) = self.load()?;
        Ok(records.into_iter().find(|record| query.matches(record)))
    }

    /// Parses `raw` as a `title | author` query and finds it
    ///
    /// A malformed query is not found and storage is not read.
    pub fn find_raw(&self, raw: &str) -> LibraryResult<Option<BookRecord>> {
        match RecordQuery::parse(raw) {
            Some(query) => self.find(&query),
            None => {
                log::debug!("Malformed query {:?}", raw);
                Ok(None)
            }
        }
    }

    /// Removes the first record matching the query
    ///
    /// Returns the removed record. When nothing matches the document is not
    /// rewritten.
    pub fn delete(&self, query: &RecordQuery) -> LibraryResult<Option<BookRecord>> {
        let (document, mut records) = self.load()?;

        let Some(index) = records.iter().position(|record| query.matches(record)) else {
            return Ok(None);
        };

        let removed = records.remove(index);
        log::debug!("Deleting '{}' at position {}", removed.title, index);
        self.persist(document, &records)?;
        Ok(Some(removed))
    }

    /// Parses `raw` as a `title | author` query and deletes it
    pub fn delete_raw(&self, raw: &str) -> LibraryResult<Option<BookRecord>> {
        match RecordQuery::parse(raw) {
            Some(query) => self.delete(&query),
            None => {
                log::debug!("Malformed query {:?}", raw);
                Ok(None)
            }
        }
    }

    /// Creates an empty books document if none exists
    ///
    /// Returns true if a document was created.
    pub fn initialize(&self) -> LibraryResult<bool> {
        if self.store.exists() {
            return Ok(false);
        }

        let document = Document::new(self.store.location());
        self.persist(document, &[])?;
        log::info!("Initialized books at {}", self.store.location().display());
        Ok(true)
    }
}
