// FILE: crates/library/src/inspect.rs

//! Inspect-then-delete flow
//!
//! The inspector remembers the outcome of the last lookup so that a delete
//! request following a failed lookup returns immediately instead of
//! reading and scanning the books document again.

use crate::error::LibraryResult;
use crate::repository::BookRepository;
use bookscan_config::DocumentStore;
use bookscan_core::{BookRecord, RecordQuery, NOT_FOUND_MESSAGE};

/// Outcome of inspecting a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inspection {
    Found {
        query: RecordQuery,
        record: BookRecord,
    },
    NotFound,
}

impl Inspection {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn record(&self) -> Option<&BookRecord> {
        match self {
            Self::Found { record, .. } => Some(record),
            Self::NotFound => None,
        }
    }

    /// Text shown to the user for this outcome
    pub fn message(&self) -> String {
        match self {
            Self::Found { record, .. } => record.summary(),
            Self::NotFound => NOT_FOUND_MESSAGE.to_string(),
        }
    }
}

/// Tracks the last inspection between an inspect and a delete
#[derive(Debug, Default)]
pub struct RecordInspector {
    last: Option<Inspection>,
}

impl RecordInspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a raw `title | author` query and remembers the outcome
    pub fn inspect<S: DocumentStore>(
        &mut self,
        repository: &BookRepository<S>,
        raw: &str,
    ) -> LibraryResult<&Inspection> {
        let inspection = match RecordQuery::parse(raw) {
            Some(query) => match repository.find(&query)? {
                Some(record) => Inspection::Found { query, record },
                None => Inspection::NotFound,
            },
            None => Inspection::NotFound,
        };

        let inspection: &Inspection = self.last.insert(inspection);
        Ok(inspection)
    }

    /// The remembered outcome, if any
    pub fn last(&self) -> Option<&Inspection> {
        self.last.as_ref()
    }

    /// Deletes the record found by the last inspection
    ///
    /// Returns `Ok(None)` without touching storage when nothing was
    /// inspected or the last inspection found nothing. The remembered
    /// outcome is cleared after a delete.
    pub fn delete_inspected<S: DocumentStore>(
        &mut self,
        repository: &BookRepository<S>,
    ) -> LibraryResult<Option<BookRecord>> {
        let Some(Inspection::Found { query, .. }) = &self.last else {
            return Ok(None);
        };

        let removed = repository.delete(query)?;
        self.last = None;
        Ok(removed)
    }

    /// Forgets the last inspection
    pub fn clear(&mut self) {
        self.last = None;
    }
}
