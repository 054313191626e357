// FILE: crates/library/src/manager.rs

use crate::error::LibraryResult;
use crate::inspect::{Inspection, RecordInspector};
use crate::repository::BookRepository;
use crate::resolver::{normalize_isbn, MetadataResolver};
use crate::LibraryConfig;
use bookscan_config::{DocumentStore, JsonFile, Settings, SettingsStore, AUTOFILL_978};
use bookscan_core::{AppError, BookRecord, ListEntry, ManualEntry};
use log::info;

/// Text placed in the ISBN field when the `autofill-978` setting is on
pub const ISBN_PREFIX: &str = "978-";

/// High-level library management
///
/// Ties the book repository, the settings store and a metadata resolver
/// together behind the operations a front end needs.
pub struct LibraryManager<S: DocumentStore, R: MetadataResolver> {
    books: BookRepository<S>,
    settings: SettingsStore<S>,
    resolver: R,
    inspector: RecordInspector,
}

impl<R: MetadataResolver> LibraryManager<JsonFile, R> {
    /// Opens the documents named by `config`
    ///
    /// Nothing is read until the first operation.
    pub fn open(config: &LibraryConfig, resolver: R) -> Self {
        info!(
            "Opening library with books at {} and settings at {}",
            config.books_path.display(),
            config.settings_path.display()
        );

        Self::new(
            BookRepository::open(&config.books_path),
            SettingsStore::open(&config.settings_path),
            resolver,
        )
    }
}

impl<S: DocumentStore, R: MetadataResolver> LibraryManager<S, R> {
    pub fn new(books: BookRepository<S>, settings: SettingsStore<S>, resolver: R) -> Self {
        Self {
            books,
            settings,
            resolver,
            inspector: RecordInspector::new(),
        }
    }

    pub fn books(&self) -> &BookRepository<S> {
        &self.books
    }

    pub fn settings(&self) -> &SettingsStore<S> {
        &self.settings
    }

    /// Creates missing documents with empty/default content
    ///
    /// Returns which documents were created as `(books, settings)`.
    pub fn initialize(&self) -> LibraryResult<(bool, bool)> {
        let books = self.books.initialize()?;
        let settings = self.settings.initialize_defaults()?;
        Ok((books, settings))
    }

    /// Resolves an ISBN without storing anything
    pub fn lookup(&self, isbn: &str) -> LibraryResult<BookRecord> {
        let isbn = normalize_isbn(isbn).map_err(AppError::from)?;
        let record = self.resolver.resolve(&isbn).map_err(AppError::from)?;
        Ok(record)
    }

    /// Summary of the record an ISBN resolves to, or the resolver's message
    pub fn preview(&self, isbn: &str) -> String {
        match self.lookup(isbn) {
            Ok(record) => record.summary(),
            Err(e) => e.to_string(),
        }
    }

    /// Resolves an ISBN and stores the resulting record
    ///
    /// Nothing is written if the resolver fails.
    pub fn add_by_isbn(&self, isbn: &str) -> LibraryResult<BookRecord> {
        let record = self.lookup(isbn)?;
        self.books.add(record.clone())?;
        info!("Added '{}' from ISBN lookup", record.title);
        Ok(record)
    }

    /// Stores a manually entered record
    pub fn add_manual(&self, entry: ManualEntry) -> LibraryResult<BookRecord> {
        let record = entry.into_record()?;
        self.books.add(record.clone())?;
        info!("Added '{}' from manual entry", record.title);
        Ok(record)
    }

    /// Stores a record as-is
    pub fn add_record(&self, record: BookRecord) -> LibraryResult<()> {
        self.books.add(record)
    }

    /// Title and first author of every record
    pub fn list(&self) -> LibraryResult<Vec<ListEntry>> {
        self.books.list()
    }

    /// Looks up a raw `title | author` query
    pub fn inspect(&mut self, raw: &str) -> LibraryResult<&Inspection> {
        self.inspector.inspect(&self.books, raw)
    }

    /// Deletes the record found by the last `inspect`
    pub fn delete_inspected(&mut self) -> LibraryResult<Option<BookRecord>> {
        let removed = self.inspector.delete_inspected(&self.books)?;
        if let Some(record) = &removed {
            info!("Deleted '{}'", record.title);
        }
        Ok(removed)
    }

    /// All settings
    pub fn all_settings(&self) -> LibraryResult<Settings> {
        Ok(self.settings.get_all()?)
    }

    /// Changes an existing setting; returns true if anything was written
    pub fn set_setting(&self, name: &str, value: &str) -> LibraryResult<bool> {
        Ok(self.settings.set(name, value)?)
    }

    /// Initial content of the ISBN field
    pub fn isbn_prefill(&self) -> LibraryResult<&'static str> {
        if self.settings.is_enabled(AUTOFILL_978)? {
            Ok(ISBN_PREFIX)
        } else {
            Ok("")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LibraryError;
    use crate::resolver::StaticResolver;
    use bookscan_config::MemoryDocument;
    use bookscan_core::PLACEHOLDERS;
    use serde_json::json;

    fn dune() -> BookRecord {
        BookRecord::new("Dune", "Frank Herbert", "1990", "9780441172719", "Ace Books")
    }

    fn setup_test_manager(
        autofill: &str,
    ) -> LibraryManager<MemoryDocument, StaticResolver> {
        LibraryManager::new(
            BookRepository::new(MemoryDocument::with_value(json!({ "books": [] }))),
            SettingsStore::new(MemoryDocument::with_value(
                json!({ "settings": { "autofill-978": autofill } }),
            )),
            StaticResolver::new().with_record("9780441172719", &dune()),
        )
    }

    #[test]
    fn test_add_by_isbn() {
        let manager = setup_test_manager("0");

        let record = manager.add_by_isbn("978-0-441-17271-9").unwrap();
        assert_eq!(record, dune());
        assert_eq!(manager.books().records().unwrap(), vec![dune()]);
    }

    #[test]
    fn test_add_by_isbn_resolver_failure_writes_nothing() {
        let manager = setup_test_manager("0");

        let err = manager.add_by_isbn("9780553293357").unwrap_err();
        assert!(matches!(
            err,
            LibraryError::Domain(AppError::ResolverFailed { .. })
        ));
        assert_eq!(
            err.to_string(),
            "An Error Occurred : No metadata found for ISBN 9780553293357"
        );
        assert_eq!(manager.books().store().save_count(), 0);
    }

    #[test]
    fn test_add_by_invalid_isbn() {
        let manager = setup_test_manager("1");
        let err = manager.add_by_isbn("978-").unwrap_err();
        assert_eq!(err.to_string(), "An Error Occurred : '978-' is not a valid ISBN");
    }

    #[test]
    fn test_preview() {
        let manager = setup_test_manager("0");
        assert_eq!(
            manager.preview("9780441172719"),
            "Title : Dune\nAuthor : Frank Herbert\nYear : 1990\nPublisher : Ace Books"
        );
        assert!(manager.preview("0000").starts_with("An Error Occurred : "));
        assert!(manager.books().is_empty().unwrap());
    }

    #[test]
    fn test_add_manual() {
        let manager = setup_test_manager("0");
        let entry = ManualEntry {
            kind: PLACEHOLDERS.kind.to_string(),
            title: "Foundation".to_string(),
            author: "Isaac Asimov".to_string(),
            year: "1951".to_string(),
            isbn: "978-0553293357".to_string(),
            publisher: "Gnome Press".to_string(),
        };

        let record = manager.add_manual(entry).unwrap();
        assert_eq!(record.kind, "book");
        assert_eq!(record.isbn(), Some("9780553293357"));
        assert_eq!(manager.list().unwrap()[0].as_tuple(), ("Foundation", "|", "Isaac Asimov"));
    }

    #[test]
    fn test_add_manual_rejects_placeholders() {
        let manager = setup_test_manager("0");
        let err = manager.add_manual(ManualEntry::default()).unwrap_err();
        assert!(matches!(
            err,
            LibraryError::Domain(AppError::InvalidRecord { .. })
        ));
        assert_eq!(manager.books().store().save_count(), 0);
    }

    #[test]
    fn test_inspect_and_delete() {
        let mut manager = setup_test_manager("0");
        manager.add_record(dune()).unwrap();

        assert!(manager.inspect("Dune | Frank Herbert").unwrap().is_found());
        assert_eq!(manager.delete_inspected().unwrap(), Some(dune()));
        assert!(manager.list().unwrap().is_empty());
    }

    #[test]
    fn test_isbn_prefill() {
        assert_eq!(setup_test_manager("1").isbn_prefill().unwrap(), "978-");
        assert_eq!(setup_test_manager("0").isbn_prefill().unwrap(), "");
    }

    #[test]
    fn test_settings_passthrough() {
        let manager = setup_test_manager("0");
        assert!(manager.set_setting(AUTOFILL_978, "1").unwrap());
        assert!(!manager.set_setting("unknown", "1").unwrap());
        assert_eq!(manager.all_settings().unwrap().len(), 1);
        assert_eq!(manager.isbn_prefill().unwrap(), ISBN_PREFIX);
    }

    #[test]
    fn test_initialize_empty_stores() {
        let manager = LibraryManager::new(
            BookRepository::new(MemoryDocument::empty()),
            SettingsStore::new(MemoryDocument::empty()),
            StaticResolver::new(),
        );

        assert_eq!(manager.initialize().unwrap(), (true, true));
        assert_eq!(manager.initialize().unwrap(), (false, false));
        assert_eq!(manager.isbn_prefill().unwrap(), "");
    }
}
