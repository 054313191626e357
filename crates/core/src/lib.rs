pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use types::{
    Author, BookRecord, Identifier, ListEntry, ManualEntry, RecordQuery, Validator,
    DEFAULT_RECORD_TYPE, ISBN_IDENTIFIER, LIST_SEPARATOR, NOT_FOUND_MESSAGE, PLACEHOLDERS,
};
