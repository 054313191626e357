//! Domain types for bookscan
//!
//! - `record`: Book records as stored in the books document
//! - `listing`: Projections used when listing the collection
//! - `query`: The two-part title/author lookup query
//! - `entry`: The manual entry form
//! - `common`: Shared traits

mod common;
mod entry;
mod listing;
mod query;
mod record;

pub use common::Validator;
pub use entry::{ManualEntry, PLACEHOLDERS};
pub use listing::{ListEntry, LIST_SEPARATOR};
pub use query::{RecordQuery, NOT_FOUND_MESSAGE};
pub use record::{Author, BookRecord, Identifier, DEFAULT_RECORD_TYPE, ISBN_IDENTIFIER};
