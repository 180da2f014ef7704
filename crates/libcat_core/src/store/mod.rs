//! Record store boundary and implementations.
//!
//! # Responsibility
//! - Define the load/save contract the catalog persists through.
//! - Keep file format details out of catalog logic.
//!
//! # Invariants
//! - `save` always replaces the whole persisted list.
//! - `load` of a never-saved store yields an empty list, not an error.
//! - Malformed persisted data is reported, never repaired or skipped.

use crate::model::book::Book;
use std::path::PathBuf;
use thiserror::Error;

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to {action} `{}`: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog file `{}`: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize catalog: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Full-list persistence contract used by the catalog.
pub trait RecordStore {
    fn load(&self) -> StoreResult<Vec<Book>>;
    fn save(&self, books: &[Book]) -> StoreResult<()>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn load(&self) -> StoreResult<Vec<Book>> {
        (**self).load()
    }

    fn save(&self, books: &[Book]) -> StoreResult<()> {
        (**self).save(books)
    }
}
