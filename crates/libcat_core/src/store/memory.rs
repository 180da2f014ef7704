//! In-memory record store.

use super::{RecordStore, StoreError, StoreResult};
use crate::model::book::Book;
use std::cell::{Cell, RefCell};
use std::io::{Error, ErrorKind};
use std::path::PathBuf;

const MEMORY_PATH: &str = ":memory:";

/// Record store holding the last saved list in memory.
///
/// Useful for tests and for callers that embed a catalog without a file.
#[derive(Debug, Default)]
pub struct MemoryStore {
    books: RefCell<Vec<Book>>,
    read_only: Cell<bool>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose first `load` returns `books`.
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RefCell::new(books),
            ..Self::default()
        }
    }

    /// Makes every later `save` fail with a permission-denied [`StoreError::Io`].
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    /// Snapshot of the last successfully saved list.
    pub fn snapshot(&self) -> Vec<Book> {
        self.books.borrow().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> StoreResult<Vec<Book>> {
        Ok(self.books.borrow().clone())
    }

    fn save(&self, books: &[Book]) -> StoreResult<()> {
        if self.read_only.get() {
            return Err(StoreError::Io {
                action: "write",
                path: PathBuf::from(MEMORY_PATH),
                source: Error::new(ErrorKind::PermissionDenied, "store is read-only"),
            });
        }
        *self.books.borrow_mut() = books.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
