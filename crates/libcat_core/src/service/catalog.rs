//! Catalog use-case service.
//!
//! # Responsibility
//! - Hold the current record list and apply add/remove/status changes.
//! - Persist the full list through a [`RecordStore`] on every mutation.
//!
//! # Invariants
//! - Record ids are unique within a catalog.
//! - After a mutating call returns `Ok`, memory and store hold the same list.
//! - A failed save rolls the in-memory mutation back before the error returns.
//! - No method prompts, prints or exits; callers own all interaction.

use crate::id::{IdGenerator, UuidV4Ids};
use crate::model::book::{Book, BookId, BookStatus, InvalidStatus};
use crate::search::search_books;
use crate::store::{RecordStore, StoreError};
use log::{info, warn};
use std::collections::HashSet;
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-level failure.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    InvalidStatus(#[from] InvalidStatus),
    #[error("duplicate book id `{0}`")]
    DuplicateId(BookId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// In-memory catalog with write-through persistence.
pub struct Catalog<S: RecordStore, G: IdGenerator = UuidV4Ids> {
    store: S,
    ids: G,
    books: Vec<Book>,
}

impl<S: RecordStore> Catalog<S, UuidV4Ids> {
    /// Loads the catalog from `store`, generating UUID v4 ids for new books.
    pub fn open(store: S) -> CatalogResult<Self> {
        Self::open_with_ids(store, UuidV4Ids)
    }
}

impl<S: RecordStore, G: IdGenerator> Catalog<S, G> {
    /// Loads the catalog from `store` with an injected id generator.
    ///
    /// # Errors
    /// - Store load failures, including malformed files.
    /// - `DuplicateId` when the persisted list repeats an id.
    pub fn open_with_ids(store: S, ids: G) -> CatalogResult<Self> {
        let books = store.load()?;

        let mut seen = HashSet::with_capacity(books.len());
        if let Some(dup) = books.iter().find(|book| !seen.insert(book.id.as_str())) {
            warn!(
                "event=catalog_open module=catalog status=error error_code=duplicate_id book_id={}",
                dup.id
            );
            return Err(CatalogError::DuplicateId(dup.id.clone()));
        }

        info!(
            "event=catalog_open module=catalog status=ok count={}",
            books.len()
        );
        Ok(Self { store, ids, books })
    }

    /// Adds an available book under a fresh id and persists the catalog.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
    ) -> CatalogResult<Book> {
        let id = self.ids.next_id();
        if self.position(&id).is_some() {
            warn!(
                "event=book_add module=catalog status=error error_code=duplicate_id book_id={id}"
            );
            return Err(CatalogError::DuplicateId(id));
        }

        let book = Book::new(id, title, author, year);
        self.books.push(book.clone());
        if let Err(err) = self.persist() {
            self.books.pop();
            return Err(err);
        }

        info!(
            "event=book_add module=catalog status=ok book_id={} count={}",
            book.id,
            self.books.len()
        );
        Ok(book)
    }

    /// Removes the book with `id`.
    ///
    /// Returns `Ok(false)` without writing when no book has that id.
    pub fn remove(&mut self, id: &str) -> CatalogResult<bool> {
        let Some(index) = self.position(id) else {
            info!("event=book_remove module=catalog status=not_found book_id={id}");
            return Ok(false);
        };

        let removed = self.books.remove(index);
        if let Err(err) = self.persist() {
            self.books.insert(index, removed);
            return Err(err);
        }

        info!(
            "event=book_remove module=catalog status=ok book_id={id} count={}",
            self.books.len()
        );
        Ok(true)
    }

    /// Returns books whose title or author contains `keyword` (any case), or
    /// whose year equals it. The empty keyword returns every book.
    pub fn search(&self, keyword: &str) -> Vec<Book> {
        search_books(&self.books, keyword)
    }

    /// All books in insertion order.
    pub fn list(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Parses `status` and applies it to the book with `id`.
    ///
    /// The status text is validated before the lookup, so an invalid value is
    /// rejected even for unknown ids.
    ///
    /// Returns `Ok(None)` when no book has that id.
    pub fn change_status(&mut self, id: &str, status: &str) -> CatalogResult<Option<Book>> {
        let status = status.parse::<BookStatus>().inspect_err(|err| {
            warn!(
                "event=book_status module=catalog status=error error_code=invalid_status book_id={id} value_len={}",
                err.0.len()
            );
        })?;
        self.set_status(id, status)
    }

    /// Applies a typed status to the book with `id`.
    ///
    /// Setting the current status again still persists.
    pub fn set_status(&mut self, id: &str, status: BookStatus) -> CatalogResult<Option<Book>> {
        let Some(index) = self.position(id) else {
            info!("event=book_status module=catalog status=not_found book_id={id}");
            return Ok(None);
        };

        let previous = std::mem::replace(&mut self.books[index].status, status);
        if let Err(err) = self.persist() {
            self.books[index].status = previous;
            return Err(err);
        }

        info!(
            "event=book_status module=catalog status=ok book_id={id} from={previous} to={status}"
        );
        Ok(Some(self.books[index].clone()))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    fn persist(&self) -> CatalogResult<()> {
        self.store.save(&self.books).map_err(|err| {
            warn!(
                "event=catalog_persist module=catalog status=error count={} error={}",
                self.books.len(),
                err
            );
            CatalogError::Store(err)
        })
    }
}
