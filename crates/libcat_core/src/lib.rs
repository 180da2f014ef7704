//! Core domain logic for libcat.
//! This crate owns catalog invariants and the on-disk format.

pub mod id;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod store;

pub use id::{IdGenerator, SequentialIds, UuidV4Ids};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::book::{Book, BookId, BookStatus, InvalidStatus};
pub use search::{matches_keyword, search_books};
pub use service::catalog::{Catalog, CatalogError, CatalogResult};
pub use store::{JsonFileStore, MemoryStore, RecordStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
